use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum LessonIdError {
    #[error("lesson file name cannot be empty")]
    EmptyName,

    #[error("lesson file name must not contain path separators: {0}")]
    NotAFileName(String),
}

/// Identifier of a single lesson page within a course.
///
/// The file name is the identity; `ordinal` is the lesson number carried in
/// the file name (`01_intro.html` is lesson 1, `lesson12.html` is lesson 12)
/// and is `None` when the name holds no digits. Equality and hashing only
/// look at the file name.
#[derive(Debug, Clone, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LessonId {
    file_name: String,
    ordinal: Option<u32>,
}

impl LessonId {
    /// Build a lesson id from a bare file name, deriving the ordinal.
    ///
    /// # Errors
    ///
    /// Returns `LessonIdError::EmptyName` for blank input and
    /// `LessonIdError::NotAFileName` if the name contains `/` or `\`, or is
    /// `.` or `..`.
    pub fn parse(file_name: impl Into<String>) -> Result<Self, LessonIdError> {
        let file_name = file_name.into().trim().to_owned();
        if file_name.is_empty() {
            return Err(LessonIdError::EmptyName);
        }
        if file_name.contains(['/', '\\']) || file_name == "." || file_name == ".." {
            return Err(LessonIdError::NotAFileName(file_name));
        }
        let ordinal = ordinal_from_name(&file_name);
        Ok(Self { file_name, ordinal })
    }

    /// Build a lesson id with an explicit ordinal, ignoring any digits in the name.
    ///
    /// # Errors
    ///
    /// Same as [`LessonId::parse`].
    pub fn with_ordinal(file_name: impl Into<String>, ordinal: u32) -> Result<Self, LessonIdError> {
        let mut id = Self::parse(file_name)?;
        id.ordinal = Some(ordinal);
        Ok(id)
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn ordinal(&self) -> Option<u32> {
        self.ordinal
    }
}

impl PartialEq for LessonId {
    fn eq(&self, other: &Self) -> bool {
        self.file_name == other.file_name
    }
}

impl std::hash::Hash for LessonId {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.file_name.hash(state);
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.file_name)
    }
}

impl TryFrom<String> for LessonId {
    type Error = LessonIdError;

    fn try_from(file_name: String) -> Result<Self, Self::Error> {
        Self::parse(file_name)
    }
}

impl From<LessonId> for String {
    fn from(id: LessonId) -> Self {
        id.file_name
    }
}

impl FromStr for LessonId {
    type Err = LessonIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// First run of ASCII digits in the file stem.
fn ordinal_from_name(file_name: &str) -> Option<u32> {
    let stem = file_name
        .rsplit_once('.')
        .map_or(file_name, |(stem, _ext)| stem);
    let digits: String = stem
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}
