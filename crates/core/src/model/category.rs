use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Subject area a course belongs to.
///
/// The display tag is what the catalog shows; the asset directory is the
/// lowercased tag and is part of the bundled content layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Html,
    Css,
    JavaScript,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Html, Category::Css, Category::JavaScript];

    #[must_use]
    pub fn tag(self) -> &'static str {
        match self {
            Category::Html => "HTML",
            Category::Css => "CSS",
            Category::JavaScript => "JavaScript",
        }
    }

    /// Directory under `content/` holding this category's lessons.
    #[must_use]
    pub fn asset_dir(self) -> String {
        self.tag().to_lowercase()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" => Ok(Category::Html),
            "css" => Ok(Category::Css),
            "javascript" | "js" => Ok(Category::JavaScript),
            _ => Err(UnknownCategory(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn asset_dir_is_lowercased_tag() {
        assert_eq!(Category::Html.asset_dir(), "html");
        assert_eq!(Category::Css.asset_dir(), "css");
        assert_eq!(Category::JavaScript.asset_dir(), "javascript");
    }

    #[test]
    fn parses_tags_case_insensitively() {
        assert_eq!("JavaScript".parse::<Category>().unwrap(), Category::JavaScript);
        assert_eq!("js".parse::<Category>().unwrap(), Category::JavaScript);
        assert_eq!(" css ".parse::<Category>().unwrap(), Category::Css);
        assert!("rust".parse::<Category>().is_err());
    }
}
