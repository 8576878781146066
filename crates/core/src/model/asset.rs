use std::fmt;

use crate::model::{Category, LessonId};

/// Root directory of bundled lesson content.
pub const CONTENT_ROOT: &str = "content";

/// Relative location of a bundled lesson page: `content/<category>/<file>`.
///
/// This layout is shared with whoever authors lesson packs, so it must not
/// change shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetPath(String);

impl AssetPath {
    #[must_use]
    pub fn for_lesson(category: Category, lesson: &LessonId) -> Self {
        Self(format!(
            "{CONTENT_ROOT}/{}/{}",
            category.asset_dir(),
            lesson.file_name()
        ))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments, for joining onto a filesystem root.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Display for AssetPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for AssetPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_uses_lowercased_category() {
        let lesson = LessonId::parse("01_intro.html").unwrap();
        let path = AssetPath::for_lesson(Category::JavaScript, &lesson);
        assert_eq!(path.as_str(), "content/javascript/01_intro.html");
        assert_eq!(
            path.segments().collect::<Vec<_>>(),
            ["content", "javascript", "01_intro.html"]
        );
    }
}
