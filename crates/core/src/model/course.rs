use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::{
    AssetPath, Category, CourseId, Difficulty, InvalidDifficulty, LessonId, LessonSequence,
    SequenceError,
};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum CourseError {
    #[error("course title cannot be empty")]
    EmptyTitle,

    #[error(transparent)]
    Difficulty(#[from] InvalidDifficulty),

    #[error(transparent)]
    Sequence(#[from] SequenceError),
}

//
// ─── UPDATE ────────────────────────────────────────────────────────────────────
//

/// Metadata changes applied by [`Course::update`]. Unset fields are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CourseUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    pub difficulty: Option<Difficulty>,
    pub estimated_minutes: Option<u32>,
    pub thumbnail: Option<Option<String>>,
    pub active: Option<bool>,
}

impl CourseUpdate {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    #[must_use]
    pub fn difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    #[must_use]
    pub fn estimated_minutes(mut self, minutes: u32) -> Self {
        self.estimated_minutes = Some(minutes);
        self
    }

    #[must_use]
    pub fn thumbnail(mut self, thumbnail: Option<String>) -> Self {
        self.thumbnail = Some(thumbnail);
        self
    }

    #[must_use]
    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

//
// ─── COURSE ────────────────────────────────────────────────────────────────────
//

/// A programming course with its lesson sequence and the learner's progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Course {
    id: CourseId,
    title: String,
    description: String,
    category: Category,
    difficulty: Difficulty,
    estimated_minutes: u32,
    thumbnail: Option<String>,
    active: bool,
    has_offline_content: bool,
    lessons: LessonSequence,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Course {
    /// Creates an active course with no lessons.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if the title is blank.
    pub fn new(
        id: CourseId,
        title: impl Into<String>,
        description: impl Into<String>,
        category: Category,
        difficulty: Difficulty,
        estimated_minutes: u32,
        created_at: DateTime<Utc>,
    ) -> Result<Self, CourseError> {
        let title = normalize_title(title.into())?;

        Ok(Self {
            id,
            title,
            description: description.into().trim().to_owned(),
            category,
            difficulty,
            estimated_minutes,
            thumbnail: None,
            active: true,
            has_offline_content: false,
            lessons: LessonSequence::default(),
            created_at,
            updated_at: created_at,
        })
    }

    #[must_use]
    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into()).filter(|t: &String| !t.trim().is_empty());
        self
    }

    /// Attach bundled lessons. A course with at least one lesson counts as
    /// having offline content.
    #[must_use]
    pub fn with_offline_lessons(mut self, lessons: Vec<LessonId>) -> Self {
        self.has_offline_content = !lessons.is_empty();
        self.lessons = LessonSequence::new(lessons);
        self
    }

    /// Replace the sequence, including progress, e.g. when rehydrating.
    #[must_use]
    pub fn with_sequence(mut self, lessons: LessonSequence) -> Self {
        self.has_offline_content = !lessons.is_empty();
        self.lessons = lessons;
        self
    }

    /// Apply metadata changes, returning a new snapshot stamped with `now`.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::EmptyTitle` if the new title is blank.
    pub fn update(&self, changes: CourseUpdate, now: DateTime<Utc>) -> Result<Self, CourseError> {
        let mut next = self.clone();
        if let Some(title) = changes.title {
            next.title = normalize_title(title)?;
        }
        if let Some(description) = changes.description {
            next.description = description.trim().to_owned();
        }
        if let Some(category) = changes.category {
            next.category = category;
        }
        if let Some(difficulty) = changes.difficulty {
            next.difficulty = difficulty;
        }
        if let Some(minutes) = changes.estimated_minutes {
            next.estimated_minutes = minutes;
        }
        if let Some(thumbnail) = changes.thumbnail {
            next.thumbnail = thumbnail.filter(|t| !t.trim().is_empty());
        }
        if let Some(active) = changes.active {
            next.active = active;
        }
        next.updated_at = now;
        Ok(next)
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> CourseId {
        self.id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    #[must_use]
    pub fn estimated_minutes(&self) -> u32 {
        self.estimated_minutes
    }

    #[must_use]
    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn has_offline_content(&self) -> bool {
        self.has_offline_content
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    #[must_use]
    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    #[must_use]
    pub fn lessons(&self) -> &LessonSequence {
        &self.lessons
    }

    #[must_use]
    pub fn first_lesson(&self) -> Option<&LessonId> {
        self.lessons.first()
    }

    #[must_use]
    pub fn current_lesson(&self) -> Option<&LessonId> {
        self.lessons.current()
    }

    #[must_use]
    pub fn completed_lessons(&self) -> usize {
        self.lessons.completed()
    }

    #[must_use]
    pub fn total_lessons(&self) -> usize {
        self.lessons.total()
    }

    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.lessons.current_index()
    }

    #[must_use]
    pub fn next_lesson(&self) -> Option<&LessonId> {
        self.lessons.next_lesson()
    }

    #[must_use]
    pub fn previous_lesson(&self) -> Option<&LessonId> {
        self.lessons.previous_lesson()
    }

    /// Complete the current lesson and advance; see
    /// [`LessonSequence::complete_current_and_advance`].
    pub fn complete_current_and_advance(&mut self, now: DateTime<Utc>) -> Option<LessonId> {
        let next = self.lessons.complete_current_and_advance().cloned();
        self.updated_at = now;
        next
    }

    /// Point the cursor at `lesson`.
    ///
    /// # Errors
    ///
    /// Returns `CourseError::Sequence` if the lesson does not belong to this course.
    pub fn select_lesson(
        &mut self,
        lesson: LessonId,
        now: DateTime<Utc>,
    ) -> Result<(), CourseError> {
        self.lessons.set_current(lesson)?;
        self.updated_at = now;
        Ok(())
    }

    pub fn reset_progress(&mut self, now: DateTime<Utc>) {
        self.lessons.reset();
        self.updated_at = now;
    }

    /// Where the bundled page for `lesson` lives.
    #[must_use]
    pub fn offline_asset_path(&self, lesson: &LessonId) -> AssetPath {
        AssetPath::for_lesson(self.category, lesson)
    }

    /// Human readable estimate, e.g. `45 min`, `2 hours`, `1 hour 30 min`.
    #[must_use]
    pub fn formatted_duration(&self) -> String {
        format_minutes(self.estimated_minutes)
    }
}

fn normalize_title(title: String) -> Result<String, CourseError> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Err(CourseError::EmptyTitle);
    }
    Ok(trimmed.to_owned())
}

fn format_minutes(total: u32) -> String {
    if total < 60 {
        return format!("{total} min");
    }
    let hours = total / 60;
    let minutes = total % 60;
    let unit = if hours > 1 { "hours" } else { "hour" };
    if minutes == 0 {
        format!("{hours} {unit}")
    } else {
        format!("{hours} {unit} {minutes} min")
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
