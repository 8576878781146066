use thiserror::Error;

use crate::model::lesson::LessonId;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SequenceError {
    #[error("lesson {0} is not part of this course")]
    UnknownLesson(String),

    #[error("completed lessons ({completed}) exceeds total lessons ({total})")]
    CompletedOutOfRange { completed: usize, total: usize },
}

/// Ordered lessons of a course plus the learner's cursor into them.
///
/// Lookups compare lesson ids by value and stop at the first match, so a
/// sequence holding the same file twice only ever resolves to the earlier
/// position.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LessonSequence {
    lessons: Vec<LessonId>,
    current: Option<LessonId>,
    completed: usize,
}

impl LessonSequence {
    /// A fresh sequence with no cursor and nothing completed.
    #[must_use]
    pub fn new(lessons: Vec<LessonId>) -> Self {
        warn_on_duplicates(&lessons);
        Self {
            lessons,
            current: None,
            completed: 0,
        }
    }

    /// Rehydrate a sequence with progress state.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::UnknownLesson` if `current` is not in `lessons`
    /// and `SequenceError::CompletedOutOfRange` if `completed > lessons.len()`.
    pub fn from_persisted(
        lessons: Vec<LessonId>,
        current: Option<LessonId>,
        completed: usize,
    ) -> Result<Self, SequenceError> {
        if completed > lessons.len() {
            return Err(SequenceError::CompletedOutOfRange {
                completed,
                total: lessons.len(),
            });
        }
        let mut sequence = Self::new(lessons);
        if let Some(lesson) = current {
            sequence.set_current(lesson)?;
        }
        sequence.completed = completed;
        Ok(sequence)
    }

    #[must_use]
    pub fn lessons(&self) -> &[LessonId] {
        &self.lessons
    }

    #[must_use]
    pub fn current(&self) -> Option<&LessonId> {
        self.current.as_ref()
    }

    #[must_use]
    pub fn completed(&self) -> usize {
        self.completed
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.lessons.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    #[must_use]
    pub fn first(&self) -> Option<&LessonId> {
        self.lessons.first()
    }

    /// Position of `lesson` in the sequence (first match).
    #[must_use]
    pub fn index_of(&self, lesson: &LessonId) -> Option<usize> {
        self.lessons.iter().position(|l| l == lesson)
    }

    /// 0-based position of the cursor, `None` when unset.
    #[must_use]
    pub fn current_index(&self) -> Option<usize> {
        self.current.as_ref().and_then(|lesson| self.index_of(lesson))
    }

    /// The lesson after the cursor, or the first lesson when no cursor is set.
    #[must_use]
    pub fn next_lesson(&self) -> Option<&LessonId> {
        match self.current_index() {
            Some(i) => self.lessons.get(i + 1),
            None => self.lessons.first(),
        }
    }

    #[must_use]
    pub fn previous_lesson(&self) -> Option<&LessonId> {
        let i = self.current_index()?;
        i.checked_sub(1).and_then(|prev| self.lessons.get(prev))
    }

    /// Mark everything up to and including the cursor as done and move to the
    /// following lesson.
    ///
    /// Returns the new current lesson, or `None` when the sequence is
    /// exhausted, in which case the cursor stays where it was.
    pub fn complete_current_and_advance(&mut self) -> Option<&LessonId> {
        let reached = self.current_index().map_or(0, |i| i + 1);
        self.completed = self.completed.max(reached);

        let next = self.lessons.get(reached)?.clone();
        self.current = Some(next);
        self.current.as_ref()
    }

    /// Move the cursor to `lesson` without touching the completed count.
    ///
    /// # Errors
    ///
    /// Returns `SequenceError::UnknownLesson` if the lesson is not in the sequence.
    pub fn set_current(&mut self, lesson: LessonId) -> Result<(), SequenceError> {
        match self.index_of(&lesson) {
            Some(i) => {
                self.current = Some(self.lessons[i].clone());
                Ok(())
            }
            None => Err(SequenceError::UnknownLesson(lesson.file_name().to_owned())),
        }
    }

    /// Clear the cursor and all progress.
    pub fn reset(&mut self) {
        self.current = None;
        self.completed = 0;
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        !self.lessons.is_empty() && self.completed == self.lessons.len()
    }

    /// Completed share of the sequence in whole percent.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        if self.lessons.is_empty() {
            return 0;
        }
        let percent = self.completed * 100 / self.lessons.len();
        u8::try_from(percent).unwrap_or(100)
    }
}

fn warn_on_duplicates(lessons: &[LessonId]) {
    for (i, lesson) in lessons.iter().enumerate() {
        if lessons[..i].contains(lesson) {
            tracing::warn!(
                lesson = %lesson,
                position = i,
                "duplicate lesson in sequence; lookups resolve to the first occurrence"
            );
        }
    }
}
