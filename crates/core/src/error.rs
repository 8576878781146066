use thiserror::Error;

use crate::model::{CourseError, InvalidDifficulty, LessonIdError, SequenceError, UnknownCategory};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Sequence(#[from] SequenceError),
    #[error(transparent)]
    LessonId(#[from] LessonIdError),
    #[error(transparent)]
    Difficulty(#[from] InvalidDifficulty),
    #[error(transparent)]
    Category(#[from] UnknownCategory),
}
