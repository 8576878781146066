//! Shared error types for the services crate.

use thiserror::Error;

use codelearn_core::model::{CourseError, CourseId};
use storage::repository::StorageError;
use storage::seed::SeedError;

/// Errors emitted by `CourseListService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseListError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CourseDetailService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CourseDetailError {
    #[error("course {0} not found")]
    NotFound(CourseId),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ContentService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContentError {
    #[error("course {0} not found")]
    CourseNotFound(CourseId),
    #[error("offline content is not available for course {0}")]
    OfflineUnavailable(CourseId),
    #[error("lesson {lesson} is not part of course {course}")]
    UnknownLesson { course: CourseId, lesson: String },
    #[error("content file not found: {path}")]
    NotFound { path: String },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("course {0} not found")]
    NotFound(CourseId),
    #[error(transparent)]
    Course(#[from] CourseError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `HomeService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum HomeError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Seed(#[from] SeedError),
}
