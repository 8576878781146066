use std::sync::Arc;

use codelearn_core::Clock;
use codelearn_core::model::{Course, CourseId, LessonId};
use storage::repository::CourseRepository;

use crate::error::ProgressError;

/// Snapshot of where the learner stands in one course.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseProgress {
    pub current: Option<LessonId>,
    pub completed: usize,
    pub total: usize,
    pub percent: u8,
    pub finished: bool,
}

impl CourseProgress {
    fn of(course: &Course) -> Self {
        let lessons = course.lessons();
        Self {
            current: lessons.current().cloned(),
            completed: lessons.completed(),
            total: lessons.total(),
            percent: lessons.progress_percent(),
            finished: lessons.is_finished(),
        }
    }
}

/// Moves the lesson cursor of stored courses and persists the result.
pub struct ProgressService {
    courses: Arc<dyn CourseRepository>,
    clock: Clock,
}

impl ProgressService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseRepository>, clock: Clock) -> Self {
        Self { courses, clock }
    }

    /// # Errors
    ///
    /// Returns `ProgressError::NotFound` for an unknown course.
    pub async fn progress(&self, id: CourseId) -> Result<CourseProgress, ProgressError> {
        let course = self.load(id).await?;
        Ok(CourseProgress::of(&course))
    }

    /// Mark the current lesson complete and move to the next one.
    ///
    /// Returns the lesson the cursor moved to, or `None` once the course is
    /// finished. A course that was never started counts as being before its
    /// first lesson, so the first call lands on lesson one without completing
    /// anything.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError::NotFound` for an unknown course and
    /// `ProgressError::Storage` if the write fails.
    #[tracing::instrument(skip(self))]
    pub async fn complete_current(&self, id: CourseId) -> Result<Option<LessonId>, ProgressError> {
        let mut course = self.load(id).await?;
        let next = course.complete_current_and_advance(self.clock.now());
        self.courses.upsert_course(&course).await?;

        tracing::info!(
            %id,
            completed = course.completed_lessons(),
            total = course.total_lessons(),
            "lesson completed"
        );
        Ok(next)
    }

    /// # Errors
    ///
    /// Returns `ProgressError::Course` if `lesson` is not part of the course.
    #[tracing::instrument(skip(self))]
    pub async fn select_lesson(&self, id: CourseId, lesson: LessonId) -> Result<(), ProgressError> {
        let mut course = self.load(id).await?;
        course.select_lesson(lesson, self.clock.now())?;
        self.courses.upsert_course(&course).await?;
        Ok(())
    }

    /// # Errors
    ///
    /// Returns `ProgressError::NotFound` for an unknown course.
    #[tracing::instrument(skip(self))]
    pub async fn reset_progress(&self, id: CourseId) -> Result<(), ProgressError> {
        let mut course = self.load(id).await?;
        course.reset_progress(self.clock.now());
        self.courses.upsert_course(&course).await?;
        tracing::info!(%id, "progress reset");
        Ok(())
    }

    async fn load(&self, id: CourseId) -> Result<Course, ProgressError> {
        self.courses
            .get_course(id)
            .await?
            .ok_or(ProgressError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use codelearn_core::model::{Category, CourseError, Difficulty};
    use codelearn_core::time::fixed_now;
    use storage::repository::InMemoryRepository;

    fn lesson(name: &str) -> LessonId {
        LessonId::parse(name).unwrap()
    }

    async fn setup() -> (ProgressService, Arc<InMemoryRepository>) {
        let repo = Arc::new(InMemoryRepository::new());
        let course = Course::new(
            CourseId::new(1),
            "HTML Basics",
            "Tags and attributes",
            Category::Html,
            Difficulty::new(1).unwrap(),
            60,
            fixed_now(),
        )
        .unwrap()
        .with_offline_lessons(vec![lesson("a.html"), lesson("b.html"), lesson("c.html")]);
        repo.upsert_course(&course).await.unwrap();

        let later = fixed_now() + Duration::minutes(5);
        (ProgressService::new(repo.clone(), Clock::fixed(later)), repo)
    }

    #[tokio::test]
    async fn complete_walks_through_course() {
        let (service, _) = setup().await;
        let id = CourseId::new(1);

        assert_eq!(service.complete_current(id).await.unwrap(), Some(lesson("a.html")));
        assert_eq!(service.progress(id).await.unwrap().completed, 0);

        assert_eq!(service.complete_current(id).await.unwrap(), Some(lesson("b.html")));
        assert_eq!(service.progress(id).await.unwrap().completed, 1);

        assert_eq!(service.complete_current(id).await.unwrap(), Some(lesson("c.html")));
        assert_eq!(service.complete_current(id).await.unwrap(), None);

        let progress = service.progress(id).await.unwrap();
        assert_eq!(progress.completed, 3);
        assert_eq!(progress.percent, 100);
        assert!(progress.finished);
    }

    #[tokio::test]
    async fn select_then_complete_persists_with_new_timestamp() {
        let (service, repo) = setup().await;
        let id = CourseId::new(1);

        service.select_lesson(id, lesson("b.html")).await.unwrap();
        assert_eq!(service.complete_current(id).await.unwrap(), Some(lesson("c.html")));

        let stored = repo.get_course(id).await.unwrap().unwrap();
        assert_eq!(stored.completed_lessons(), 2);
        assert_eq!(stored.current_lesson(), Some(&lesson("c.html")));
        assert_eq!(stored.updated_at(), fixed_now() + Duration::minutes(5));
    }

    #[tokio::test]
    async fn selecting_foreign_lesson_fails() {
        let (service, _) = setup().await;
        let err = service
            .select_lesson(CourseId::new(1), lesson("z.html"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProgressError::Course(CourseError::Sequence(_))));
    }

    #[tokio::test]
    async fn reset_clears_progress() {
        let (service, _) = setup().await;
        let id = CourseId::new(1);
        service.select_lesson(id, lesson("c.html")).await.unwrap();
        service.complete_current(id).await.unwrap();

        service.reset_progress(id).await.unwrap();
        let progress = service.progress(id).await.unwrap();
        assert_eq!(progress.completed, 0);
        assert_eq!(progress.current, None);
        assert!(!progress.finished);
    }

    #[tokio::test]
    async fn unknown_course_is_not_found() {
        let (service, _) = setup().await;
        assert!(matches!(
            service.complete_current(CourseId::new(42)).await,
            Err(ProgressError::NotFound(_))
        ));
    }
}
