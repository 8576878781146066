use std::sync::Arc;

use codelearn_core::Clock;
use codelearn_core::model::{Course, CourseDetail, CourseId, CourseUpdate};
use storage::repository::{CourseDetailRepository, CourseRepository};

use crate::error::CourseDetailError;
use crate::scheduler::{Scheduler, SimulatedLatency, pause};

/// Course detail together with the learner's flags for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseDetailView {
    pub detail: CourseDetail,
    pub enrolled: bool,
    pub wishlisted: bool,
}

pub struct CourseDetailService {
    courses: Arc<dyn CourseRepository>,
    details: Arc<dyn CourseDetailRepository>,
    scheduler: Arc<dyn Scheduler>,
    latency: SimulatedLatency,
    clock: Clock,
}

impl CourseDetailService {
    #[must_use]
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        details: Arc<dyn CourseDetailRepository>,
        scheduler: Arc<dyn Scheduler>,
        latency: SimulatedLatency,
        clock: Clock,
    ) -> Self {
        Self {
            courses,
            details,
            scheduler,
            latency,
            clock,
        }
    }

    /// # Errors
    ///
    /// Returns `CourseDetailError::NotFound` for an unknown course and
    /// `CourseDetailError::Storage` if a lookup fails.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self, id: CourseId) -> Result<CourseDetailView, CourseDetailError> {
        pause(self.scheduler.as_ref(), self.latency.detail).await;

        let detail = self
            .details
            .get_detail(id)
            .await?
            .ok_or(CourseDetailError::NotFound(id))?;
        let enrolled = self.details.is_enrolled(id).await?;
        let wishlisted = self.details.is_wishlisted(id).await?;
        tracing::debug!(%id, enrolled, wishlisted, "loaded course detail");

        Ok(CourseDetailView {
            detail,
            enrolled,
            wishlisted,
        })
    }

    /// Flip enrollment and return the new state.
    ///
    /// # Errors
    ///
    /// Returns `CourseDetailError::NotFound` for an unknown course and
    /// `CourseDetailError::Storage` if the write fails.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_enrollment(&self, id: CourseId) -> Result<bool, CourseDetailError> {
        self.require_course(id).await?;
        pause(self.scheduler.as_ref(), self.latency.enrollment).await;

        let enrolled = !self.details.is_enrolled(id).await?;
        self.details.set_enrolled(id, enrolled).await?;
        tracing::info!(%id, enrolled, "enrollment changed");
        Ok(enrolled)
    }

    /// Flip the wishlist flag and return the new state.
    ///
    /// # Errors
    ///
    /// Same as [`CourseDetailService::toggle_enrollment`].
    #[tracing::instrument(skip(self))]
    pub async fn toggle_wishlist(&self, id: CourseId) -> Result<bool, CourseDetailError> {
        self.require_course(id).await?;
        pause(self.scheduler.as_ref(), self.latency.wishlist).await;

        let wishlisted = !self.details.is_wishlisted(id).await?;
        self.details.set_wishlisted(id, wishlisted).await?;
        tracing::info!(%id, wishlisted, "wishlist changed");
        Ok(wishlisted)
    }

    /// Apply `changes` to a course and store the new snapshot.
    ///
    /// An empty update returns the stored course untouched.
    ///
    /// # Errors
    ///
    /// Returns `CourseDetailError::NotFound` for an unknown course,
    /// `CourseDetailError::Course` if the changes fail validation and
    /// `CourseDetailError::Storage` if the write fails.
    pub async fn update_course(
        &self,
        id: CourseId,
        changes: CourseUpdate,
    ) -> Result<Course, CourseDetailError> {
        let course = self.require_course(id).await?;
        if changes.is_empty() {
            return Ok(course);
        }

        let updated = course.update(changes, self.clock.now())?;
        self.courses.upsert_course(&updated).await?;
        tracing::debug!(%id, "course updated");
        Ok(updated)
    }

    async fn require_course(&self, id: CourseId) -> Result<Course, CourseDetailError> {
        self.courses
            .get_course(id)
            .await?
            .ok_or(CourseDetailError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TokioScheduler;
    use chrono::Duration;
    use codelearn_core::model::{Category, CourseError, Difficulty, Pricing};
    use codelearn_core::time::fixed_now;
    use storage::repository::{CourseExtras, InMemoryRepository};

    async fn service() -> CourseDetailService {
        let repo = Arc::new(InMemoryRepository::new());
        let course = Course::new(
            CourseId::new(7),
            "Grid Layout",
            "Two dimensional layout",
            Category::Css,
            Difficulty::new(3).unwrap(),
            90,
            fixed_now(),
        )
        .unwrap();
        repo.upsert_course(&course).await.unwrap();

        let clock = Clock::fixed(fixed_now() + Duration::hours(1));
        CourseDetailService::new(
            repo.clone(),
            repo,
            Arc::new(TokioScheduler::current().unwrap()),
            SimulatedLatency::none(),
            clock,
        )
    }

    #[tokio::test]
    async fn load_uses_generic_extras_and_flags() {
        let service = service().await;
        let view = service.load(CourseId::new(7)).await.unwrap();

        assert_eq!(view.detail.course.title(), "Grid Layout");
        assert_eq!(view.detail.pricing, Pricing::Free);
        assert_eq!(view.detail, CourseExtras::generic().into_detail(view.detail.course.clone()));
        assert!(!view.enrolled);
        assert!(!view.wishlisted);
    }

    #[tokio::test]
    async fn load_unknown_course_is_not_found() {
        let service = service().await;
        let err = service.load(CourseId::new(99)).await.unwrap_err();
        assert!(matches!(err, CourseDetailError::NotFound(id) if id == CourseId::new(99)));
    }

    #[tokio::test]
    async fn toggles_flip_and_persist() {
        let service = service().await;
        let id = CourseId::new(7);

        assert!(service.toggle_enrollment(id).await.unwrap());
        assert!(service.toggle_wishlist(id).await.unwrap());
        let view = service.load(id).await.unwrap();
        assert!(view.enrolled && view.wishlisted);

        assert!(!service.toggle_enrollment(id).await.unwrap());
        assert!(!service.load(id).await.unwrap().enrolled);
    }

    #[tokio::test]
    async fn toggle_unknown_course_is_not_found() {
        let service = service().await;
        assert!(matches!(
            service.toggle_wishlist(CourseId::new(5)).await,
            Err(CourseDetailError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_bumps_timestamp_and_persists() {
        let service = service().await;
        let id = CourseId::new(7);

        let updated = service
            .update_course(id, CourseUpdate::new().title("CSS Grid"))
            .await
            .unwrap();
        assert_eq!(updated.title(), "CSS Grid");
        assert_eq!(updated.updated_at(), fixed_now() + Duration::hours(1));
        assert_eq!(updated.created_at(), fixed_now());

        let stored = service.load(id).await.unwrap().detail.course;
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn empty_update_keeps_timestamp() {
        let service = service().await;
        let course = service
            .update_course(CourseId::new(7), CourseUpdate::new())
            .await
            .unwrap();
        assert_eq!(course.updated_at(), fixed_now());
    }

    #[tokio::test]
    async fn invalid_update_is_rejected() {
        let service = service().await;
        let err = service
            .update_course(CourseId::new(7), CourseUpdate::new().title("   "))
            .await
            .unwrap_err();
        assert!(matches!(err, CourseDetailError::Course(CourseError::EmptyTitle)));
    }
}
