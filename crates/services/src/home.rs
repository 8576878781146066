use std::sync::Arc;

use codelearn_core::model::{Achievement, Course, LearnerSummary};
use storage::repository::{CourseRepository, LearnerRepository};

use crate::error::HomeError;
use crate::scheduler::{Scheduler, SimulatedLatency, pause};

/// Everything the home screen shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeView {
    pub learner: LearnerSummary,
    pub recent: Vec<Course>,
    pub achievements: Vec<Achievement>,
}

pub struct HomeService {
    courses: Arc<dyn CourseRepository>,
    learner: Arc<dyn LearnerRepository>,
    scheduler: Arc<dyn Scheduler>,
    latency: SimulatedLatency,
}

impl HomeService {
    #[must_use]
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        learner: Arc<dyn LearnerRepository>,
        scheduler: Arc<dyn Scheduler>,
        latency: SimulatedLatency,
    ) -> Self {
        Self {
            courses,
            learner,
            scheduler,
            latency,
        }
    }

    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) when no learner profile exists.
    #[tracing::instrument(skip(self))]
    pub async fn learner_summary(&self) -> Result<LearnerSummary, HomeError> {
        pause(self.scheduler.as_ref(), self.latency.learner).await;
        Ok(self.learner.get_summary().await?)
    }

    /// Most recently touched courses, newest first.
    ///
    /// # Errors
    ///
    /// Returns `HomeError::Storage` if the lookup fails.
    #[tracing::instrument(skip(self))]
    pub async fn recent_courses(&self, limit: usize) -> Result<Vec<Course>, HomeError> {
        pause(self.scheduler.as_ref(), self.latency.recent).await;
        let courses = self.courses.list_recent(limit).await?;
        tracing::debug!(count = courses.len(), "loaded recent courses");
        Ok(courses)
    }

    /// # Errors
    ///
    /// Returns `HomeError::Storage` if the lookup fails.
    pub async fn achievements(&self) -> Result<Vec<Achievement>, HomeError> {
        Ok(self.learner.list_achievements().await?)
    }

    /// Fetch the summary, recent courses and achievements concurrently.
    ///
    /// # Errors
    ///
    /// Returns the first error among the three lookups.
    pub async fn load(&self, recent_limit: usize) -> Result<HomeView, HomeError> {
        let (learner, recent, achievements) = tokio::join!(
            self.learner_summary(),
            self.recent_courses(recent_limit),
            self.achievements()
        );
        Ok(HomeView {
            learner: learner?,
            recent: recent?,
            achievements: achievements?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TokioScheduler;
    use chrono::Duration;
    use codelearn_core::model::{Category, CourseId, Difficulty};
    use codelearn_core::time::fixed_now;
    use storage::repository::{InMemoryRepository, StorageError};

    fn service(repo: Arc<InMemoryRepository>, latency: SimulatedLatency) -> HomeService {
        HomeService::new(
            repo.clone(),
            repo,
            Arc::new(TokioScheduler::current().unwrap()),
            latency,
        )
    }

    fn course(id: u64, minutes_after: i64) -> Course {
        Course::new(
            CourseId::new(id),
            format!("Course {id}"),
            "",
            Category::Html,
            Difficulty::new(1).unwrap(),
            30,
            fixed_now() + Duration::minutes(minutes_after),
        )
        .unwrap()
    }

    fn summary() -> LearnerSummary {
        LearnerSummary {
            name: "Ada".into(),
            enrolled_courses: 2,
            completed_lessons: 7,
            learning_streak_days: 3,
            total_minutes: 150,
        }
    }

    #[tokio::test]
    async fn missing_profile_is_storage_not_found() {
        let home = service(Arc::new(InMemoryRepository::new()), SimulatedLatency::none());
        assert!(matches!(
            home.learner_summary().await,
            Err(HomeError::Storage(StorageError::NotFound))
        ));
    }

    #[tokio::test]
    async fn recent_courses_are_newest_first_and_limited() {
        let repo = Arc::new(InMemoryRepository::new());
        for (id, offset) in [(1, 10), (2, 30), (3, 20)] {
            repo.upsert_course(&course(id, offset)).await.unwrap();
        }
        let home = service(repo, SimulatedLatency::none());

        let recent = home.recent_courses(2).await.unwrap();
        let ids: Vec<u64> = recent.iter().map(|c| c.id().value()).collect();
        assert_eq!(ids, [2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn load_runs_lookups_concurrently() {
        let repo = Arc::new(InMemoryRepository::new());
        repo.save_summary(&summary()).await.unwrap();
        let home = service(repo, SimulatedLatency::mock_backend());

        let start = tokio::time::Instant::now();
        let view = home.load(3).await.unwrap();

        assert_eq!(view.learner, summary());
        assert!(view.recent.is_empty());
        // The slower of the two delays, not their sum.
        let elapsed = start.elapsed();
        assert!(elapsed >= std::time::Duration::from_millis(800));
        assert!(elapsed < std::time::Duration::from_millis(1_400));
    }
}
