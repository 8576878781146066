use std::sync::Arc;

use storage::assets::AssetSource;
use storage::repository::Storage;
use storage::seed::seed_mock_catalog;

use crate::Clock;
use crate::content::ContentService;
use crate::course_detail::CourseDetailService;
use crate::course_list::CourseListService;
use crate::error::AppServicesError;
use crate::home::HomeService;
use crate::progress::ProgressService;
use crate::scheduler::{Scheduler, SimulatedLatency};

/// Assembles app-facing services over one storage bundle.
#[derive(Clone)]
pub struct AppServices {
    course_list: Arc<CourseListService>,
    course_detail: Arc<CourseDetailService>,
    content: Arc<ContentService>,
    progress: Arc<ProgressService>,
    home: Arc<HomeService>,
}

impl AppServices {
    #[must_use]
    pub fn new(
        storage: &Storage,
        assets: Arc<dyn AssetSource>,
        scheduler: Arc<dyn Scheduler>,
        latency: SimulatedLatency,
        clock: Clock,
    ) -> Self {
        let course_list = Arc::new(CourseListService::new(
            Arc::clone(&storage.courses),
            Arc::clone(&scheduler),
            latency,
        ));
        let course_detail = Arc::new(CourseDetailService::new(
            Arc::clone(&storage.courses),
            Arc::clone(&storage.details),
            Arc::clone(&scheduler),
            latency,
            clock,
        ));
        let content = Arc::new(ContentService::new(Arc::clone(&storage.courses), assets));
        let progress = Arc::new(ProgressService::new(Arc::clone(&storage.courses), clock));
        let home = Arc::new(HomeService::new(
            Arc::clone(&storage.courses),
            Arc::clone(&storage.learner),
            scheduler,
            latency,
        ));

        Self {
            course_list,
            course_detail,
            content,
            progress,
            home,
        }
    }

    /// Build services over in-memory storage filled with the mock catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Seed` if the mock catalog cannot be stored.
    pub async fn with_mock_catalog(
        assets: Arc<dyn AssetSource>,
        scheduler: Arc<dyn Scheduler>,
        latency: SimulatedLatency,
        clock: Clock,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::in_memory();
        seed_mock_catalog(&storage, clock.now()).await?;
        Ok(Self::new(&storage, assets, scheduler, latency, clock))
    }

    #[must_use]
    pub fn course_list(&self) -> Arc<CourseListService> {
        Arc::clone(&self.course_list)
    }

    #[must_use]
    pub fn course_detail(&self) -> Arc<CourseDetailService> {
        Arc::clone(&self.course_detail)
    }

    #[must_use]
    pub fn content(&self) -> Arc<ContentService> {
        Arc::clone(&self.content)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressService> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn home(&self) -> Arc<HomeService> {
        Arc::clone(&self.home)
    }
}
