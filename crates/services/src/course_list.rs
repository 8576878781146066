use std::sync::{Arc, Mutex, PoisonError};

use codelearn_core::catalog::{self, CatalogQuery, CourseFilter, CourseSort};
use codelearn_core::model::Course;
use storage::repository::CourseRepository;
use tokio::sync::watch;

use crate::error::CourseListError;
use crate::scheduler::{Scheduler, SimulatedLatency, pause};

/// What the course list screen observes.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CourseListState {
    pub courses: Vec<Course>,
    pub loading: bool,
    pub error: Option<String>,
    pub query: CatalogQuery,
    pub search: Option<String>,
}

#[derive(Default)]
struct ListModel {
    all: Vec<Course>,
    filtered: Vec<Course>,
    query: CatalogQuery,
    search: Option<String>,
}

impl ListModel {
    fn rederive(&mut self) {
        self.filtered = self.query.apply(&self.all);
    }

    fn visible(&self) -> Vec<Course> {
        match &self.search {
            Some(q) => catalog::search(&self.filtered, q),
            None => self.filtered.clone(),
        }
    }
}

/// Course list with filter, sort and search.
///
/// Keeps the full collection and the filtered+sorted view; every change is
/// published to subscribers as a fresh `CourseListState`. An active search
/// survives filter and sort changes and is re-run over the new view.
pub struct CourseListService {
    courses: Arc<dyn CourseRepository>,
    scheduler: Arc<dyn Scheduler>,
    latency: SimulatedLatency,
    model: Mutex<ListModel>,
    state: watch::Sender<CourseListState>,
}

impl CourseListService {
    #[must_use]
    pub fn new(
        courses: Arc<dyn CourseRepository>,
        scheduler: Arc<dyn Scheduler>,
        latency: SimulatedLatency,
    ) -> Self {
        let (state, _) = watch::channel(CourseListState::default());
        Self {
            courses,
            scheduler,
            latency,
            model: Mutex::new(ListModel::default()),
            state,
        }
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CourseListState> {
        self.state.subscribe()
    }

    /// Latest published state.
    #[must_use]
    pub fn state(&self) -> CourseListState {
        self.state.borrow().clone()
    }

    /// Fetch the catalog and publish the filtered, sorted view.
    ///
    /// # Errors
    ///
    /// Returns `CourseListError::Storage` if the repository fails; the error is
    /// also published in the state.
    #[tracing::instrument(skip(self))]
    pub async fn load(&self) -> Result<(), CourseListError> {
        self.set_loading(true);
        pause(self.scheduler.as_ref(), self.latency.list).await;

        match self.courses.list_courses().await {
            Ok(all) => {
                tracing::debug!(count = all.len(), "loaded courses");
                let mut model = self.lock_model();
                model.all = all;
                model.rederive();
                self.publish(&model, None);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load courses");
                let model = self.lock_model();
                self.publish(&model, Some(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// # Errors
    ///
    /// Same as [`CourseListService::load`].
    pub async fn refresh(&self) -> Result<(), CourseListError> {
        self.load().await
    }

    /// Run [`CourseListService::load`] on the scheduler without waiting for it.
    pub fn spawn_load(self: &Arc<Self>) {
        let this = Arc::clone(self);
        self.scheduler.spawn(Box::pin(async move {
            // Failures are already published to subscribers.
            let _ = this.load().await;
        }));
    }

    pub fn set_filter(&self, filter: CourseFilter) {
        let mut model = self.lock_model();
        model.query.filter = filter;
        model.rederive();
        self.publish(&model, None);
    }

    pub fn set_sort(&self, sort: CourseSort) {
        let mut model = self.lock_model();
        model.query.sort = sort;
        model.rederive();
        self.publish(&model, None);
    }

    /// Narrow the current view to courses whose title or description contains
    /// `query`. A blank query shows the whole filtered view.
    pub async fn search(&self, query: &str) {
        self.set_loading(true);
        pause(self.scheduler.as_ref(), self.latency.search).await;

        let mut model = self.lock_model();
        let trimmed = query.trim();
        model.search = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        self.publish(&model, None);
    }

    pub fn clear_search(&self) {
        let mut model = self.lock_model();
        model.search = None;
        self.publish(&model, None);
    }

    fn lock_model(&self) -> std::sync::MutexGuard<'_, ListModel> {
        self.model.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn set_loading(&self, loading: bool) {
        self.state.send_modify(|state| state.loading = loading);
    }

    fn publish(&self, model: &ListModel, error: Option<String>) {
        self.state.send_replace(CourseListState {
            courses: model.visible(),
            loading: false,
            error,
            query: model.query,
            search: model.search.clone(),
        });
    }
}
