use async_trait::async_trait;
use codelearn_core::model::{
    Achievement, AchievementId, Course, CourseDetail, CourseId, Instructor, LearnerSummary,
    Pricing,
};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Detail-screen data that is not part of the `Course` entity itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseExtras {
    pub learning_outcomes: Vec<String>,
    pub requirements: Vec<String>,
    pub instructor: Instructor,
    pub pricing: Pricing,
    pub student_count: u32,
}

impl CourseExtras {
    /// Placeholder extras for courses nobody has written copy for yet.
    #[must_use]
    pub fn generic() -> Self {
        Self {
            learning_outcomes: vec![
                "Learn core concepts and fundamentals".into(),
                "Apply knowledge through practical exercises".into(),
                "Build real-world projects".into(),
                "Master advanced techniques".into(),
                "Understand best practices and industry standards".into(),
            ],
            requirements: vec![
                "Basic computer skills".into(),
                "Internet access".into(),
                "Text editor".into(),
                "Web browser".into(),
            ],
            instructor: Instructor::new("John Doe", "Web Developer"),
            pricing: Pricing::Free,
            student_count: 5_000,
        }
    }

    #[must_use]
    pub fn into_detail(self, course: Course) -> CourseDetail {
        CourseDetail {
            course,
            learning_outcomes: self.learning_outcomes,
            requirements: self.requirements,
            instructor: self.instructor,
            pricing: self.pricing,
            student_count: self.student_count,
        }
    }
}

/// Repository contract for the course catalog.
#[async_trait]
pub trait CourseRepository: Send + Sync {
    /// Persist or replace a course snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the course cannot be stored.
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError>;

    /// Fetch a course by ID.
    ///
    /// Returns `Ok(None)` if the course does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError>;

    /// All courses in catalog order (ascending id).
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_courses(&self) -> Result<Vec<Course>, StorageError>;

    /// Most recently touched courses first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_recent(&self, limit: usize) -> Result<Vec<Course>, StorageError>;
}

/// Repository contract for detail-screen data and per-learner course flags.
#[async_trait]
pub trait CourseDetailRepository: Send + Sync {
    /// Course plus its extras. Courses without stored extras get
    /// [`CourseExtras::generic`].
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn get_detail(&self, id: CourseId) -> Result<Option<CourseDetail>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn upsert_extras(&self, id: CourseId, extras: CourseExtras) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn is_enrolled(&self, id: CourseId) -> Result<bool, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn set_enrolled(&self, id: CourseId, enrolled: bool) -> Result<(), StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn is_wishlisted(&self, id: CourseId) -> Result<bool, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn set_wishlisted(&self, id: CourseId, wishlisted: bool) -> Result<(), StorageError>;
}

/// Repository contract for learner-level data shown on the home screen.
#[async_trait]
pub trait LearnerRepository: Send + Sync {
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if no learner profile exists.
    async fn get_summary(&self) -> Result<LearnerSummary, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn save_summary(&self, summary: &LearnerSummary) -> Result<(), StorageError>;

    /// Achievements ordered by id.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn list_achievements(&self) -> Result<Vec<Achievement>, StorageError>;

    /// # Errors
    ///
    /// Returns `StorageError` on backend failures.
    async fn upsert_achievement(&self, achievement: &Achievement) -> Result<(), StorageError>;
}

#[derive(Default)]
struct CatalogState {
    courses: BTreeMap<CourseId, Course>,
    extras: HashMap<CourseId, CourseExtras>,
    enrolled: HashSet<CourseId>,
    wishlisted: HashSet<CourseId>,
}

#[derive(Default)]
struct LearnerState {
    summary: Option<LearnerSummary>,
    achievements: BTreeMap<AchievementId, Achievement>,
}

/// In-memory repository backing the offline app and tests.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<CatalogState>>,
    learner: Arc<Mutex<LearnerState>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn catalog(&self) -> Result<MutexGuard<'_, CatalogState>, StorageError> {
        self.catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }

    fn learner(&self) -> Result<MutexGuard<'_, LearnerState>, StorageError> {
        self.learner
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))
    }
}

#[async_trait]
impl CourseRepository for InMemoryRepository {
    async fn upsert_course(&self, course: &Course) -> Result<(), StorageError> {
        let mut guard = self.catalog()?;
        guard.courses.insert(course.id(), course.clone());
        tracing::debug!(course_id = %course.id(), "stored course");
        Ok(())
    }

    async fn get_course(&self, id: CourseId) -> Result<Option<Course>, StorageError> {
        let guard = self.catalog()?;
        Ok(guard.courses.get(&id).cloned())
    }

    async fn list_courses(&self) -> Result<Vec<Course>, StorageError> {
        let guard = self.catalog()?;
        Ok(guard.courses.values().cloned().collect())
    }

    async fn list_recent(&self, limit: usize) -> Result<Vec<Course>, StorageError> {
        let guard = self.catalog()?;
        let mut courses: Vec<Course> = guard.courses.values().cloned().collect();
        courses.sort_by(|a, b| b.updated_at().cmp(&a.updated_at()));
        courses.truncate(limit);
        Ok(courses)
    }
}

#[async_trait]
impl CourseDetailRepository for InMemoryRepository {
    async fn get_detail(&self, id: CourseId) -> Result<Option<CourseDetail>, StorageError> {
        let guard = self.catalog()?;
        let Some(course) = guard.courses.get(&id).cloned() else {
            return Ok(None);
        };
        let extras = guard
            .extras
            .get(&id)
            .cloned()
            .unwrap_or_else(CourseExtras::generic);
        Ok(Some(extras.into_detail(course)))
    }

    async fn upsert_extras(&self, id: CourseId, extras: CourseExtras) -> Result<(), StorageError> {
        let mut guard = self.catalog()?;
        guard.extras.insert(id, extras);
        Ok(())
    }

    async fn is_enrolled(&self, id: CourseId) -> Result<bool, StorageError> {
        Ok(self.catalog()?.enrolled.contains(&id))
    }

    async fn set_enrolled(&self, id: CourseId, enrolled: bool) -> Result<(), StorageError> {
        let mut guard = self.catalog()?;
        if enrolled {
            guard.enrolled.insert(id);
        } else {
            guard.enrolled.remove(&id);
        }
        Ok(())
    }

    async fn is_wishlisted(&self, id: CourseId) -> Result<bool, StorageError> {
        Ok(self.catalog()?.wishlisted.contains(&id))
    }

    async fn set_wishlisted(&self, id: CourseId, wishlisted: bool) -> Result<(), StorageError> {
        let mut guard = self.catalog()?;
        if wishlisted {
            guard.wishlisted.insert(id);
        } else {
            guard.wishlisted.remove(&id);
        }
        Ok(())
    }
}

#[async_trait]
impl LearnerRepository for InMemoryRepository {
    async fn get_summary(&self) -> Result<LearnerSummary, StorageError> {
        self.learner()?.summary.clone().ok_or(StorageError::NotFound)
    }

    async fn save_summary(&self, summary: &LearnerSummary) -> Result<(), StorageError> {
        self.learner()?.summary = Some(summary.clone());
        Ok(())
    }

    async fn list_achievements(&self) -> Result<Vec<Achievement>, StorageError> {
        Ok(self.learner()?.achievements.values().cloned().collect())
    }

    async fn upsert_achievement(&self, achievement: &Achievement) -> Result<(), StorageError> {
        self.learner()?
            .achievements
            .insert(achievement.id(), achievement.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub courses: Arc<dyn CourseRepository>,
    pub details: Arc<dyn CourseDetailRepository>,
    pub learner: Arc<dyn LearnerRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_repository(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_repository(repo: InMemoryRepository) -> Self {
        let courses: Arc<dyn CourseRepository> = Arc::new(repo.clone());
        let details: Arc<dyn CourseDetailRepository> = Arc::new(repo.clone());
        let learner: Arc<dyn LearnerRepository> = Arc::new(repo);
        Self {
            courses,
            details,
            learner,
        }
    }
}
