//! Lesson viewer: resolves a course lesson to its bundled page and works out
//! where the previous/next buttons lead.

use std::sync::Arc;

use codelearn_core::model::{AssetPath, Course, CourseId, LessonId};
use storage::assets::AssetSource;
use storage::repository::CourseRepository;

use crate::error::ContentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Previous,
    Next,
}

/// Where the viewer's navigation buttons point.
///
/// Targets are found by lesson ordinal: previous is the lesson numbered one
/// lower, next the one numbered one higher. A lesson without an ordinal gets
/// no navigation at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonNavigation {
    pub previous: Option<LessonId>,
    pub next: Option<LessonId>,
    /// 1-based position in the course, if the lesson is part of it.
    pub position: usize,
    pub total: usize,
}

impl LessonNavigation {
    fn for_lesson(course: &Course, lesson: &LessonId) -> Self {
        let sequence = course.lessons();
        let total = sequence.total();
        let position = sequence.index_of(lesson).map_or(0, |i| i + 1);

        let Some(ordinal) = lesson.ordinal() else {
            tracing::debug!(lesson = %lesson, "lesson has no ordinal, navigation disabled");
            return Self {
                previous: None,
                next: None,
                position,
                total,
            };
        };

        let with_ordinal = |n: u32| {
            sequence
                .lessons()
                .iter()
                .find(|l| l.ordinal() == Some(n))
                .cloned()
        };
        let previous = if ordinal > 1 {
            with_ordinal(ordinal - 1)
        } else {
            None
        };
        let next = if (ordinal as usize) < total {
            with_ordinal(ordinal + 1)
        } else {
            None
        };

        Self {
            previous,
            next,
            position,
            total,
        }
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.previous.is_some()
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }

    #[must_use]
    pub fn target(&self, direction: Direction) -> Option<&LessonId> {
        match direction {
            Direction::Previous => self.previous.as_ref(),
            Direction::Next => self.next.as_ref(),
        }
    }
}

/// A lesson ready to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LessonPage {
    pub course_id: CourseId,
    pub course_title: String,
    pub lesson: LessonId,
    pub path: AssetPath,
    pub text: String,
    pub navigation: LessonNavigation,
}

pub struct ContentService {
    courses: Arc<dyn CourseRepository>,
    assets: Arc<dyn AssetSource>,
}

impl ContentService {
    #[must_use]
    pub fn new(courses: Arc<dyn CourseRepository>, assets: Arc<dyn AssetSource>) -> Self {
        Self { courses, assets }
    }

    /// Load `lesson` of course `id`.
    ///
    /// # Errors
    ///
    /// - `CourseNotFound` if the course does not exist.
    /// - `OfflineUnavailable` if the course ships no lesson pages.
    /// - `UnknownLesson` if `lesson` is not part of the course.
    /// - `NotFound` if the page is missing from the asset source.
    #[tracing::instrument(skip(self))]
    pub async fn open(&self, id: CourseId, lesson: &LessonId) -> Result<LessonPage, ContentError> {
        let course = self.offline_course(id).await?;
        if course.lessons().index_of(lesson).is_none() {
            return Err(ContentError::UnknownLesson {
                course: id,
                lesson: lesson.to_string(),
            });
        }
        self.read_page(&course, lesson.clone()).await
    }

    /// Load the first lesson of course `id`.
    ///
    /// # Errors
    ///
    /// Same as [`ContentService::open`].
    pub async fn open_first(&self, id: CourseId) -> Result<LessonPage, ContentError> {
        let course = self.offline_course(id).await?;
        let first = course
            .first_lesson()
            .cloned()
            .ok_or(ContentError::OfflineUnavailable(id))?;
        self.read_page(&course, first).await
    }

    /// Load the lesson the learner is on, or the first one if they have not
    /// started.
    ///
    /// # Errors
    ///
    /// Same as [`ContentService::open`].
    pub async fn open_current(&self, id: CourseId) -> Result<LessonPage, ContentError> {
        let course = self.offline_course(id).await?;
        let lesson = course
            .current_lesson()
            .or_else(|| course.first_lesson())
            .cloned()
            .ok_or(ContentError::OfflineUnavailable(id))?;
        self.read_page(&course, lesson).await
    }

    /// Follow a navigation button from `page`. `Ok(None)` when the button is
    /// disabled.
    ///
    /// # Errors
    ///
    /// Same as [`ContentService::open`].
    pub async fn navigate(
        &self,
        page: &LessonPage,
        direction: Direction,
    ) -> Result<Option<LessonPage>, ContentError> {
        match page.navigation.target(direction) {
            Some(target) => self.open(page.course_id, target).await.map(Some),
            None => Ok(None),
        }
    }

    async fn offline_course(&self, id: CourseId) -> Result<Course, ContentError> {
        let course = self
            .courses
            .get_course(id)
            .await?
            .ok_or(ContentError::CourseNotFound(id))?;
        if !course.has_offline_content() {
            return Err(ContentError::OfflineUnavailable(id));
        }
        Ok(course)
    }

    async fn read_page(
        &self,
        course: &Course,
        lesson: LessonId,
    ) -> Result<LessonPage, ContentError> {
        let path = course.offline_asset_path(&lesson);
        let Some(text) = self.assets.read_text(&path).await? else {
            tracing::warn!(%path, "lesson page missing");
            return Err(ContentError::NotFound {
                path: path.to_string(),
            });
        };
        tracing::debug!(%path, bytes = text.len(), "opened lesson");

        Ok(LessonPage {
            course_id: course.id(),
            course_title: course.title().to_owned(),
            navigation: LessonNavigation::for_lesson(course, &lesson),
            lesson,
            path,
            text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codelearn_core::model::{Category, Difficulty};
    use codelearn_core::time::fixed_now;
    use storage::assets::InMemoryAssets;
    use storage::repository::InMemoryRepository;

    fn lessons(names: &[&str]) -> Vec<LessonId> {
        names.iter().map(|n| LessonId::parse(*n).unwrap()).collect()
    }

    fn course(id: u64, lesson_names: &[&str]) -> Course {
        Course::new(
            CourseId::new(id),
            "JavaScript Basics",
            "Variables and functions",
            Category::JavaScript,
            Difficulty::new(2).unwrap(),
            120,
            fixed_now(),
        )
        .unwrap()
        .with_offline_lessons(lessons(lesson_names))
    }

    async fn service_with(courses: &[Course], pages: &[&str]) -> ContentService {
        let repo = InMemoryRepository::new();
        let assets = InMemoryAssets::new();
        for c in courses {
            repo.upsert_course(c).await.unwrap();
            for lesson in c.lessons().lessons() {
                if pages.contains(&lesson.file_name()) {
                    assets
                        .insert(&c.offline_asset_path(lesson), format!("<p>{lesson}</p>"))
                        .unwrap();
                }
            }
        }
        ContentService::new(Arc::new(repo), Arc::new(assets))
    }

    const THREE: &[&str] = &["01_intro.html", "02_vars.html", "03_funcs.html"];

    #[tokio::test]
    async fn open_first_reads_page_and_navigation() {
        let service = service_with(&[course(1, THREE)], THREE).await;
        let page = service.open_first(CourseId::new(1)).await.unwrap();

        assert_eq!(page.path.as_str(), "content/javascript/01_intro.html");
        assert_eq!(page.text, "<p>01_intro.html</p>");
        assert_eq!(page.course_title, "JavaScript Basics");
        assert_eq!(page.navigation.previous, None);
        assert_eq!(page.navigation.next, Some(LessonId::parse("02_vars.html").unwrap()));
        assert_eq!((page.navigation.position, page.navigation.total), (1, 3));
    }

    #[tokio::test]
    async fn last_lesson_has_no_next() {
        let service = service_with(&[course(1, THREE)], THREE).await;
        let last = LessonId::parse("03_funcs.html").unwrap();
        let page = service.open(CourseId::new(1), &last).await.unwrap();

        assert!(page.navigation.has_previous());
        assert!(!page.navigation.has_next());
    }

    #[tokio::test]
    async fn navigate_follows_ordinals() {
        let service = service_with(&[course(1, THREE)], THREE).await;
        let first = service.open_first(CourseId::new(1)).await.unwrap();

        let second = service
            .navigate(&first, Direction::Next)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(second.lesson.file_name(), "02_vars.html");
        assert_eq!(second.navigation.position, 2);

        assert!(service
            .navigate(&first, Direction::Previous)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn missing_ordinal_disables_navigation() {
        let names = &["intro.html", "vars.html"];
        let service = service_with(&[course(1, names)], names).await;
        let page = service.open_first(CourseId::new(1)).await.unwrap();

        assert!(!page.navigation.has_previous());
        assert!(!page.navigation.has_next());
        assert_eq!(page.navigation.position, 1);
    }

    #[tokio::test]
    async fn missing_page_is_not_found() {
        let service = service_with(&[course(1, THREE)], &["01_intro.html"]).await;
        let lesson = LessonId::parse("02_vars.html").unwrap();

        let err = service.open(CourseId::new(1), &lesson).await.unwrap_err();
        assert!(matches!(
            err,
            ContentError::NotFound { ref path } if path == "content/javascript/02_vars.html"
        ));
    }

    #[tokio::test]
    async fn course_without_lessons_is_offline_unavailable() {
        let service = service_with(&[course(1, &[])], &[]).await;
        assert!(matches!(
            service.open_first(CourseId::new(1)).await,
            Err(ContentError::OfflineUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn foreign_lesson_is_rejected() {
        let service = service_with(&[course(1, THREE)], THREE).await;
        let lesson = LessonId::parse("09_other.html").unwrap();
        assert!(matches!(
            service.open(CourseId::new(1), &lesson).await,
            Err(ContentError::UnknownLesson { .. })
        ));
    }

    #[tokio::test]
    async fn unknown_course() {
        let service = service_with(&[], &[]).await;
        assert!(matches!(
            service.open_first(CourseId::new(3)).await,
            Err(ContentError::CourseNotFound(_))
        ));
    }

    #[tokio::test]
    async fn open_current_falls_back_to_first() {
        let mut started = course(2, THREE);
        started
            .select_lesson(LessonId::parse("03_funcs.html").unwrap(), fixed_now())
            .unwrap();
        let service = service_with(&[course(1, THREE), started], THREE).await;

        let fresh = service.open_current(CourseId::new(1)).await.unwrap();
        assert_eq!(fresh.lesson.file_name(), "01_intro.html");
        let resumed = service.open_current(CourseId::new(2)).await.unwrap();
        assert_eq!(resumed.lesson.file_name(), "03_funcs.html");
    }
}
