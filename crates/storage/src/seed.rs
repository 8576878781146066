//! Mock catalog used by the offline app until a real content backend exists.

use chrono::{DateTime, Utc};
use codelearn_core::model::{
    Achievement, AchievementId, AchievementKind, Category, Course, CourseId, Difficulty,
    Instructor, LearnerSummary, LessonId, Pricing,
};
use thiserror::Error;

use crate::assets::InMemoryAssets;
use crate::repository::{CourseExtras, Storage, StorageError};

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SeedError {
    #[error(transparent)]
    Domain(#[from] codelearn_core::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

struct MockCourse {
    id: u64,
    title: &'static str,
    description: &'static str,
    category: Category,
    difficulty: u8,
    minutes: u32,
    thumbnail: &'static str,
    lessons: &'static [&'static str],
}

const COURSES: &[MockCourse] = &[
    MockCourse {
        id: 1,
        title: "HTML Fundamentals",
        description: "Learn the basics of HTML from tags and attributes to the structure of a document.",
        category: Category::Html,
        difficulty: 1,
        minutes: 180,
        thumbnail: "html_basics",
        lessons: &[
            "01_introduction.html",
            "02_text_and_links.html",
            "03_lists_and_tables.html",
        ],
    },
    MockCourse {
        id: 2,
        title: "HTML Forms and Inputs",
        description: "Build forms and use the different input types to collect data from users.",
        category: Category::Html,
        difficulty: 2,
        minutes: 240,
        thumbnail: "html_forms",
        lessons: &["01_form_basics.html", "02_input_types.html"],
    },
    MockCourse {
        id: 3,
        title: "CSS Fundamentals",
        description: "Style web pages with selectors, properties, the box model and layout.",
        category: Category::Css,
        difficulty: 2,
        minutes: 300,
        thumbnail: "css_fundamentals",
        lessons: &[
            "01_introduction.html",
            "02_selectors.html",
            "03_box_model.html",
        ],
    },
    MockCourse {
        id: 4,
        title: "JavaScript Fundamentals",
        description: "Write interactive, dynamic pages with JavaScript variables, functions and the DOM.",
        category: Category::JavaScript,
        difficulty: 3,
        minutes: 420,
        thumbnail: "javascript_fundamentals",
        lessons: &["01_introduction.html", "02_variables.html"],
    },
];

/// The mock course list.
///
/// # Errors
///
/// Returns `codelearn_core::Error` if a hard-coded entry fails validation.
pub fn mock_courses(now: DateTime<Utc>) -> Result<Vec<Course>, codelearn_core::Error> {
    COURSES
        .iter()
        .map(|mock| -> Result<Course, codelearn_core::Error> {
            let lessons = mock
                .lessons
                .iter()
                .map(|file| LessonId::parse(*file))
                .collect::<Result<Vec<_>, _>>()?;
            let course = Course::new(
                CourseId::new(mock.id),
                mock.title,
                mock.description,
                mock.category,
                Difficulty::new(mock.difficulty)?,
                mock.minutes,
                now,
            )?
            .with_thumbnail(mock.thumbnail)
            .with_offline_lessons(lessons);
            Ok(course)
        })
        .collect()
}

/// Detail copy for the courses that have it; the rest fall back to
/// [`CourseExtras::generic`].
#[must_use]
pub fn mock_extras() -> Vec<(CourseId, CourseExtras)> {
    vec![
        (
            CourseId::new(1),
            CourseExtras {
                learning_outcomes: strings(&[
                    "Understand HTML structure and create well-formed documents",
                    "Master commonly used HTML tags and their proper usage",
                    "Create semantic web pages using HTML5 elements",
                    "Apply web accessibility guidelines (WCAG)",
                ]),
                requirements: strings(&[
                    "Basic computer skills and internet access",
                    "Text editor (Visual Studio Code recommended)",
                    "Modern web browser",
                    "No prior programming experience needed",
                ]),
                instructor: Instructor::new("Sarah Johnson", "Frontend Developer")
                    .with_image("instructors/sarah.jpg"),
                pricing: Pricing::Free,
                student_count: 15_420,
            },
        ),
        (
            CourseId::new(2),
            CourseExtras {
                learning_outcomes: strings(&[
                    "Build accessible forms with proper input types",
                    "Validate user input on the client",
                    "Group and label controls for screen readers",
                ]),
                requirements: strings(&[
                    "Strong understanding of HTML fundamentals",
                    "Basic CSS knowledge",
                ]),
                instructor: Instructor::new("Mike Chen", "Senior Web Developer")
                    .with_image("instructors/mike.jpg"),
                pricing: Pricing::Paid {
                    price_cents: 1_999,
                    original_price_cents: 4_999,
                },
                student_count: 8_930,
            },
        ),
        (
            CourseId::new(3),
            CourseExtras {
                learning_outcomes: strings(&[
                    "Style web pages with CSS selectors and properties",
                    "Master the CSS box model for layout control",
                    "Create responsive designs with Flexbox and Grid",
                    "Debug CSS issues effectively",
                ]),
                requirements: strings(&[
                    "Basic HTML knowledge",
                    "Text editor and web browser",
                ]),
                instructor: Instructor::new("Emily Rodriguez", "UI/UX Designer")
                    .with_image("instructors/emily.jpg"),
                pricing: Pricing::Free,
                student_count: 12_150,
            },
        ),
    ]
}

#[must_use]
pub fn mock_learner() -> LearnerSummary {
    LearnerSummary {
        name: "John Doe".into(),
        enrolled_courses: 3,
        completed_lessons: 12,
        learning_streak_days: 5,
        total_minutes: 240,
    }
}

#[must_use]
pub fn mock_achievements(now: DateTime<Utc>) -> Vec<Achievement> {
    vec![
        Achievement::new(
            AchievementId::new(1),
            "First Steps",
            "Complete your first lesson",
            AchievementKind::Progress,
            "🎯",
            10,
        )
        .with_requirement("Complete 1 lesson")
        .unlock(now),
        Achievement::new(
            AchievementId::new(2),
            "On a Roll",
            "Learn five days in a row",
            AchievementKind::Streak,
            "🔥",
            25,
        )
        .with_requirement("5 day streak"),
        Achievement::new(
            AchievementId::new(3),
            "Course Finisher",
            "Complete every lesson of a course",
            AchievementKind::Course,
            "🏆",
            50,
        ),
        Achievement::new(
            AchievementId::new(4),
            "Web Master",
            "Complete all HTML, CSS and JavaScript courses",
            AchievementKind::Milestone,
            "👑",
            100,
        ),
    ]
}

/// Placeholder lesson pages for every lesson in `courses`.
///
/// # Errors
///
/// Returns `StorageError` if the asset store rejects an insert.
pub fn mock_assets(courses: &[Course]) -> Result<InMemoryAssets, StorageError> {
    let assets = InMemoryAssets::new();
    for course in courses {
        for (i, lesson) in course.lessons().lessons().iter().enumerate() {
            let page = format!(
                "<html><body><h1>{}</h1><h2>Lesson {}</h2><p>{}</p></body></html>\n",
                course.title(),
                i + 1,
                course.description()
            );
            assets.insert(&course.offline_asset_path(lesson), page)?;
        }
    }
    Ok(assets)
}

/// Fill `storage` with the mock catalog, detail copy, learner profile and
/// enrollment flags (enrolled in courses 1 and 3, course 2 wishlisted).
///
/// # Errors
///
/// Returns `SeedError` if a mock entry is invalid or storage rejects a write.
pub async fn seed_mock_catalog(storage: &Storage, now: DateTime<Utc>) -> Result<(), SeedError> {
    let courses = mock_courses(now)?;
    for course in &courses {
        storage.courses.upsert_course(course).await?;
    }
    for (id, extras) in mock_extras() {
        storage.details.upsert_extras(id, extras).await?;
    }
    for id in [1, 3] {
        storage.details.set_enrolled(CourseId::new(id), true).await?;
    }
    storage.details.set_wishlisted(CourseId::new(2), true).await?;

    storage.learner.save_summary(&mock_learner()).await?;
    for achievement in mock_achievements(now) {
        storage.learner.upsert_achievement(&achievement).await?;
    }

    tracing::info!(courses = courses.len(), "seeded mock catalog");
    Ok(())
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_owned()).collect()
}
