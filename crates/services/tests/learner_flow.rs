use std::sync::Arc;

use codelearn_core::Clock;
use codelearn_core::catalog::CourseFilter;
use codelearn_core::model::{Category, CourseId, LessonId};
use codelearn_core::time::fixed_now;
use services::{AppServices, ContentError, Direction, SimulatedLatency, TokioScheduler};
use storage::seed::{mock_assets, mock_courses};

async fn seeded_services() -> AppServices {
    let courses = mock_courses(fixed_now()).unwrap();
    let assets = mock_assets(&courses).unwrap();
    AppServices::with_mock_catalog(
        Arc::new(assets),
        Arc::new(TokioScheduler::current().unwrap()),
        SimulatedLatency::none(),
        Clock::fixed(fixed_now()),
    )
    .await
    .expect("seed services")
}

#[tokio::test]
async fn browse_read_and_complete_a_course() {
    let services = seeded_services().await;

    let list = services.course_list();
    list.load().await.unwrap();
    list.set_filter(CourseFilter::Category(Category::Html));
    let state = list.state();
    let titles: Vec<&str> = state.courses.iter().map(|c| c.title()).collect();
    assert_eq!(titles, ["HTML Forms and Inputs", "HTML Fundamentals"]);

    let id = CourseId::new(1);
    let view = services.course_detail().load(id).await.unwrap();
    assert!(view.enrolled);
    assert_eq!(view.detail.formatted_student_count(), "15.4k students");

    let content = services.content();
    let first = content.open_first(id).await.unwrap();
    assert_eq!(first.path.as_str(), "content/html/01_introduction.html");
    let second = content
        .navigate(&first, Direction::Next)
        .await
        .unwrap()
        .expect("second lesson");
    assert_eq!(second.navigation.position, 2);

    let progress = services.progress();
    assert_eq!(
        progress.complete_current(id).await.unwrap(),
        Some(LessonId::parse("01_introduction.html").unwrap())
    );
    assert_eq!(
        progress.complete_current(id).await.unwrap(),
        Some(LessonId::parse("02_text_and_links.html").unwrap())
    );

    let resumed = content.open_current(id).await.unwrap();
    assert_eq!(resumed.lesson.file_name(), "02_text_and_links.html");
}

#[tokio::test]
async fn home_shows_seeded_learner() {
    let services = seeded_services().await;
    let home = services.home().load(3).await.unwrap();

    assert_eq!(home.learner.name, "John Doe");
    assert_eq!(home.learner.total_hours(), 4);
    assert_eq!(home.recent.len(), 3);
    assert_eq!(home.achievements.len(), 4);
}

#[tokio::test]
async fn search_over_filtered_catalog() {
    let services = seeded_services().await;
    let list = services.course_list();
    list.load().await.unwrap();

    list.search("fundamentals").await;
    assert_eq!(list.state().courses.len(), 3);

    list.set_filter(CourseFilter::Category(Category::Css));
    let state = list.state();
    assert_eq!(state.courses.len(), 1);
    assert_eq!(state.courses[0].title(), "CSS Fundamentals");
}

#[tokio::test]
async fn empty_asset_source_reports_not_found() {
    let services = AppServices::with_mock_catalog(
        Arc::new(storage::assets::InMemoryAssets::new()),
        Arc::new(TokioScheduler::current().unwrap()),
        SimulatedLatency::none(),
        Clock::fixed(fixed_now()),
    )
    .await
    .unwrap();

    let err = services
        .content()
        .open_first(CourseId::new(4))
        .await
        .unwrap_err();
    assert!(matches!(err, ContentError::NotFound { .. }));
    assert_eq!(
        err.to_string(),
        "content file not found: content/javascript/01_introduction.html"
    );
}
