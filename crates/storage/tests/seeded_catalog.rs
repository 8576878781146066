use codelearn_core::model::{CourseId, Pricing};
use codelearn_core::time::fixed_now;
use storage::repository::Storage;
use storage::seed::seed_mock_catalog;

#[tokio::test]
async fn seeded_storage_serves_catalog_and_details() {
    let storage = Storage::in_memory();
    seed_mock_catalog(&storage, fixed_now())
        .await
        .expect("seed catalog");

    let courses = storage.courses.list_courses().await.expect("list courses");
    assert_eq!(courses.len(), 4);

    let paid = storage
        .details
        .get_detail(CourseId::new(2))
        .await
        .expect("detail lookup")
        .expect("course 2 exists");
    assert_eq!(paid.instructor.name, "Mike Chen");
    assert_eq!(
        paid.pricing,
        Pricing::Paid {
            price_cents: 1_999,
            original_price_cents: 4_999
        }
    );

    let generic = storage
        .details
        .get_detail(CourseId::new(4))
        .await
        .expect("detail lookup")
        .expect("course 4 exists");
    assert_eq!(generic.instructor.name, "John Doe");

    assert!(storage.details.is_enrolled(CourseId::new(1)).await.unwrap());
    assert!(!storage.details.is_enrolled(CourseId::new(2)).await.unwrap());
    assert!(storage.details.is_wishlisted(CourseId::new(2)).await.unwrap());

    let summary = storage.learner.get_summary().await.expect("learner summary");
    assert_eq!(summary.completed_lessons, 12);

    let achievements = storage.learner.list_achievements().await.unwrap();
    assert_eq!(achievements.len(), 4);
    assert!(achievements[0].is_unlocked());
    assert!(!achievements[3].is_unlocked());
}
