mod common;

use database::{
    StoreError,
    entities::{coursework_topics, courseworks, topics},
    services::{CourseworkDetails, CourseworkService, NewCoursework, TopicService},
};
use models::CourseworkStatus;
use sea_orm::{ConnectionTrait, EntityTrait, PaginatorTrait};

#[tokio::test]
async fn created_coursework_reads_back_with_defaults() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;

    let created = CourseworkService::create_coursework(
        &t.db,
        account.id,
        NewCoursework {
            title: "Thesis".to_owned(),
            status: CourseworkStatus::Draft,
            ..NewCoursework::default()
        },
    )
    .await
    .unwrap();

    let stored = CourseworkService::get_coursework(&t.db, created.id)
        .await
        .unwrap();
    assert_eq!(stored.title, "Thesis");
    assert_eq!(stored.account_id, account.id);
    assert_eq!(stored.status, CourseworkStatus::Draft);
    assert_eq!(stored.progress_percentage, 0);
    assert_eq!(stored.description, None);
    assert_eq!(stored.deadline, None);
    assert_eq!(stored.created_at, stored.updated_at);
}

#[tokio::test]
async fn coursework_for_unknown_account_is_not_found() {
    let t = common::setup().await;

    let err = CourseworkService::create_coursework(&t.db, 404, NewCoursework::titled("Orphan"))
        .await
        .unwrap_err();

    assert!(err.is_not_found(), "got {err:?}");
    assert_eq!(courseworks::Entity::find().count(&t.db).await.unwrap(), 0);
}

#[tokio::test]
async fn blank_title_and_bad_progress_are_rejected() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;

    let err = CourseworkService::create_coursework(&t.db, account.id, NewCoursework::titled("  "))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let err = CourseworkService::create_coursework(
        &t.db,
        account.id,
        NewCoursework {
            title: "Essay".to_owned(),
            progress_percentage: 150,
            ..NewCoursework::default()
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    assert_eq!(courseworks::Entity::find().count(&t.db).await.unwrap(), 0);
}

#[tokio::test]
async fn status_updates_advance_updated_at() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let coursework = common::coursework(&t.db, account.id, "Thesis").await;

    let updated =
        CourseworkService::update_coursework_status(&t.db, coursework.id, CourseworkStatus::InProgress)
            .await
            .unwrap();
    assert_eq!(updated.status, CourseworkStatus::InProgress);
    assert_eq!(updated.created_at, coursework.created_at);
    assert!(updated.updated_at > coursework.updated_at);

    let again =
        CourseworkService::update_coursework_status(&t.db, coursework.id, CourseworkStatus::Completed)
            .await
            .unwrap();
    assert!(again.updated_at > updated.updated_at);

    let err = CourseworkService::update_coursework_status(&t.db, 999, CourseworkStatus::Completed)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn progress_outside_range_leaves_stored_value_unchanged() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let coursework = common::coursework(&t.db, account.id, "Thesis").await;

    let updated = CourseworkService::update_coursework_progress(&t.db, coursework.id, 40)
        .await
        .unwrap();
    assert_eq!(updated.progress_percentage, 40);

    for bad in [101, -1] {
        let err = CourseworkService::update_coursework_progress(&t.db, coursework.id, bad)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Validation(_)), "got {err:?}");
    }

    let stored = CourseworkService::get_coursework(&t.db, coursework.id)
        .await
        .unwrap();
    assert_eq!(stored.progress_percentage, 40);
    assert_eq!(stored.updated_at, updated.updated_at);
}

#[tokio::test]
async fn schema_rejects_raw_writes_that_break_invariants() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let coursework = common::coursework(&t.db, account.id, "Thesis").await;

    let statements = [
        format!(
            "UPDATE courseworks SET progress_percentage = 101 WHERE id = {}",
            coursework.id
        ),
        format!(
            "UPDATE courseworks SET status = 'archived' WHERE id = {}",
            coursework.id
        ),
    ];

    for sql in statements {
        let err = t.db.execute_unprepared(&sql).await.unwrap_err();
        let err = StoreError::from(err);
        assert!(matches!(err, StoreError::Validation(_)), "got {err:?}");
    }

    let stored = CourseworkService::get_coursework(&t.db, coursework.id)
        .await
        .unwrap();
    assert_eq!(stored, coursework);
}

#[tokio::test]
async fn details_update_can_set_and_clear_fields() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let coursework = common::coursework(&t.db, account.id, "Thesis").await;
    let deadline = chrono::NaiveDate::from_ymd_opt(2026, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    let updated = CourseworkService::update_coursework_details(
        &t.db,
        coursework.id,
        CourseworkDetails {
            title: Some("Master's thesis".to_owned()),
            description: Some(Some("On caching".to_owned())),
            deadline: Some(Some(deadline)),
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.title, "Master's thesis");
    assert_eq!(updated.description.as_deref(), Some("On caching"));
    assert_eq!(updated.deadline, Some(deadline));

    let cleared = CourseworkService::update_coursework_details(
        &t.db,
        coursework.id,
        CourseworkDetails {
            description: Some(None),
            deadline: Some(None),
            ..CourseworkDetails::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(cleared.title, "Master's thesis");
    assert_eq!(cleared.description, None);
    assert_eq!(cleared.deadline, None);
}

#[tokio::test]
async fn listing_courseworks_distinguishes_empty_from_missing() {
    let t = common::setup().await;
    let busy = common::account(&t.db, 1).await;
    let idle = common::account(&t.db, 2).await;
    let first = common::coursework(&t.db, busy.id, "First").await;
    let second = common::coursework(&t.db, busy.id, "Second").await;

    let listed = CourseworkService::list_courseworks_for_account(&t.db, busy.id)
        .await
        .unwrap();
    assert_eq!(listed, vec![first, second]);

    let empty = CourseworkService::list_courseworks_for_account(&t.db, idle.id)
        .await
        .unwrap();
    assert!(empty.is_empty());

    let err = CourseworkService::list_courseworks_for_account(&t.db, 999)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn adding_the_same_topic_twice_keeps_one_link() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let coursework = common::coursework(&t.db, account.id, "Thesis").await;
    let topic = common::topic(&t.db, "Databases").await;

    assert!(
        CourseworkService::add_topic_to_coursework(&t.db, coursework.id, topic.id)
            .await
            .unwrap()
    );
    assert!(
        !CourseworkService::add_topic_to_coursework(&t.db, coursework.id, topic.id)
            .await
            .unwrap()
    );

    assert_eq!(
        coursework_topics::Entity::find().count(&t.db).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn topic_links_require_both_sides() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let coursework = common::coursework(&t.db, account.id, "Thesis").await;
    let topic = common::topic(&t.db, "Databases").await;

    let err = CourseworkService::add_topic_to_coursework(&t.db, coursework.id, 999)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = CourseworkService::add_topic_to_coursework(&t.db, 999, topic.id)
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    assert_eq!(
        coursework_topics::Entity::find().count(&t.db).await.unwrap(),
        0
    );
}

#[tokio::test]
async fn removing_a_topic_only_drops_the_link() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let coursework = common::coursework(&t.db, account.id, "Thesis").await;
    let topic = common::topic(&t.db, "Databases").await;

    CourseworkService::add_topic_to_coursework(&t.db, coursework.id, topic.id)
        .await
        .unwrap();

    assert!(
        CourseworkService::remove_topic_from_coursework(&t.db, coursework.id, topic.id)
            .await
            .unwrap()
    );
    // Second removal is a no-op
    assert!(
        !CourseworkService::remove_topic_from_coursework(&t.db, coursework.id, topic.id)
            .await
            .unwrap()
    );

    assert!(TopicService::get_topic(&t.db, topic.id).await.is_ok());
    assert!(
        CourseworkService::get_coursework(&t.db, coursework.id)
            .await
            .is_ok()
    );
    assert!(
        CourseworkService::list_topics_for_coursework(&t.db, coursework.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn topics_for_coursework_are_sorted_by_name() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let coursework = common::coursework(&t.db, account.id, "Thesis").await;
    let zebra = common::topic(&t.db, "Zoology").await;
    let alpha = common::topic(&t.db, "Algorithms").await;
    common::topic(&t.db, "Unlinked").await;

    for topic in [&zebra, &alpha] {
        CourseworkService::add_topic_to_coursework(&t.db, coursework.id, topic.id)
            .await
            .unwrap();
    }

    let names: Vec<String> = CourseworkService::list_topics_for_coursework(&t.db, coursework.id)
        .await
        .unwrap()
        .into_iter()
        .map(|topic| topic.name)
        .collect();
    assert_eq!(names, ["Algorithms", "Zoology"]);

    let err = CourseworkService::list_topics_for_coursework(&t.db, 999)
        .await
        .unwrap_err();
    assert!(err.is_not_found());
}

#[tokio::test]
async fn create_with_topics_is_atomic() {
    let t = common::setup().await;
    let account = common::account(&t.db, 1).await;
    let topic = common::topic(&t.db, "Databases").await;

    let err = CourseworkService::create_coursework_with_topics(
        &t.db,
        account.id,
        NewCoursework::titled("Thesis"),
        &[topic.id, 999],
    )
    .await
    .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(courseworks::Entity::find().count(&t.db).await.unwrap(), 0);
    assert_eq!(
        coursework_topics::Entity::find().count(&t.db).await.unwrap(),
        0
    );

    let coursework = CourseworkService::create_coursework_with_topics(
        &t.db,
        account.id,
        NewCoursework::titled("Thesis"),
        &[topic.id, topic.id],
    )
    .await
    .unwrap();
    let linked = CourseworkService::list_topics_for_coursework(&t.db, coursework.id)
        .await
        .unwrap();
    assert_eq!(linked, vec![topic]);
    assert_eq!(topics::Entity::find().count(&t.db).await.unwrap(), 1);
}
