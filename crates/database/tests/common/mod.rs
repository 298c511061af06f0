#![allow(dead_code)]

use database::{
    config::DatabaseConfig,
    db::{bootstrap, create_connection},
    entities::{accounts, courseworks, references, topics},
    services::{
        AccountService, CourseworkService, NewAccount, NewCoursework, NewReference, NewTopic,
        ReferenceService, TopicService,
    },
};
use sea_orm::DatabaseConnection;
use tempfile::TempDir;

/// A freshly provisioned database living in its own temporary directory
pub struct TestDb {
    pub db: DatabaseConnection,
    pub config: DatabaseConfig,
    _dir: TempDir,
}

pub async fn setup() -> TestDb {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("data").join("coursework.db");
    let config = DatabaseConfig {
        url: format!("sqlite://{}?mode=rwc", path.display()),
        ..DatabaseConfig::default()
    };

    let db = create_connection(&config)
        .await
        .expect("failed to connect");
    bootstrap(&db).await.expect("failed to bootstrap schema");

    TestDb {
        db,
        config,
        _dir: dir,
    }
}

pub async fn account(db: &DatabaseConnection, external_id: i64) -> accounts::Model {
    AccountService::create_account(
        db,
        NewAccount {
            external_id,
            ..NewAccount::default()
        },
    )
    .await
    .expect("failed to create account")
}

pub async fn coursework(db: &DatabaseConnection, account_id: i32, title: &str) -> courseworks::Model {
    CourseworkService::create_coursework(db, account_id, NewCoursework::titled(title))
        .await
        .expect("failed to create coursework")
}

pub async fn topic(db: &DatabaseConnection, name: &str) -> topics::Model {
    TopicService::create_topic(
        db,
        NewTopic {
            name: name.to_owned(),
            description: None,
        },
    )
    .await
    .expect("failed to create topic")
}

pub async fn reference(db: &DatabaseConnection, title: &str) -> references::Model {
    ReferenceService::create_reference(
        db,
        NewReference {
            title: title.to_owned(),
            reference_type: "book".to_owned(),
            ..NewReference::default()
        },
    )
    .await
    .expect("failed to create reference")
}
