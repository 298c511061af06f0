use crate::{
    entities::{coursework_topics, courseworks, topics},
    error::StoreError,
    services::{
        account::AccountService,
        cascade::{self, DeleteSummary},
        fields::{self, SHORT_TEXT},
        topic::TopicService,
    },
};
use log::{debug, info};
use models::{CourseworkStatus, Progress};
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
    prelude::DateTime,
    sea_query::OnConflict,
};

/// Fields accepted when a coursework is created
#[derive(Debug, Clone, Default)]
pub struct NewCoursework {
    pub title: String,
    pub description: Option<String>,
    pub status: CourseworkStatus,
    pub progress_percentage: i32,
    pub deadline: Option<DateTime>,
}

impl NewCoursework {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }
}

/// Editable descriptive fields; `None` keeps the stored value
#[derive(Debug, Clone, Default)]
pub struct CourseworkDetails {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub deadline: Option<Option<DateTime>>,
}

pub struct CourseworkService;

impl CourseworkService {
    /// Creates a coursework owned by `account_id`
    pub async fn create_coursework(
        db: &DatabaseConnection,
        account_id: i32,
        new_coursework: NewCoursework,
    ) -> Result<courseworks::Model, StoreError> {
        Self::create_coursework_with_topics(db, account_id, new_coursework, &[]).await
    }

    /// Creates a coursework and links it to existing topics in one transaction
    ///
    /// If any topic is missing nothing is written.
    pub async fn create_coursework_with_topics(
        db: &DatabaseConnection,
        account_id: i32,
        new_coursework: NewCoursework,
        topic_ids: &[i32],
    ) -> Result<courseworks::Model, StoreError> {
        let active = Self::to_active_model(account_id, new_coursework)?;

        let txn = db.begin().await?;
        AccountService::require(&txn, account_id).await?;

        let coursework = active.insert(&txn).await?;
        for &topic_id in topic_ids {
            TopicService::require(&txn, topic_id).await?;
            Self::insert_topic_link(&txn, coursework.id, topic_id).await?;
        }

        txn.commit().await?;

        info!(
            "Created coursework {} for account {account_id} with {} topics",
            coursework.id,
            topic_ids.len()
        );
        Ok(coursework)
    }

    fn to_active_model(
        account_id: i32,
        new_coursework: NewCoursework,
    ) -> Result<courseworks::ActiveModel, StoreError> {
        let title = fields::required("title", new_coursework.title, SHORT_TEXT)?;
        let description = fields::optional("description", new_coursework.description, None)?;
        let progress = Progress::new(new_coursework.progress_percentage)?;
        let now = fields::now();

        Ok(courseworks::ActiveModel {
            id: NotSet,
            account_id: Set(account_id),
            title: Set(title),
            description: Set(description),
            status: Set(new_coursework.status),
            progress_percentage: Set(progress.value()),
            deadline: Set(new_coursework.deadline),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }

    pub async fn get_coursework(
        db: &DatabaseConnection,
        coursework_id: i32,
    ) -> Result<courseworks::Model, StoreError> {
        Self::require(db, coursework_id).await
    }

    /// Lists an account's courseworks in creation order
    pub async fn list_courseworks_for_account(
        db: &DatabaseConnection,
        account_id: i32,
    ) -> Result<Vec<courseworks::Model>, StoreError> {
        AccountService::require(db, account_id).await?;

        let courseworks = courseworks::Entity::find()
            .filter(courseworks::Column::AccountId.eq(account_id))
            .order_by_asc(courseworks::Column::Id)
            .all(db)
            .await?;
        Ok(courseworks)
    }

    pub async fn update_coursework_status(
        db: &DatabaseConnection,
        coursework_id: i32,
        status: CourseworkStatus,
    ) -> Result<courseworks::Model, StoreError> {
        let coursework = Self::require(db, coursework_id).await?;
        let previous = coursework.updated_at;
        let mut active: courseworks::ActiveModel = coursework.into();

        active.status = Set(status);
        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    /// Sets the completion percentage; values outside 0..=100 are rejected before any write
    pub async fn update_coursework_progress(
        db: &DatabaseConnection,
        coursework_id: i32,
        progress_percentage: i32,
    ) -> Result<courseworks::Model, StoreError> {
        let progress = Progress::new(progress_percentage)?;

        let coursework = Self::require(db, coursework_id).await?;
        let previous = coursework.updated_at;
        let mut active: courseworks::ActiveModel = coursework.into();

        active.progress_percentage = Set(progress.value());
        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    pub async fn update_coursework_details(
        db: &DatabaseConnection,
        coursework_id: i32,
        details: CourseworkDetails,
    ) -> Result<courseworks::Model, StoreError> {
        let title = details
            .title
            .map(|title| fields::required("title", title, SHORT_TEXT))
            .transpose()?;
        let description = details
            .description
            .map(|description| fields::optional("description", description, None))
            .transpose()?;

        let coursework = Self::require(db, coursework_id).await?;
        let previous = coursework.updated_at;
        let mut active: courseworks::ActiveModel = coursework.into();

        if let Some(title) = title {
            active.title = Set(title);
        }
        if let Some(description) = description {
            active.description = Set(description);
        }
        if let Some(deadline) = details.deadline {
            active.deadline = Set(deadline);
        }

        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    /// Links a topic to a coursework; returns `false` if the link already existed
    pub async fn add_topic_to_coursework(
        db: &DatabaseConnection,
        coursework_id: i32,
        topic_id: i32,
    ) -> Result<bool, StoreError> {
        let txn = db.begin().await?;
        Self::require(&txn, coursework_id).await?;
        TopicService::require(&txn, topic_id).await?;

        let created = Self::insert_topic_link(&txn, coursework_id, topic_id).await?;
        txn.commit().await?;

        if !created {
            debug!("Topic {topic_id} already linked to coursework {coursework_id}");
        }
        Ok(created)
    }

    async fn insert_topic_link<C>(
        db: &C,
        coursework_id: i32,
        topic_id: i32,
    ) -> Result<bool, StoreError>
    where
        C: ConnectionTrait,
    {
        let link = coursework_topics::ActiveModel {
            coursework_id: Set(coursework_id),
            topic_id: Set(topic_id),
        };

        let inserted = coursework_topics::Entity::insert(link)
            .on_conflict(
                OnConflict::columns([
                    coursework_topics::Column::CourseworkId,
                    coursework_topics::Column::TopicId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .exec_without_returning(db)
            .await?;
        Ok(inserted > 0)
    }

    /// Removes the link row only; returns `false` if there was nothing to remove
    pub async fn remove_topic_from_coursework(
        db: &DatabaseConnection,
        coursework_id: i32,
        topic_id: i32,
    ) -> Result<bool, StoreError> {
        let removed = coursework_topics::Entity::delete_many()
            .filter(coursework_topics::Column::CourseworkId.eq(coursework_id))
            .filter(coursework_topics::Column::TopicId.eq(topic_id))
            .exec(db)
            .await?
            .rows_affected;

        if removed == 0 {
            debug!("Topic {topic_id} was not linked to coursework {coursework_id}");
        }
        Ok(removed > 0)
    }

    /// Lists the topics linked to a coursework, sorted by name
    pub async fn list_topics_for_coursework(
        db: &DatabaseConnection,
        coursework_id: i32,
    ) -> Result<Vec<topics::Model>, StoreError> {
        let coursework = Self::require(db, coursework_id).await?;

        let topics = coursework
            .find_related(topics::Entity)
            .order_by_asc(topics::Column::Name)
            .all(db)
            .await?;
        Ok(topics)
    }

    /// Deletes a coursework with its chapters and all of their link rows
    pub async fn delete_coursework(
        db: &DatabaseConnection,
        coursework_id: i32,
    ) -> Result<DeleteSummary, StoreError> {
        let txn = db.begin().await?;
        Self::require(&txn, coursework_id).await?;

        let mut summary = DeleteSummary::default();
        cascade::delete_courseworks(&txn, vec![coursework_id], &mut summary).await?;
        txn.commit().await?;

        info!(
            "Deleted coursework {coursework_id} with {} chapters",
            summary.chapters
        );
        Ok(summary)
    }

    pub(crate) async fn require<C>(
        db: &C,
        coursework_id: i32,
    ) -> Result<courseworks::Model, StoreError>
    where
        C: ConnectionTrait,
    {
        courseworks::Entity::find_by_id(coursework_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("coursework", coursework_id))
    }
}
