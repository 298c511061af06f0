use crate::{
    entities::{coursework_topics, courseworks, topics},
    error::StoreError,
    services::{
        cascade::DeleteSummary,
        fields::{self, SHORT_TEXT},
    },
};
use log::info;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, TransactionTrait,
};

#[derive(Debug, Clone, Default)]
pub struct NewTopic {
    pub name: String,
    pub description: Option<String>,
}

pub struct TopicService;

impl TopicService {
    /// Creates a topic; fails with `Conflict` if the name is taken
    pub async fn create_topic(
        db: &DatabaseConnection,
        new_topic: NewTopic,
    ) -> Result<topics::Model, StoreError> {
        let name = fields::required("name", new_topic.name, SHORT_TEXT)?;
        let description = fields::optional("description", new_topic.description, None)?;
        let now = fields::now();

        let topic = topics::ActiveModel {
            id: NotSet,
            name: Set(name),
            description: Set(description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await?;

        info!("Created topic {} '{}'", topic.id, topic.name);
        Ok(topic)
    }

    pub async fn get_topic(
        db: &DatabaseConnection,
        topic_id: i32,
    ) -> Result<topics::Model, StoreError> {
        Self::require(db, topic_id).await
    }

    pub async fn find_topic_by_name(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<Option<topics::Model>, StoreError> {
        let topic = topics::Entity::find()
            .filter(topics::Column::Name.eq(name.trim()))
            .one(db)
            .await?;
        Ok(topic)
    }

    /// Returns the topic called `name`, creating it if needed
    pub async fn get_or_create_topic(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<topics::Model, StoreError> {
        if let Some(topic) = Self::find_topic_by_name(db, name).await? {
            return Ok(topic);
        }

        let new_topic = NewTopic {
            name: name.to_owned(),
            description: None,
        };
        match Self::create_topic(db, new_topic).await {
            Err(err) if err.is_conflict() => {
                Self::find_topic_by_name(db, name).await?.ok_or(err)
            }
            result => result,
        }
    }

    pub async fn list_topics(db: &DatabaseConnection) -> Result<Vec<topics::Model>, StoreError> {
        let topics = topics::Entity::find()
            .order_by_asc(topics::Column::Name)
            .all(db)
            .await?;
        Ok(topics)
    }

    pub async fn update_topic_description(
        db: &DatabaseConnection,
        topic_id: i32,
        description: Option<String>,
    ) -> Result<topics::Model, StoreError> {
        let description = fields::optional("description", description, None)?;

        let topic = Self::require(db, topic_id).await?;
        let previous = topic.updated_at;
        let mut active: topics::ActiveModel = topic.into();

        active.description = Set(description);
        active.updated_at = Set(fields::touched(previous));
        Ok(active.update(db).await?)
    }

    /// Lists the courseworks tagged with a topic, in creation order
    pub async fn list_courseworks_for_topic(
        db: &DatabaseConnection,
        topic_id: i32,
    ) -> Result<Vec<courseworks::Model>, StoreError> {
        let topic = Self::require(db, topic_id).await?;

        let courseworks = topic
            .find_related(courseworks::Entity)
            .order_by_asc(courseworks::Column::Id)
            .all(db)
            .await?;
        Ok(courseworks)
    }

    /// Deletes a topic and its links; linked courseworks are left alone
    pub async fn delete_topic(
        db: &DatabaseConnection,
        topic_id: i32,
    ) -> Result<DeleteSummary, StoreError> {
        let txn = db.begin().await?;
        Self::require(&txn, topic_id).await?;

        let topic_links = coursework_topics::Entity::delete_many()
            .filter(coursework_topics::Column::TopicId.eq(topic_id))
            .exec(&txn)
            .await?
            .rows_affected;
        let topics = topics::Entity::delete_by_id(topic_id)
            .exec(&txn)
            .await?
            .rows_affected;

        txn.commit().await?;

        info!("Deleted topic {topic_id}, unlinked from {topic_links} courseworks");
        Ok(DeleteSummary {
            topics,
            topic_links,
            ..DeleteSummary::default()
        })
    }

    pub(crate) async fn require<C>(db: &C, topic_id: i32) -> Result<topics::Model, StoreError>
    where
        C: ConnectionTrait,
    {
        topics::Entity::find_by_id(topic_id)
            .one(db)
            .await?
            .ok_or_else(|| StoreError::not_found("topic", topic_id))
    }
}
