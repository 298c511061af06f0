use models::CourseworkStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "courseworks")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub account_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub status: CourseworkStatus,
    pub progress_percentage: i32, // 0..=100, enforced by a CHECK constraint
    pub deadline: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::accounts::Entity",
        from = "Column::AccountId",
        to = "super::accounts::Column::Id"
    )]
    Account,
    #[sea_orm(has_many = "super::chapters::Entity")]
    Chapters,
    #[sea_orm(has_many = "super::coursework_topics::Entity")]
    CourseworkTopics,
}

impl Related<super::accounts::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Account.def()
    }
}

impl Related<super::chapters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chapters.def()
    }
}

impl Related<super::coursework_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseworkTopics.def()
    }
}

// Many-to-many relationship with topics
impl Related<super::topics::Entity> for Entity {
    fn to() -> RelationDef {
        super::coursework_topics::Relation::Topic.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coursework_topics::Relation::Coursework.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
