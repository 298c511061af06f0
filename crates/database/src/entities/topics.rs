use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Standalone classification tag shared between coursework projects
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "topics")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::coursework_topics::Entity")]
    CourseworkTopics,
}

impl Related<super::coursework_topics::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::CourseworkTopics.def()
    }
}

// Many-to-many relationship with courseworks
impl Related<super::courseworks::Entity> for Entity {
    fn to() -> RelationDef {
        super::coursework_topics::Relation::Coursework.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::coursework_topics::Relation::Topic.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
