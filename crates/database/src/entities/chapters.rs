use models::ChapterStatus;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chapters")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub coursework_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub content: Option<String>,
    /// Position within the coursework; not unique, ties keep creation order
    pub order: i32,
    pub status: ChapterStatus,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::courseworks::Entity",
        from = "Column::CourseworkId",
        to = "super::courseworks::Column::Id"
    )]
    Coursework,
    #[sea_orm(has_many = "super::chapter_references::Entity")]
    ChapterReferences,
}

impl Related<super::courseworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Coursework.def()
    }
}

impl Related<super::chapter_references::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChapterReferences.def()
    }
}

// Many-to-many relationship with references
impl Related<super::references::Entity> for Entity {
    fn to() -> RelationDef {
        super::chapter_references::Relation::Reference.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::chapter_references::Relation::Chapter.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
