use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A citation that chapters can point at
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "references")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    pub authors: Option<String>,
    pub source_url: Option<String>,
    pub publication_year: Option<i32>,
    pub reference_type: String, // book, article, website, ...
    #[sea_orm(column_type = "Text", nullable)]
    pub citation_format: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::chapter_references::Entity")]
    ChapterReferences,
}

impl Related<super::chapter_references::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ChapterReferences.def()
    }
}

// Many-to-many relationship with chapters
impl Related<super::chapters::Entity> for Entity {
    fn to() -> RelationDef {
        super::chapter_references::Relation::Chapter.def()
    }

    fn via() -> Option<RelationDef> {
        Some(super::chapter_references::Relation::Reference.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
