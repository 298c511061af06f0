use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Junction table for many-to-many relationship between chapters and references
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "chapter_references")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub chapter_id: i32,
    #[sea_orm(primary_key, auto_increment = false)]
    pub reference_id: i32,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::chapters::Entity",
        from = "Column::ChapterId",
        to = "super::chapters::Column::Id"
    )]
    Chapter,
    #[sea_orm(
        belongs_to = "super::references::Entity",
        from = "Column::ReferenceId",
        to = "super::references::Column::Id"
    )]
    Reference,
}

impl Related<super::chapters::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Chapter.def()
    }
}

impl Related<super::references::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reference.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
