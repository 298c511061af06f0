use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A person using the assistant, identified by the front-end's own user id
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub external_id: i64,
    #[sea_orm(unique)]
    pub handle: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[sea_orm(unique)]
    pub email: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::courseworks::Entity")]
    Courseworks,
}

impl Related<super::courseworks::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Courseworks.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
