use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Trivia category lookup row. Seeded by the migration crate and read-only
/// at the API surface.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "category")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(column_name = "type")]
    pub kind: String,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Question }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Question => Entity::has_many(super::question::Entity).into(),
        }
    }
}

impl ActiveModelBehavior for ActiveModel {}
