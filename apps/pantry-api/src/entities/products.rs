use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Catalog product, reduced to the columns this service reads.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(column_type = "JsonBinary")]
    pub name: Json,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::staple_definitions::Entity")]
    StapleDefinitions,
}

impl Related<super::staple_definitions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StapleDefinitions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
