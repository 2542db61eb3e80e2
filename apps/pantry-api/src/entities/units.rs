use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "units")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// Localized display name, `{ "<locale>": "<text>" }`
    #[sea_orm(column_type = "JsonBinary")]
    pub name: Json,
    pub abbreviation: String,
    #[sea_orm(column_name = "unit_type")]
    pub unit_type: String,
    #[sea_orm(column_name = "base_unit_multiplier")]
    pub base_unit_multiplier: f64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
