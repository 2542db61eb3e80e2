//! Reference-data shapes served to clients and the store capability that
//! produces their rows.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::entities::{categories, products, staple_definitions, units};

#[derive(Debug, Error)]
pub enum LookupError {
    /// The backend rejected or failed the query; passed through untouched
    #[error("backend query failed: {0}")]
    Backend(#[from] DbErr),
    /// A stored row cannot be represented in the response shape
    #[error("corrupt {table} row id={id}: {detail}")]
    CorruptRow {
        table: &'static str,
        id: i64,
        detail: String,
    },
}

/// Read-only access to the reference tables.
///
/// Implementations return rows already in presentation order; callers never
/// re-sort. `select_active_staples_with_product` only yields staples whose
/// product exists.
#[async_trait]
pub trait LookupStore: Send + Sync {
    async fn select_units(&self) -> Result<Vec<units::Model>, DbErr>;

    async fn select_categories(&self) -> Result<Vec<categories::Model>, DbErr>;

    async fn select_active_staples_with_product(
        &self,
    ) -> Result<Vec<(staple_definitions::Model, products::Model)>, DbErr>;
}

/// Display text keyed by locale tag, e.g. `{"en": "Gram", "de": "Gramm"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocalizedText(pub BTreeMap<String, String>);

impl LocalizedText {
    fn from_db(value: serde_json::Value, table: &'static str, id: i64) -> Result<Self, LookupError> {
        serde_json::from_value(value)
            .map(LocalizedText)
            .map_err(|e| LookupError::CorruptRow {
                table,
                id,
                detail: format!("name is not a locale map: {e}"),
            })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitType {
    Weight,
    Volume,
    Count,
}

impl UnitType {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Weight => "weight",
            Self::Volume => "volume",
            Self::Count => "count",
        }
    }

    pub fn from_db(value: &str, unit_id: i64) -> Result<Self, LookupError> {
        match value {
            "weight" => Ok(Self::Weight),
            "volume" => Ok(Self::Volume),
            "count" => Ok(Self::Count),
            other => Err(LookupError::CorruptRow {
                table: "units",
                id: unit_id,
                detail: format!("invalid unit_type '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    pub id: i64,
    pub name: LocalizedText,
    pub abbreviation: String,
    pub unit_type: UnitType,
    pub base_unit_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: LocalizedText,
    pub display_order: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductMinimal {
    pub id: i64,
    pub name: LocalizedText,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StapleDefinition {
    pub id: i64,
    pub is_active: bool,
    pub product: ProductMinimal,
}

impl TryFrom<units::Model> for Unit {
    type Error = LookupError;

    fn try_from(model: units::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            unit_type: UnitType::from_db(&model.unit_type, model.id)?,
            name: LocalizedText::from_db(model.name, "units", model.id)?,
            id: model.id,
            abbreviation: model.abbreviation,
            base_unit_multiplier: model.base_unit_multiplier,
        })
    }
}

impl TryFrom<categories::Model> for Category {
    type Error = LookupError;

    fn try_from(model: categories::Model) -> Result<Self, Self::Error> {
        Ok(Self {
            name: LocalizedText::from_db(model.name, "categories", model.id)?,
            id: model.id,
            display_order: model.display_order,
        })
    }
}

impl TryFrom<(staple_definitions::Model, products::Model)> for StapleDefinition {
    type Error = LookupError;

    fn try_from(
        (staple, product): (staple_definitions::Model, products::Model),
    ) -> Result<Self, Self::Error> {
        Ok(Self {
            id: staple.id,
            is_active: staple.is_active,
            product: ProductMinimal {
                name: LocalizedText::from_db(product.name, "products", product.id)?,
                id: product.id,
            },
        })
    }
}
