//! Lookup service: fetch reference rows through a [`LookupStore`] and reshape
//! them for clients.
//!
//! Backend failures propagate unchanged as [`LookupError::Backend`]; nothing
//! here retries or translates them.

use crate::repos::lookups::{Category, LookupError, LookupStore, StapleDefinition, Unit};

pub async fn get_all_units<S: LookupStore + ?Sized>(store: &S) -> Result<Vec<Unit>, LookupError> {
    store
        .select_units()
        .await?
        .into_iter()
        .map(Unit::try_from)
        .collect()
}

pub async fn get_all_categories<S: LookupStore + ?Sized>(
    store: &S,
) -> Result<Vec<Category>, LookupError> {
    store
        .select_categories()
        .await?
        .into_iter()
        .map(Category::try_from)
        .collect()
}

/// Active staples with their product; staples without one never appear.
pub async fn get_all_staple_definitions<S: LookupStore + ?Sized>(
    store: &S,
) -> Result<Vec<StapleDefinition>, LookupError> {
    store
        .select_active_staples_with_product()
        .await?
        .into_iter()
        .map(StapleDefinition::try_from)
        .collect()
}
