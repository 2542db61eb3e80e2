//! Adapters for external dependencies.

pub mod lookups_sea;
pub mod users_sea;
