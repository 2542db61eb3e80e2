//! Repository traits and shapes for the domain layer.

pub mod lookups;
