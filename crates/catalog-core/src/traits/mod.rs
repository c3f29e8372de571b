//! Core traits defined in `catalog-core` and implemented by other crates.

pub mod entity;
pub mod repository;

pub use entity::{Entity, EntityId};
pub use repository::Repository;
