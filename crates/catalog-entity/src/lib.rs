//! # catalog-entity
//!
//! Domain entity models for the product catalog. Every persisted struct in
//! this crate derives `Debug`, `Clone`, `Serialize`, `Deserialize` and
//! `sqlx::FromRow`, and implements [`TableMapping`] so the persistence
//! context can read and write it without per-entity SQL.

pub mod form;
pub mod mapping;
pub mod product;

pub use mapping::TableMapping;
pub use product::Product;
