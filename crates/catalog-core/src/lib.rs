//! # catalog-core
//!
//! Core crate for the product catalog. Contains the generic repository
//! traits, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other catalog crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

#[cfg(any(test, feature = "mock"))]
pub mod testing;

pub use error::{AppError, ErrorKind};
pub use result::AppResult;
pub use traits::{Entity, EntityId, Repository};
