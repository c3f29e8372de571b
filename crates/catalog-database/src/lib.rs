//! # catalog-database
//!
//! PostgreSQL connection management, the change-tracking persistence
//! context and the generic repository built on top of it.

pub mod connection;
pub mod context;
pub mod error;
pub mod migration;
pub mod repositories;

pub use connection::DatabasePool;
pub use context::{DbContext, EntitySet, EntityState, EntryKey};
pub use repositories::{PgRepository, ProductRepository};
