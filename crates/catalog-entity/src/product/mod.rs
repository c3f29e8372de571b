//! Product domain entity.

pub mod model;
pub mod validation;

pub use model::Product;
