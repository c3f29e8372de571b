//! # catalog-api
//!
//! HTTP layer for the product catalog built on Axum.
//!
//! The [`ProductsController`] holds the action logic and depends only on
//! the repository trait; handlers adapt it to routes, forms and responses.

pub mod app;
pub mod controllers;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::{build_app, run_server};
pub use controllers::ProductsController;
pub use state::AppState;
