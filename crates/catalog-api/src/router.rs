//! Route definitions for the catalog HTTP surface.

use axum::Router;
use axum::routing::get;

use crate::handlers::{health, products};
use crate::state::AppState;

/// Build the router with every route, threading `state` through handlers.
///
/// Middleware is applied separately by [`build_app`](crate::app::build_app).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(product_routes())
        .merge(health_routes())
        .with_state(state)
}

/// Index, Details, Create, Edit and Delete.
fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/products", get(products::index))
        .route("/products/index", get(products::index))
        .route("/products/details", get(products::details_without_id))
        .route("/products/details/{id}", get(products::details))
        .route(
            "/products/create",
            get(products::create_form).post(products::create),
        )
        .route("/products/edit", get(products::edit_form_without_id))
        .route(
            "/products/edit/{id}",
            get(products::edit_form).post(products::edit),
        )
        .route("/products/delete", get(products::delete_form_without_id))
        .route(
            "/products/delete/{id}",
            get(products::delete_form).post(products::delete_confirmed),
        )
}

fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health))
}
