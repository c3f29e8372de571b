//! Product route handlers.
//!
//! Each handler extracts the route id and form body, binds the form into a
//! product and its [`ModelState`](crate::controllers::ModelState) and
//! delegates to [`ProductsController`](crate::ProductsController).

use axum::Form;
use axum::extract::{Path, State};

use catalog_core::traits::EntityId;
use catalog_entity::Product;

use crate::controllers::ActionResult;
use crate::error::ApiResult;
use crate::forms::ProductForm;
use crate::state::AppState;

type ProductResult = ApiResult<ActionResult<Product>>;

/// GET / and GET /products
pub async fn index(State(state): State<AppState>) -> ApiResult<ActionResult<Vec<Product>>> {
    Ok(state.products.index().await?)
}

/// GET /products/details/{id}
pub async fn details(State(state): State<AppState>, Path(id): Path<EntityId>) -> ProductResult {
    Ok(state.products.details(Some(id)).await?)
}

/// GET /products/details
pub async fn details_without_id(State(state): State<AppState>) -> ProductResult {
    Ok(state.products.details(None).await?)
}

/// GET /products/create
pub async fn create_form(State(state): State<AppState>) -> ActionResult<Product> {
    state.products.create_form()
}

/// POST /products/create
pub async fn create(State(state): State<AppState>, Form(form): Form<ProductForm>) -> ProductResult {
    let (product, model_state) = form.bind(None);
    Ok(state.products.create(product, &model_state).await?)
}

/// GET /products/edit/{id}
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<EntityId>) -> ProductResult {
    Ok(state.products.edit_form(Some(id)).await?)
}

/// GET /products/edit
pub async fn edit_form_without_id(State(state): State<AppState>) -> ProductResult {
    Ok(state.products.edit_form(None).await?)
}

/// POST /products/edit/{id}
pub async fn edit(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
    Form(form): Form<ProductForm>,
) -> ProductResult {
    let (product, model_state) = form.bind(Some(id));
    Ok(state.products.edit(id, product, &model_state).await?)
}

/// GET /products/delete/{id}
pub async fn delete_form(State(state): State<AppState>, Path(id): Path<EntityId>) -> ProductResult {
    Ok(state.products.delete_form(Some(id)).await?)
}

/// GET /products/delete
pub async fn delete_form_without_id(State(state): State<AppState>) -> ProductResult {
    Ok(state.products.delete_form(None).await?)
}

/// POST /products/delete/{id}
pub async fn delete_confirmed(
    State(state): State<AppState>,
    Path(id): Path<EntityId>,
) -> ProductResult {
    Ok(state.products.delete_confirmed(id).await?)
}
