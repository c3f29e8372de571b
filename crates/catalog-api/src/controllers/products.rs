//! Products controller: Index, Details, Create, Edit and Delete actions.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use catalog_core::result::AppResult;
use catalog_core::traits::{EntityId, Repository};
use catalog_entity::Product;

use super::action_result::ActionResult;
use super::model_state::ModelState;

/// Action name every successful write redirects to.
pub const INDEX: &str = "Index";

/// Stateless CRUD controller over the product repository.
///
/// Each action is a single read or write against the repository; storage
/// errors propagate to the caller untouched.
pub struct ProductsController {
    repository: Arc<dyn Repository<Product>>,
}

impl fmt::Debug for ProductsController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProductsController").finish_non_exhaustive()
    }
}

impl ProductsController {
    /// Create a controller over `repository`.
    pub fn new(repository: Arc<dyn Repository<Product>>) -> Self {
        Self { repository }
    }

    /// GET Index: every product.
    pub async fn index(&self) -> AppResult<ActionResult<Vec<Product>>> {
        let products = self.repository.get_all().await?;
        debug!(count = products.len(), "Listing products");
        Ok(ActionResult::view("Index", products))
    }

    /// GET Details. A missing id redirects to Index.
    pub async fn details(&self, id: Option<EntityId>) -> AppResult<ActionResult<Product>> {
        let Some(id) = id else {
            return Ok(ActionResult::redirect_to_action(INDEX));
        };
        self.find_view("Details", id).await
    }

    /// GET Create: blank form.
    pub fn create_form(&self) -> ActionResult<Product> {
        ActionResult::empty_view("Create")
    }

    /// POST Create.
    pub async fn create(
        &self,
        mut product: Product,
        model_state: &ModelState,
    ) -> AppResult<ActionResult<Product>> {
        if !model_state.is_valid() {
            warn!(errors = ?model_state.errors(), "Rejected product create");
            return Ok(ActionResult::invalid_view("Create", product, model_state.clone()));
        }

        self.repository.create(&mut product).await?;
        info!(id = product.id, name = ?product.name, "Product created");
        Ok(ActionResult::redirect_to_action(INDEX))
    }

    /// GET Edit. A missing id is NotFound.
    pub async fn edit_form(&self, id: Option<EntityId>) -> AppResult<ActionResult<Product>> {
        let Some(id) = id else {
            return Ok(ActionResult::not_found());
        };
        self.find_view("Edit", id).await
    }

    /// POST Edit. The route id must match the submitted product's id.
    pub async fn edit(
        &self,
        id: EntityId,
        product: Product,
        model_state: &ModelState,
    ) -> AppResult<ActionResult<Product>> {
        if id != product.id {
            warn!(route_id = id, product_id = product.id, "Product id mismatch on edit");
            return Ok(ActionResult::not_found());
        }

        if !model_state.is_valid() {
            warn!(id, errors = ?model_state.errors(), "Rejected product edit");
            return Ok(ActionResult::invalid_view("Edit", product, model_state.clone()));
        }

        self.repository.update(&product).await?;
        info!(id, "Product updated");
        Ok(ActionResult::redirect_to_action(INDEX))
    }

    /// GET Delete: confirmation page. A missing id is NotFound.
    pub async fn delete_form(&self, id: Option<EntityId>) -> AppResult<ActionResult<Product>> {
        let Some(id) = id else {
            return Ok(ActionResult::not_found());
        };
        self.find_view("Delete", id).await
    }

    /// POST Delete. Always redirects to Index; an unknown id deletes nothing.
    pub async fn delete_confirmed(&self, id: EntityId) -> AppResult<ActionResult<Product>> {
        match self.repository.get_by_id(id).await? {
            Some(product) => {
                self.repository.delete(&product).await?;
                info!(id, "Product deleted");
            }
            None => warn!(id, "Delete requested for missing product"),
        }
        Ok(ActionResult::redirect_to_action(INDEX))
    }

    async fn find_view(&self, view_name: &str, id: EntityId) -> AppResult<ActionResult<Product>> {
        match self.repository.get_by_id(id).await? {
            Some(product) => Ok(ActionResult::view(view_name, product)),
            None => {
                warn!(id, view = view_name, "Product not found");
                Ok(ActionResult::not_found())
            }
        }
    }
}
