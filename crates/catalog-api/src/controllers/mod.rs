//! MVC-style controllers.
//!
//! Controllers return an [`ActionResult`] describing what to render rather
//! than an HTTP response, which keeps them testable without a server.

pub mod action_result;
pub mod model_state;
pub mod products;

pub use action_result::{ActionResult, NotFoundResult, RedirectToActionResult, ViewResult};
pub use model_state::ModelState;
pub use products::ProductsController;
