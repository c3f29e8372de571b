//! Controller result shapes and their HTTP rendering.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Redirect, Response};
use serde::Serialize;

use super::model_state::ModelState;
use crate::error::ApiErrorResponse;

/// Outcome of a controller action.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionResult<M> {
    /// Render a named view, optionally bound to a model.
    View(ViewResult<M>),
    /// Redirect the client to another action.
    RedirectToAction(RedirectToActionResult),
    /// The addressed record does not exist.
    NotFound(NotFoundResult),
}

impl<M> ActionResult<M> {
    /// A view bound to `model`.
    pub fn view(view_name: impl Into<String>, model: M) -> Self {
        Self::View(ViewResult {
            view_name: view_name.into(),
            model: Some(model),
            model_state: ModelState::default(),
        })
    }

    /// A view with no model.
    pub fn empty_view(view_name: impl Into<String>) -> Self {
        Self::View(ViewResult {
            view_name: view_name.into(),
            model: None,
            model_state: ModelState::default(),
        })
    }

    /// A view re-rendered with the submitted model and its errors.
    pub fn invalid_view(view_name: impl Into<String>, model: M, model_state: ModelState) -> Self {
        Self::View(ViewResult {
            view_name: view_name.into(),
            model: Some(model),
            model_state,
        })
    }

    /// A redirect to `action_name`.
    pub fn redirect_to_action(action_name: impl Into<String>) -> Self {
        Self::RedirectToAction(RedirectToActionResult {
            action_name: action_name.into(),
        })
    }

    /// A 404 result.
    pub fn not_found() -> Self {
        Self::NotFound(NotFoundResult)
    }

    pub fn as_view(&self) -> Option<&ViewResult<M>> {
        match self {
            Self::View(view) => Some(view),
            _ => None,
        }
    }

    pub fn as_redirect(&self) -> Option<&RedirectToActionResult> {
        match self {
            Self::RedirectToAction(redirect) => Some(redirect),
            _ => None,
        }
    }

    pub fn as_not_found(&self) -> Option<&NotFoundResult> {
        match self {
            Self::NotFound(not_found) => Some(not_found),
            _ => None,
        }
    }
}

/// A named view and the model it is bound to.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewResult<M> {
    /// View name, e.g. `"Index"`.
    pub view_name: String,
    /// Bound model; `None` for blank forms.
    pub model: Option<M>,
    /// Validation errors to display alongside the model.
    pub model_state: ModelState,
}

/// Redirect to another action of the same controller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectToActionResult {
    /// Target action, e.g. `"Index"`.
    pub action_name: String,
}

impl RedirectToActionResult {
    /// Route path the action is served under.
    pub fn location(&self) -> String {
        match self.action_name.as_str() {
            "Index" => "/products".to_string(),
            action => format!("/products/{}", action.to_ascii_lowercase()),
        }
    }
}

/// The addressed record does not exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NotFoundResult;

impl NotFoundResult {
    /// HTTP status code this result renders as.
    pub fn status_code(&self) -> u16 {
        StatusCode::NOT_FOUND.as_u16()
    }
}

#[derive(Serialize)]
struct ViewEnvelope<'a, M> {
    view: &'a str,
    model: Option<&'a M>,
    #[serde(skip_serializing_if = "has_no_errors")]
    errors: &'a ModelState,
}

fn has_no_errors(model_state: &&ModelState) -> bool {
    model_state.is_valid()
}

impl<M: Serialize> IntoResponse for ActionResult<M> {
    fn into_response(self) -> Response {
        match self {
            Self::View(view) => {
                let envelope = ViewEnvelope {
                    view: &view.view_name,
                    model: view.model.as_ref(),
                    errors: &view.model_state,
                };
                (StatusCode::OK, Json(envelope)).into_response()
            }
            Self::RedirectToAction(redirect) => Redirect::to(&redirect.location()).into_response(),
            Self::NotFound(_) => {
                let body = ApiErrorResponse {
                    error: "NOT_FOUND".to_string(),
                    message: "The requested resource was not found".to_string(),
                    details: None,
                };
                (StatusCode::NOT_FOUND, Json(body)).into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn test_index_redirect_targets_product_list() {
        let redirect = RedirectToActionResult {
            action_name: "Index".to_string(),
        };
        assert_eq!(redirect.location(), "/products");

        let redirect = RedirectToActionResult {
            action_name: "Create".to_string(),
        };
        assert_eq!(redirect.location(), "/products/create");
    }

    #[test]
    fn test_not_found_status_code() {
        assert_eq!(NotFoundResult.status_code(), 404);
        let response = ActionResult::<()>::not_found().into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_redirect_renders_see_other() {
        let response = ActionResult::<()>::redirect_to_action("Index").into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/products");
    }

    #[test]
    fn test_view_renders_ok() {
        let response = ActionResult::view("Index", vec![1, 2, 3]).into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
