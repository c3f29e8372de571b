//! Field-keyed validation state passed to controller actions.

use std::collections::BTreeMap;

use serde::Serialize;
use validator::{Validate, ValidationErrors};

/// Validation outcome for a bound model.
///
/// Handlers build it from the model's `validator` rules; controllers only
/// ask whether it is valid and hand it back to the view on failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ModelState {
    errors: BTreeMap<String, Vec<String>>,
}

impl ModelState {
    /// An empty, valid state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `model`'s validation rules.
    pub fn validate<T: Validate>(model: &T) -> Self {
        match model.validate() {
            Ok(()) => Self::default(),
            Err(errors) => Self::from(&errors),
        }
    }

    /// Record an error against `key`.
    pub fn add_model_error(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.errors.entry(key.into()).or_default().push(message.into());
    }

    /// Append every error recorded in `other`.
    pub fn merge(&mut self, other: ModelState) {
        for (key, messages) in other.errors {
            self.errors.entry(key).or_default().extend(messages);
        }
    }

    /// Whether no errors have been recorded.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Errors keyed by field name.
    pub fn errors(&self) -> &BTreeMap<String, Vec<String>> {
        &self.errors
    }
}

impl From<&ValidationErrors> for ModelState {
    fn from(errors: &ValidationErrors) -> Self {
        let mut state = Self::default();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                state.add_model_error(field.to_string(), message);
            }
        }
        state
    }
}
