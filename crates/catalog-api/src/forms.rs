//! Binding of submitted HTML forms.
//!
//! Forms arrive as raw strings so that input which does not parse becomes a
//! model error on the re-rendered view instead of a rejected request.

use std::str::FromStr;

use serde::Deserialize;

use catalog_core::traits::EntityId;
use catalog_entity::Product;
use catalog_entity::form::parse_field;

use crate::controllers::ModelState;

/// Raw fields of the product create and edit forms.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductForm {
    pub id: Option<String>,
    pub name: Option<String>,
    pub price: Option<String>,
    pub stock: Option<String>,
    pub color: Option<String>,
}

impl ProductForm {
    /// Bind into a [`Product`] and the [`ModelState`] describing it.
    ///
    /// The state carries parse failures followed by the product's validation
    /// rules. `route_id` supplies the identity when the form has none.
    pub fn bind(&self, route_id: Option<EntityId>) -> (Product, ModelState) {
        let mut state = ModelState::new();

        let id = field::<EntityId>(&mut state, "id", &self.id);
        let product = Product {
            id: id.or(route_id).unwrap_or_default(),
            name: field(&mut state, "name", &self.name),
            price: field(&mut state, "price", &self.price),
            stock: field(&mut state, "stock", &self.stock),
            color: field(&mut state, "color", &self.color),
        };

        state.merge(ModelState::validate(&product));
        (product, state)
    }
}

fn field<T: FromStr>(state: &mut ModelState, name: &str, raw: &Option<String>) -> Option<T> {
    match parse_field(name, raw.as_deref()) {
        Ok(value) => value,
        Err(err) => {
            state.add_model_error(name, err.message);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn form(price: &str, stock: &str) -> ProductForm {
        ProductForm {
            name: Some("Eraser".to_string()),
            price: Some(price.to_string()),
            stock: Some(stock.to_string()),
            ..ProductForm::default()
        }
    }

    #[test]
    fn test_well_formed_input_binds_cleanly() {
        let (product, state) = form("2.50", "100").bind(None);

        assert!(state.is_valid());
        assert_eq!(product.id, 0);
        assert_eq!(product.name.as_deref(), Some("Eraser"));
        assert_eq!(product.price, Some(Decimal::new(250, 2)));
        assert_eq!(product.stock, Some(100));
        assert_eq!(product.color, None);
    }

    #[test]
    fn test_unparsable_fields_become_model_errors() {
        let (product, state) = form("abc", "lots").bind(None);

        assert!(!state.is_valid());
        assert_eq!(
            state.errors()["price"],
            vec!["The value 'abc' is not valid for price.".to_string()]
        );
        assert_eq!(
            state.errors()["stock"],
            vec!["The value 'lots' is not valid for stock.".to_string()]
        );
        assert_eq!(product.price, None);
        assert_eq!(product.name.as_deref(), Some("Eraser"));
    }

    #[test]
    fn test_validation_rules_run_after_parsing() {
        let (_, state) = form("1.999", "1").bind(None);
        assert_eq!(state.errors().keys().collect::<Vec<_>>(), vec!["price"]);
    }

    #[test]
    fn test_route_id_fills_missing_identity() {
        let (product, state) = form("1", "1").bind(Some(7));

        assert!(state.is_valid());
        assert_eq!(product.id, 7);
    }

    #[test]
    fn test_submitted_identity_wins_over_route_id() {
        let mut submitted = form("1", "1");
        submitted.id = Some("3".to_string());

        let (product, _) = submitted.bind(Some(7));
        assert_eq!(product.id, 3);
    }
}
