//! Product entity model.

use catalog_core::{Entity, EntityId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::validation::validate_price;
use crate::mapping::{PgQuery, TableMapping};

/// A catalog product (table `product`).
///
/// Every scalar besides the identity is optional; `None` is stored as
/// `NULL` and is distinct from an empty string or zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Product {
    /// Store-assigned identity; `0` until the product is created.
    #[serde(default)]
    pub id: EntityId,
    /// Display name.
    #[serde(default)]
    #[validate(length(max = 50, message = "Name must be at most 50 characters"))]
    pub name: Option<String>,
    /// Unit price, `NUMERIC(18,2)`.
    #[serde(default)]
    #[validate(custom(function = "validate_price"))]
    pub price: Option<Decimal>,
    /// Units in stock.
    #[serde(default)]
    pub stock: Option<i32>,
    /// Color label.
    #[serde(default)]
    #[validate(length(max = 50, message = "Color must be at most 50 characters"))]
    pub color: Option<String>,
}

impl Product {
    /// A product with only identity and name set.
    pub fn named(id: EntityId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

impl Entity for Product {
    const NAME: &'static str = "Product";

    fn id(&self) -> EntityId {
        self.id
    }

    fn set_id(&mut self, id: EntityId) {
        self.id = id;
    }
}

impl TableMapping for Product {
    const TABLE: &'static str = "product";
    const COLUMNS: &'static [&'static str] = &["name", "price", "stock", "color"];

    fn bind_columns<'q>(&self, query: PgQuery<'q>) -> PgQuery<'q> {
        query
            .bind(self.name.clone())
            .bind(self.price)
            .bind(self.stock)
            .bind(self.color.clone())
    }
}
