//! Repository implementations backed by the persistence context.

pub mod generic;

pub use generic::PgRepository;

use catalog_entity::Product;

/// Repository for catalog products.
pub type ProductRepository = PgRepository<Product>;
