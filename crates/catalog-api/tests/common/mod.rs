//! Shared fixtures for the API tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use tower::ServiceExt;

use catalog_api::{AppState, ProductsController, build_app};
use catalog_core::config::AppConfig;
use catalog_core::testing::MockRepository;
use catalog_entity::Product;

/// The three products every fixture store starts with.
pub fn products() -> Vec<Product> {
    vec![
        product(1, "Book", 100, 10, "Red"),
        product(2, "Pencil", 400, 60, "Black"),
        product(3, "Notebook", 600, 30, "Blue"),
    ]
}

pub fn product(id: i32, name: &str, price: i64, stock: i32, color: &str) -> Product {
    Product {
        id,
        name: Some(name.to_string()),
        price: Some(Decimal::new(price, 0)),
        stock: Some(stock),
        color: Some(color.to_string()),
    }
}

/// A controller over `repo`.
pub fn controller(repo: &Arc<MockRepository<Product>>) -> ProductsController {
    ProductsController::new(repo.clone())
}

/// A mock repository holding [`products`].
pub fn seeded_repo() -> Arc<MockRepository<Product>> {
    Arc::new(MockRepository::with_records(products()))
}

/// A mock repository with no records.
pub fn empty_repo() -> Arc<MockRepository<Product>> {
    Arc::new(MockRepository::new())
}

pub fn test_config() -> AppConfig {
    AppConfig::from_toml(
        r#"
        [database]
        url = "postgres://catalog@localhost/catalog_test"
        "#,
    )
    .expect("test config")
}

/// Full application (routes and middleware) over `repo`.
pub struct TestApp {
    pub router: Router,
    pub repo: Arc<MockRepository<Product>>,
}

impl TestApp {
    pub fn new(repo: Arc<MockRepository<Product>>) -> Self {
        let state = AppState::with_repository(test_config(), repo.clone());
        Self {
            router: build_app(state),
            repo,
        }
    }

    pub async fn get(&self, uri: &str) -> Response<Body> {
        let request = Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }

    pub async fn post_form(&self, uri: &str, form: &str) -> Response<Body> {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .unwrap();
        self.router.clone().oneshot(request).await.unwrap()
    }
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
