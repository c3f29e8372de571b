//! HTTP behavior of the product routes, driven through the full middleware stack.

mod common;

use axum::http::{StatusCode, header};

use catalog_core::error::AppError;
use catalog_core::testing::RepositoryOp;

use common::{TestApp, body_json, empty_repo, seeded_repo};

#[tokio::test]
async fn index_renders_view_envelope() {
    let app = TestApp::new(seeded_repo());

    let response = app.get("/products").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["view"], "Index");
    assert_eq!(body["model"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["model"][0]["name"], "Book");
    assert!(body.get("errors").is_none());
}

#[tokio::test]
async fn root_serves_index() {
    let app = TestApp::new(empty_repo());

    let response = app.get("/").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["view"], "Index");
}

#[tokio::test]
async fn details_of_unknown_product_is_404_json() {
    let app = TestApp::new(seeded_repo());

    let response = app.get("/products/details/99").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn details_without_id_redirects_to_index() {
    let app = TestApp::new(seeded_repo());

    let response = app.get("/products/details").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/products");
}

#[tokio::test]
async fn details_binds_product() {
    let app = TestApp::new(seeded_repo());

    let response = app.get("/products/details/2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["view"], "Details");
    assert_eq!(body["model"]["id"], 2);
    assert_eq!(body["model"]["name"], "Pencil");
    assert_eq!(body["model"]["price"], "400");
}

#[tokio::test]
async fn edit_and_delete_forms_without_id_are_404() {
    let app = TestApp::new(seeded_repo());

    assert_eq!(app.get("/products/edit").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.get("/products/delete").await.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_form_has_no_model() {
    let app = TestApp::new(empty_repo());

    let response = app.get("/products/create").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["view"], "Create");
    assert!(body["model"].is_null());
}

#[tokio::test]
async fn create_post_stores_product_and_redirects() {
    let app = TestApp::new(empty_repo());

    let response = app
        .post_form("/products/create", "name=Eraser&price=2.50&stock=100&color=White")
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/products");

    let stored = app.repo.records();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].id, 1);
    assert_eq!(stored[0].name.as_deref(), Some("Eraser"));
    assert_eq!(stored[0].price.map(|p| p.to_string()), Some("2.50".to_string()));
}

#[tokio::test]
async fn create_post_treats_blank_fields_as_absent() {
    let app = TestApp::new(empty_repo());

    let response = app
        .post_form("/products/create", "name=Ruler&price=&stock=&color=")
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let stored = app.repo.records();
    assert_eq!(stored[0].price, None);
    assert_eq!(stored[0].stock, None);
    assert_eq!(stored[0].color, None);
}

#[tokio::test]
async fn create_post_with_invalid_input_rerenders_form() {
    let app = TestApp::new(empty_repo());
    let long_name = "x".repeat(51);

    let response = app
        .post_form("/products/create", &format!("name={long_name}&price=1.999"))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["view"], "Create");
    assert_eq!(body["model"]["name"], long_name.as_str());
    assert!(body["errors"]["name"].is_array());
    assert!(body["errors"]["price"].is_array());
    assert_eq!(app.repo.call_count(RepositoryOp::Create), 0);
}

#[tokio::test]
async fn create_post_with_unparsable_price_rerenders_form() {
    let app = TestApp::new(empty_repo());

    let response = app
        .post_form("/products/create", "name=Eraser&price=abc&stock=1")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["view"], "Create");
    assert_eq!(body["model"]["name"], "Eraser");
    assert_eq!(body["model"]["stock"], 1);
    assert!(body["model"]["price"].is_null());
    assert_eq!(body["errors"]["price"][0], "The value 'abc' is not valid for price.");
    assert_eq!(app.repo.call_count(RepositoryOp::Create), 0);
}

#[tokio::test]
async fn edit_post_with_unparsable_stock_rerenders_form() {
    let app = TestApp::new(seeded_repo());

    let response = app
        .post_form("/products/edit/1", "id=1&name=Book&stock=lots")
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["view"], "Edit");
    assert_eq!(body["model"]["id"], 1);
    assert_eq!(body["errors"]["stock"][0], "The value 'lots' is not valid for stock.");
    assert_eq!(app.repo.call_count(RepositoryOp::Update), 0);
}

#[tokio::test]
async fn edit_post_without_form_id_uses_route_id() {
    let app = TestApp::new(seeded_repo());

    let response = app
        .post_form("/products/edit/2", "name=Mechanical+Pencil&price=450&stock=60&color=Black")
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let updated = app.repo.updated();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].id, 2);
    assert_eq!(updated[0].name.as_deref(), Some("Mechanical Pencil"));
}

#[tokio::test]
async fn create_post_ignores_submitted_id_clash() {
    let app = TestApp::new(seeded_repo());

    let response = app.post_form("/products/create", "id=1&name=Eraser").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let stored = app.repo.records();
    assert_eq!(stored.len(), 4);
    assert_eq!(stored[0].name.as_deref(), Some("Book"));
    assert_eq!(stored[3].id, 4);
    assert_eq!(stored[3].name.as_deref(), Some("Eraser"));
}

#[tokio::test]
async fn edit_post_with_mismatched_id_is_404() {
    let app = TestApp::new(seeded_repo());

    let response = app.post_form("/products/edit/2", "id=1&name=Book").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(app.repo.call_count(RepositoryOp::Update), 0);
}

#[tokio::test]
async fn edit_post_replaces_product() {
    let app = TestApp::new(seeded_repo());

    let response = app
        .post_form("/products/edit/3", "id=3&name=Sketchbook&price=650&stock=25&color=Green")
        .await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let updated = app.repo.updated();
    assert_eq!(updated.len(), 1);
    assert_eq!(updated[0].name.as_deref(), Some("Sketchbook"));
    assert_eq!(updated[0].color.as_deref(), Some("Green"));
}

#[tokio::test]
async fn delete_post_removes_product() {
    let app = TestApp::new(seeded_repo());

    let response = app.post_form("/products/delete/1", "").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.repo.call_count(RepositoryOp::Delete), 1);
    assert!(app.repo.records().iter().all(|p| p.id != 1));
}

#[tokio::test]
async fn delete_post_of_unknown_product_still_redirects() {
    let app = TestApp::new(seeded_repo());

    let response = app.post_form("/products/delete/42", "").await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(app.repo.call_count(RepositoryOp::Delete), 0);
}

#[tokio::test]
async fn storage_failure_is_sanitized_500() {
    let app = TestApp::new(seeded_repo());
    app.repo.fail_on(
        RepositoryOp::GetAll,
        AppError::storage("password authentication failed for user catalog"),
    );

    let response = app.get("/products").await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "STORAGE_ERROR");
    assert_eq!(body["message"], "An internal error occurred");
}

#[tokio::test]
async fn health_without_database_is_ok() {
    let app = TestApp::new(empty_repo());

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "not_configured");
}
