//! Product routes over PostgreSQL.
//!
//! Requires `DATABASE_URL`; run with `cargo test -p catalog-api -- --ignored`.

mod common;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use sqlx::PgPool;
use tower::ServiceExt;

use catalog_api::{AppState, build_app};
use catalog_database::DatabasePool;

use common::{body_json, test_config};

fn app(pool: PgPool) -> Router {
    build_app(AppState::new(test_config(), DatabasePool::from_pool(pool)))
}

async fn send(
    router: &Router,
    request: Request<Body>,
) -> Response<Body> {
    router.clone().oneshot(request).await.unwrap()
}

fn form(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn create_edit_delete_round_trip(pool: PgPool) {
    let router = app(pool);

    let response = send(&router, form("/products/create", "name=Book&price=12.50&stock=3")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_json(send(&router, get("/products")).await).await;
    let id = body["model"][0]["id"].as_i64().unwrap();
    assert_eq!(body["model"][0]["price"], "12.50");

    let response = send(
        &router,
        form(&format!("/products/edit/{id}"), &format!("id={id}&name=Atlas&stock=2")),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let body = body_json(send(&router, get(&format!("/products/details/{id}"))).await).await;
    assert_eq!(body["model"]["name"], "Atlas");
    assert!(body["model"]["price"].is_null());

    let response = send(&router, form(&format!("/products/delete/{id}"), "")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let response = send(&router, get(&format!("/products/details/{id}"))).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn edit_of_missing_row_is_404(pool: PgPool) {
    let router = app(pool);

    let response = send(&router, form("/products/edit/77", "id=77&name=Ghost")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../migrations")]
#[ignore = "requires PostgreSQL"]
async fn health_reports_connected_database(pool: PgPool) {
    let router = app(pool);

    let body = body_json(send(&router, get("/health")).await).await;

    assert_eq!(body["database"], "connected");
}
