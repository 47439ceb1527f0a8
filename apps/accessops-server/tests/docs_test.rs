//! Integration tests for the API documentation endpoint.
//!
//! These tests verify the /api-docs/openapi.json endpoint serves the
//! OpenAPI document.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    routing::get,
    Json, Router,
};
use tower::ServiceExt;
use utoipa::OpenApi;

/// Minimal OpenAPI doc for testing.
#[derive(OpenApi)]
#[openapi(info(title = "Test API", version = "1.0.0"))]
struct TestApiDoc;

/// Create a test router serving the OpenAPI document as JSON.
fn test_docs_router() -> Router {
    Router::new().route(
        "/api-docs/openapi.json",
        get(|| async { Json(TestApiDoc::openapi()) }),
    )
}

#[tokio::test]
async fn test_openapi_json_endpoint_exists() {
    let app = test_docs_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let content_type = response
        .headers()
        .get("content-type")
        .map(|v| v.to_str().unwrap_or(""))
        .unwrap_or("");

    assert!(
        content_type.contains("application/json"),
        "Expected JSON content type, got: {}",
        content_type
    );
}

#[tokio::test]
async fn test_openapi_json_contains_info() {
    let app = test_docs_router();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api-docs/openapi.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();

    // Verify OpenAPI structure
    assert!(
        json.get("openapi").is_some(),
        "Expected openapi version field"
    );
    assert!(json.get("info").is_some(), "Expected info section");
    assert_eq!(json["info"]["title"], "Test API");
}
