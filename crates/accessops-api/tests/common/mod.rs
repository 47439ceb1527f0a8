//! Shared helpers for API integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use serde_json::Value;
use uuid::Uuid;

use accessops_api::{api_router, AppState, AuthService};
use accessops_auth::{encode_token, AccessClaims};
use accessops_core::AccountId;
use accessops_governance::{
    AccountService, InMemoryAccountStore, InMemoryAuditStore, InMemoryRequestStore, RequestService,
    Role,
};

/// JWT secret shared by the test router and minted tokens.
pub const TEST_JWT_SECRET: &str = "api-integration-test-secret";

/// A fully wired router over in-memory stores.
pub struct TestApp {
    pub router: Router,
    pub request_store: Arc<InMemoryRequestStore>,
    pub audit_store: Arc<InMemoryAuditStore>,
}

/// Build a test application over in-memory stores.
pub fn test_app() -> TestApp {
    let account_store = Arc::new(InMemoryAccountStore::new());
    let request_store = Arc::new(InMemoryRequestStore::new());
    let audit_store = Arc::new(InMemoryAuditStore::new());

    let auth_service = Arc::new(AuthService::new(
        AccountService::new(account_store),
        TEST_JWT_SECRET.to_string(),
        60,
    ));
    let request_service = Arc::new(RequestService::new(
        request_store.clone(),
        audit_store.clone(),
    ));

    TestApp {
        router: api_router(
            AppState::new(auth_service, request_service),
            TEST_JWT_SECRET.to_string(),
        ),
        request_store,
        audit_store,
    }
}

/// Mint a bearer token for an arbitrary account id and role.
///
/// Handlers trust the claims alone, so tests can mint identities without
/// registering accounts first.
pub fn bearer_token(account_id: Uuid, role: Role) -> String {
    let claims = AccessClaims::new(AccountId::from_uuid(account_id), role.to_string(), 60);
    encode_token(&claims, TEST_JWT_SECRET).unwrap()
}

/// Build a JSON request with an optional bearer token.
pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder
        .body(Body::from(serde_json::to_vec(body).unwrap()))
        .unwrap()
}

/// Build a bodyless request with an optional bearer token.
pub fn bare_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }

    builder.body(Body::empty()).unwrap()
}

/// Read a response body as JSON.
pub async fn body_json(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
