//! Router configuration for the access request API.

use std::sync::Arc;

use axum::{
    middleware::from_fn,
    routing::{get, patch, post},
    Extension, Router,
};

use accessops_governance::RequestService;

use crate::handlers::{auth, requests};
use crate::middleware::{jwt_auth_middleware, JwtSecret};
use crate::services::AuthService;

/// Shared state for API handlers.
#[derive(Clone)]
pub struct AppState {
    /// Registration and login operations.
    pub auth_service: Arc<AuthService>,
    /// Access request lifecycle operations.
    pub request_service: Arc<RequestService>,
}

impl AppState {
    /// Create the shared handler state.
    #[must_use]
    pub fn new(auth_service: Arc<AuthService>, request_service: Arc<RequestService>) -> Self {
        Self {
            auth_service,
            request_service,
        }
    }
}

/// Build the API router.
///
/// Authentication endpoints are public; every request endpoint sits behind
/// the JWT middleware. The middleware reads the secret from the
/// [`JwtSecret`] extension layered here.
pub fn api_router(state: AppState, jwt_secret: String) -> Router {
    let public = Router::new()
        // Authentication
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login));

    let protected = Router::new()
        // Access Requests
        .route("/requests", post(requests::create_request))
        .route("/requests", get(requests::list_requests))
        .route("/requests/pending", get(requests::list_pending))
        .route("/requests/:id/approve", patch(requests::approve_request))
        .route("/requests/:id/reject", patch(requests::reject_request))
        .layer(from_fn(jwt_auth_middleware))
        .layer(Extension(JwtSecret(jwt_secret)));

    public.merge(protected).with_state(state)
}
