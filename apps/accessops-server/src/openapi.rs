//! `OpenAPI` documentation configuration.
//!
//! This module sets up utoipa for `OpenAPI` spec generation and serves the
//! derived document as JSON.

use axum::{routing::get, Json, Router};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::health::HealthResponse;

/// Security scheme modifier for Bearer authentication.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// `OpenAPI` documentation for the AccessOps API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "AccessOps API",
        version = "0.1.0",
        description = "Access request lifecycle API",
        contact(name = "AccessOps Team")
    ),
    servers(
        (url = "http://localhost:8080", description = "Development server")
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health and status"),
        (name = "Authentication", description = "Account registration and login"),
        (name = "Access Requests", description = "Access request submission and decisions")
    ),
    paths(
        // Health
        crate::health::health_handler,
        // Authentication
        accessops_api::handlers::auth::register,
        accessops_api::handlers::auth::login,
        // Access Requests
        accessops_api::handlers::requests::create_request,
        accessops_api::handlers::requests::list_requests,
        accessops_api::handlers::requests::list_pending,
        accessops_api::handlers::requests::approve_request,
        accessops_api::handlers::requests::reject_request,
    ),
    components(schemas(
        // Health
        HealthResponse,
        // Auth models
        accessops_api::models::RegisterRequest,
        accessops_api::models::RegisterResponse,
        accessops_api::models::LoginRequest,
        accessops_api::models::TokenResponse,
        // Access request models
        accessops_api::models::CreateAccessRequestRequest,
        accessops_api::models::AccessRequestResponse,
        // Domain enums
        accessops_governance::Role,
        accessops_governance::RequestStatus,
    ))
)]
pub struct ApiDoc;

/// Create the documentation routes.
pub fn docs_routes() -> Router {
    Router::new().route("/api-docs/openapi.json", get(openapi_json))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
