//! HTTP API for the access request lifecycle.
//!
//! This crate provides REST API endpoints over the governance domain:
//! - Registration (POST /auth/register)
//! - Login (POST /auth/login)
//! - Request submission (POST /requests)
//! - Own-request listing (GET /requests)
//! - Pending queue (GET /requests/pending)
//! - Decisions (PATCH /requests/{id}/approve, PATCH /requests/{id}/reject)
//!
//! # Example
//!
//! ```rust,ignore
//! use accessops_api::{api_router, AppState};
//!
//! let state = AppState::new(auth_service, request_service);
//! let app = api_router(state, jwt_secret);
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod router;
pub mod services;

// Re-export public API
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use middleware::{jwt_auth_middleware, JwtSecret};
pub use models::{
    AccessRequestResponse, CreateAccessRequestRequest, LoginRequest, RegisterRequest,
    RegisterResponse, TokenResponse,
};
pub use router::{api_router, AppState};
pub use services::AuthService;
