//! JWT authentication middleware.
//!
//! Extracts and validates bearer tokens from the Authorization header,
//! then inserts `AccessClaims` and the resolved `Caller` into request
//! extensions.

use std::str::FromStr;

use axum::{
    body::Body,
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};

use accessops_auth::decode_token;
use accessops_governance::{Caller, Role};

use crate::error::ApiError;

/// JWT authentication middleware.
///
/// This middleware:
/// 1. Extracts the bearer token from the Authorization header
/// 2. Decodes and validates the JWT
/// 3. Inserts `AccessClaims` and the resolved [`Caller`] into request extensions
///
/// # Usage
///
/// ```rust,ignore
/// use axum::{middleware, routing::get, Extension, Router};
/// use accessops_api::middleware::{jwt_auth_middleware, JwtSecret};
///
/// let router = Router::new()
///     .route("/requests", get(list_requests))
///     .layer(middleware::from_fn(jwt_auth_middleware))
///     .layer(Extension(JwtSecret("secret".to_string())));
/// ```
pub async fn jwt_auth_middleware(
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, Response> {
    // Get the JWT secret from extensions
    let secret = request
        .extensions()
        .get::<JwtSecret>()
        .ok_or_else(|| {
            tracing::error!("JWT secret not configured");
            ApiError::Internal("JWT secret not configured".to_string()).into_response()
        })?
        .0
        .clone();

    // Extract the bearer token from the Authorization header
    let auth_header = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ApiError::MissingToken.into_response())?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| ApiError::MissingToken.into_response())?;

    // Reject empty bearer tokens before attempting JWT decode.
    if token.is_empty() {
        tracing::warn!("Rejected empty bearer token");
        return Err(ApiError::InvalidToken.into_response());
    }

    // Decode and validate the JWT
    let claims = decode_token(token, &secret).map_err(|e| {
        tracing::warn!("JWT validation failed: {}", e);
        ApiError::InvalidToken.into_response()
    })?;

    // Resolve the caller identity carried by the claims
    let account_id = claims.account_id().map_err(|e| {
        tracing::warn!("Invalid subject in JWT claims: {}", e);
        ApiError::InvalidToken.into_response()
    })?;

    let role = Role::from_str(&claims.role).map_err(|e| {
        tracing::warn!("Invalid role in JWT claims: {}", e);
        ApiError::InvalidToken.into_response()
    })?;

    let caller = Caller::new(*account_id.as_uuid(), role);

    // Insert claims and caller into request extensions
    request.extensions_mut().insert(claims);
    request.extensions_mut().insert(caller);

    Ok(next.run(request).await)
}

/// Wrapper for the JWT signing secret to allow putting it in extensions.
#[derive(Clone)]
pub struct JwtSecret(pub String);
