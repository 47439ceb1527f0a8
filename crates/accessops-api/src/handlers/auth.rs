//! HTTP handlers for the authentication endpoints.
//!
//! POST /auth/register creates a requester account; POST /auth/login
//! verifies credentials and returns a bearer token. Neither endpoint
//! requires authentication.

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::error::ApiResult;
use crate::models::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};
use crate::router::AppState;

/// Handle account registration.
///
/// # Errors
///
/// - 409 Conflict: Email already registered
/// - 422 Unprocessable Entity: Invalid email, password, or display name
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created", body = RegisterResponse),
        (status = 409, description = "Email already registered"),
        (status = 422, description = "Validation error"),
    ),
    tag = "Authentication"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<RegisterResponse>)> {
    request.validate()?;

    let account = state
        .auth_service
        .register(&request.email, &request.password, request.display_name)
        .await?;

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Handle account login.
///
/// # Errors
///
/// - 401 Unauthorized: Unknown email or wrong password
/// - 422 Unprocessable Entity: Malformed email or empty password
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation error"),
    ),
    tag = "Authentication"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> ApiResult<Json<TokenResponse>> {
    request.validate()?;

    let token = state
        .auth_service
        .login(&request.email, &request.password)
        .await?;

    Ok(Json(TokenResponse::new(token)))
}
