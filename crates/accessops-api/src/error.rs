//! API error types for access request endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use accessops_governance::GovernanceError;

/// API error response body.
///
/// Every error leaves the API as `{"detail": ...}`. The detail is a plain
/// string for most failures and an array of `{"msg": ...}` objects when a
/// request body fails field validation.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// What went wrong.
    pub detail: serde_json::Value,
}

/// Access request API error type.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Domain error from the governance crate.
    #[error(transparent)]
    Governance(#[from] GovernanceError),

    /// Request body failed field validation.
    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    /// Protected route called without a bearer token.
    #[error("Missing token")]
    MissingToken,

    /// The bearer token failed verification.
    #[error("Invalid token")]
    InvalidToken,

    /// Login with an unknown email or a wrong password.
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// The request id path segment is not a UUID.
    #[error("Invalid request id: {0}")]
    InvalidRequestId(String),

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            Self::Governance(e) => match e {
                GovernanceError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, serde_json::Value::from(msg.clone()))
                }
                GovernanceError::Forbidden(_) => {
                    (StatusCode::FORBIDDEN, serde_json::Value::from("Forbidden"))
                }
                GovernanceError::RequestNotFound(_) => (
                    StatusCode::NOT_FOUND,
                    serde_json::Value::from("Request not found"),
                ),
                GovernanceError::AlreadyDecided { .. } => (
                    StatusCode::CONFLICT,
                    serde_json::Value::from("Request not pending"),
                ),
                GovernanceError::EmailExists(_) => (
                    StatusCode::CONFLICT,
                    serde_json::Value::from("Email already registered"),
                ),
                GovernanceError::Database(ref db_err) => {
                    tracing::error!("GovernanceError::Database: {:?}", db_err);
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        serde_json::Value::from("Service unavailable"),
                    )
                }
            },
            Self::Validation(errors) => {
                (StatusCode::UNPROCESSABLE_ENTITY, validation_detail(errors))
            }
            Self::MissingToken => (
                StatusCode::UNAUTHORIZED,
                serde_json::Value::from("Missing token"),
            ),
            Self::InvalidToken => (
                StatusCode::UNAUTHORIZED,
                serde_json::Value::from("Invalid token"),
            ),
            Self::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                serde_json::Value::from("Invalid credentials"),
            ),
            Self::InvalidRequestId(_) => (
                StatusCode::BAD_REQUEST,
                serde_json::Value::from("Invalid request id"),
            ),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    serde_json::Value::from("An internal error occurred"),
                )
            }
        };

        let body = Json(ErrorResponse { detail });

        (status, body).into_response()
    }
}

/// Flatten validator output into the `[{"msg": ...}]` array shape.
fn validation_detail(errors: &validator::ValidationErrors) -> serde_json::Value {
    let mut items = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let msg = error
                .message
                .as_ref()
                .map_or_else(|| format!("{field}: invalid value"), ToString::to_string);
            items.push(serde_json::json!({ "msg": msg }));
        }
    }
    serde_json::Value::Array(items)
}

/// Result type alias for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
