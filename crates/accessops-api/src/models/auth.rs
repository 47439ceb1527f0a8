//! Request and response models for the authentication endpoints.
//!
//! This module provides the DTOs for POST /auth/register and
//! POST /auth/login.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use accessops_governance::{Account, Role};

/// Registration request payload.
///
/// Every account registered through the API starts as a requester.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    /// Account email address.
    #[validate(email(message = "Invalid email format"))]
    #[validate(length(max = 255, message = "Email must not exceed 255 characters"))]
    pub email: String,

    /// Account password.
    #[validate(length(min = 8, max = 128, message = "Password must be 8-128 characters"))]
    pub password: String,

    /// Optional display name for the account.
    #[validate(length(max = 255, message = "Display name must not exceed 255 characters"))]
    #[serde(default)]
    pub display_name: Option<String>,
}

/// Registration response payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RegisterResponse {
    /// UUID of the created account.
    pub id: Uuid,

    /// Normalized email address.
    pub email: String,

    /// Role assigned at registration.
    pub role: Role,
}

impl From<Account> for RegisterResponse {
    fn from(account: Account) -> Self {
        Self {
            id: account.id,
            email: account.email,
            role: account.role,
        }
    }
}

/// Login request payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    /// Account email address.
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Account password.
    #[validate(length(min = 1, max = 1024, message = "Password must be 1-1024 characters"))]
    pub password: String,
}

/// Login response payload.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    /// JWT access token.
    pub access_token: String,

    /// Token type (always "bearer").
    pub token_type: String,
}

impl TokenResponse {
    /// Create a new token response.
    #[must_use]
    pub fn new(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
        }
    }
}
