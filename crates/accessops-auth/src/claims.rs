//! JWT claims structure for access tokens.
//!
//! Provides the `AccessClaims` struct containing the RFC 7519 standard
//! claims used by accessops plus the accessops-specific `role` claim.

use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use accessops_core::AccountId;

use crate::error::AuthError;

/// JWT claims carried by an accessops access token.
///
/// # Standard Claims (RFC 7519)
///
/// - `sub`: Subject (the account ID)
/// - `exp`: Expiration time (Unix timestamp)
/// - `iat`: Issued at (Unix timestamp)
///
/// # Custom Claims
///
/// - `role`: Account role for authorization (e.g. `"REQUESTER"`, `"APPROVER"`)
///
/// # Example
///
/// ```rust
/// use accessops_auth::AccessClaims;
/// use accessops_core::AccountId;
///
/// let account_id = AccountId::new();
/// let claims = AccessClaims::new(account_id, "REQUESTER", 60);
///
/// assert_eq!(claims.sub, account_id.to_string());
/// assert_eq!(claims.role, "REQUESTER");
/// assert!(!claims.is_expired());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessClaims {
    /// Subject - the account ID as a UUID string.
    pub sub: String,

    /// Account role for authorization.
    pub role: String,

    /// Issued at as Unix timestamp.
    pub iat: i64,

    /// Expiration time as Unix timestamp.
    pub exp: i64,
}

impl AccessClaims {
    /// Create claims for an account, expiring `ttl_minutes` from now.
    #[must_use]
    pub fn new(account_id: AccountId, role: impl Into<String>, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: account_id.to_string(),
            role: role.into(),
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        }
    }

    /// Check if the token is expired.
    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }

    /// Get the subject as a typed account ID.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidToken` if the subject is not a valid UUID.
    pub fn account_id(&self) -> Result<AccountId, AuthError> {
        self.sub
            .parse()
            .map_err(|_| AuthError::InvalidToken("Subject is not a valid account ID".to_string()))
    }
}
