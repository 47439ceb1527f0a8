//! JWT encoding and decoding with HS256 algorithm.
//!
//! Provides functions to encode and decode JWT tokens using a shared secret.

use jsonwebtoken::{
    decode, encode, Algorithm, DecodingKey, EncodingKey, Header, TokenData, Validation,
};

use crate::claims::AccessClaims;
use crate::error::AuthError;

/// Configuration for JWT validation.
#[derive(Debug, Clone)]
pub struct ValidationConfig {
    /// Leeway in seconds for exp validation (clock skew tolerance).
    pub leeway: u64,
    /// Whether to validate expiration.
    pub validate_exp: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            leeway: 60, // 60 seconds clock skew tolerance
            validate_exp: true,
        }
    }
}

impl ValidationConfig {
    /// Create a new validation config with custom leeway.
    #[must_use]
    pub fn with_leeway(leeway: u64) -> Self {
        Self {
            leeway,
            ..Default::default()
        }
    }

    /// Disable expiration validation (use with caution).
    #[must_use]
    pub fn skip_exp_validation(mut self) -> Self {
        self.validate_exp = false;
        self
    }
}

/// Encode claims into a signed token string using HS256.
///
/// # Arguments
///
/// * `claims` - The claims to encode
/// * `secret` - Shared signing secret
///
/// # Returns
///
/// A signed JWT token string.
///
/// # Errors
///
/// Returns `AuthError::InvalidToken` if encoding fails.
///
/// # Example
///
/// ```rust
/// use accessops_auth::{encode_token, AccessClaims};
/// use accessops_core::AccountId;
///
/// let claims = AccessClaims::new(AccountId::new(), "REQUESTER", 60);
/// let token = encode_token(&claims, "signing-secret").unwrap();
///
/// assert_eq!(token.split('.').count(), 3);
/// ```
pub fn encode_token(claims: &AccessClaims, secret: &str) -> Result<String, AuthError> {
    let key = EncodingKey::from_secret(secret.as_bytes());
    let header = Header::new(Algorithm::HS256);

    encode(&header, claims, &key)
        .map_err(|e| AuthError::InvalidToken(format!("Encoding failed: {}", e)))
}

/// Decode and validate a JWT token.
///
/// # Arguments
///
/// * `token` - The JWT token string
/// * `secret` - Shared signing secret
///
/// # Returns
///
/// The decoded claims.
///
/// # Errors
///
/// - `AuthError::TokenExpired` - Token has expired
/// - `AuthError::InvalidSignature` - Signature verification failed
/// - `AuthError::InvalidToken` - Token format is invalid
/// - `AuthError::InvalidAlgorithm` - Token uses unsupported algorithm
pub fn decode_token(token: &str, secret: &str) -> Result<AccessClaims, AuthError> {
    decode_token_with_config(token, secret, &ValidationConfig::default())
}

/// Decode and validate a JWT token with custom validation config.
///
/// # Arguments
///
/// * `token` - The JWT token string
/// * `secret` - Shared signing secret
/// * `config` - Validation configuration
///
/// # Returns
///
/// The decoded claims.
pub fn decode_token_with_config(
    token: &str,
    secret: &str,
    config: &ValidationConfig,
) -> Result<AccessClaims, AuthError> {
    let key = DecodingKey::from_secret(secret.as_bytes());

    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = config.leeway;
    validation.validate_exp = config.validate_exp;

    // Only accept HS256
    validation.algorithms = vec![Algorithm::HS256];

    // Tokens carry no audience claim
    validation.validate_aud = false;

    let token_data: TokenData<AccessClaims> =
        decode(token, &key, &validation).map_err(map_jwt_error)?;

    Ok(token_data.claims)
}

/// Map jsonwebtoken errors to AuthError.
fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    use jsonwebtoken::errors::ErrorKind;

    match err.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        ErrorKind::InvalidSignature => AuthError::InvalidSignature,
        ErrorKind::InvalidAlgorithm => AuthError::InvalidAlgorithm,
        ErrorKind::InvalidToken => AuthError::InvalidToken("Malformed token".to_string()),
        ErrorKind::Base64(_) => AuthError::InvalidToken("Invalid base64 encoding".to_string()),
        ErrorKind::Json(_) => AuthError::InvalidToken("Invalid JSON in claims".to_string()),
        ErrorKind::MissingRequiredClaim(claim) => AuthError::MissingClaim(claim.to_string()),
        _ => AuthError::InvalidToken(format!("Token validation failed: {}", err)),
    }
}
