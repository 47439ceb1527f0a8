//! JWT authentication and password hashing library for accessops.
//!
//! This crate provides:
//! - JWT HS256 encoding and decoding for access tokens
//! - Argon2id password hashing with OWASP-recommended parameters
//!
//! # Example
//!
//! ```rust,ignore
//! use accessops_auth::{encode_token, decode_token, AccessClaims, hash_password, verify_password};
//! use accessops_core::AccountId;
//!
//! // Create claims for a freshly authenticated account
//! let claims = AccessClaims::new(AccountId::new(), "REQUESTER", 60);
//!
//! // Encode token
//! let token = encode_token(&claims, jwt_secret)?;
//!
//! // Decode token
//! let decoded = decode_token(&token, jwt_secret)?;
//!
//! // Hash password
//! let hash = hash_password("my-secure-password")?;
//!
//! // Verify password
//! let is_valid = verify_password("my-secure-password", &hash)?;
//! ```

mod claims;
mod error;
mod jwt;
mod password;

// Re-export public API
pub use claims::AccessClaims;
pub use error::AuthError;
pub use jwt::{decode_token, decode_token_with_config, encode_token, ValidationConfig};
pub use password::{hash_password, verify_password, PasswordHasher};
