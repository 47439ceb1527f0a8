//! accessops Core Library
//!
//! Shared types for accessops.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (AccountId, RequestId)
//!
//! # Example
//!
//! ```
//! use accessops_core::{AccountId, RequestId};
//!
//! // Create strongly typed IDs
//! let account_id = AccountId::new();
//! let request_id = RequestId::new();
//!
//! assert_ne!(account_id.to_string(), request_id.to_string());
//! ```

pub mod ids;

// Re-export main types for convenient access
pub use ids::{AccountId, ParseIdError, RequestId};
