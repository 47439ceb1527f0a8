//! Error types for governance operations.

use thiserror::Error;
use uuid::Uuid;

use crate::types::RequestStatus;

/// Result type for governance operations.
pub type Result<T> = std::result::Result<T, GovernanceError>;

/// Errors produced by governance services.
#[derive(Debug, Error)]
pub enum GovernanceError {
    /// Input failed domain validation.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The caller's role does not permit the operation.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// No access request exists with the given ID.
    #[error("Access request not found: {0}")]
    RequestNotFound(Uuid),

    /// The request already reached a terminal status and cannot be decided again.
    #[error("Access request {id} is not pending (current status: {status})")]
    AlreadyDecided {
        /// The request that was targeted.
        id: Uuid,
        /// Its current terminal status.
        status: RequestStatus,
    },

    /// An account is already registered under the given email.
    #[error("Email already registered: {0}")]
    EmailExists(String),

    /// Underlying storage failure.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
}

impl GovernanceError {
    /// Returns true if this is a validation error.
    #[must_use]
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is an authorization failure.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }

    /// Returns true if this is a missing-request error.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::RequestNotFound(_))
    }

    /// Returns true if this is a conflict with existing state.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::AlreadyDecided { .. } | Self::EmailExists(_))
    }

    /// Returns true if this is a storage failure.
    #[must_use]
    pub fn is_database(&self) -> bool {
        matches!(self, Self::Database(_))
    }
}
