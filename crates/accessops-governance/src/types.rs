//! Core types for access request governance.
//!
//! This module defines the account roles, request statuses, and decision
//! outcomes that drive the request lifecycle, plus the caller identity
//! resolved from an authenticated token.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ============================================================================
// Roles
// ============================================================================

/// Role assigned to an account.
///
/// Every account holds exactly one role, and the role alone determines
/// which operations the account may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "account_role", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    /// Can create access requests and view their own.
    Requester,
    /// Can view the pending queue and decide requests.
    Approver,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Requester => write!(f, "REQUESTER"),
            Self::Approver => write!(f, "APPROVER"),
        }
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "REQUESTER" => Ok(Self::Requester),
            "APPROVER" => Ok(Self::Approver),
            other => Err(format!("Unknown role: {other}")),
        }
    }
}

// ============================================================================
// Request Status
// ============================================================================

/// Lifecycle status of an access request.
///
/// Requests are born `Pending` and move exactly once to either
/// `Approved` or `Rejected`. There are no other transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[sqlx(type_name = "request_status", rename_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum RequestStatus {
    /// Awaiting a decision.
    Pending,
    /// Granted by an approver.
    Approved,
    /// Denied by an approver.
    Rejected,
}

impl RequestStatus {
    /// Returns true if the request is still awaiting a decision.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Returns true if the status is terminal and can never change again.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "PENDING"),
            Self::Approved => write!(f, "APPROVED"),
            Self::Rejected => write!(f, "REJECTED"),
        }
    }
}

// ============================================================================
// Decision Outcome
// ============================================================================

/// The outcome an approver selects when deciding a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecisionOutcome {
    /// Grant the requested access.
    Approve,
    /// Deny the requested access.
    Reject,
}

impl DecisionOutcome {
    /// The terminal status a request reaches under this outcome.
    #[must_use]
    pub fn terminal_status(&self) -> RequestStatus {
        match self {
            Self::Approve => RequestStatus::Approved,
            Self::Reject => RequestStatus::Rejected,
        }
    }
}

impl fmt::Display for DecisionOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approve => write!(f, "approve"),
            Self::Reject => write!(f, "reject"),
        }
    }
}

// ============================================================================
// Caller
// ============================================================================

/// The authenticated identity on whose behalf an operation runs.
///
/// Constructed from a verified token before any governance operation is
/// invoked. Services trust the role carried here and never re-read it
/// from storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// The account performing the operation.
    pub account_id: Uuid,
    /// The account's role.
    pub role: Role,
}

impl Caller {
    /// Create a caller identity.
    #[must_use]
    pub fn new(account_id: Uuid, role: Role) -> Self {
        Self { account_id, role }
    }
}
