//! Role-based authorization for governance operations.
//!
//! Authorization depends only on the caller's role and the attempted
//! operation. Ownership of a request never changes the answer here;
//! listings are scoped per role inside the services instead.

use std::fmt;

use crate::types::Role;

/// A governance operation subject to authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    /// Submit a new access request.
    CreateRequest,
    /// List the caller's own requests.
    ListOwnRequests,
    /// List the queue of pending requests.
    ListPendingRequests,
    /// Approve or reject a pending request.
    DecideRequest,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateRequest => write!(f, "create_request"),
            Self::ListOwnRequests => write!(f, "list_own_requests"),
            Self::ListPendingRequests => write!(f, "list_pending_requests"),
            Self::DecideRequest => write!(f, "decide_request"),
        }
    }
}

/// Whether `role` may perform `operation`.
///
/// The match is intentionally exhaustive with no wildcard arms: adding a
/// role or an operation forces an explicit entry for every combination.
#[must_use]
pub fn allow(role: Role, operation: Operation) -> bool {
    match (role, operation) {
        (Role::Requester, Operation::CreateRequest) => true,
        (Role::Requester, Operation::ListOwnRequests) => true,
        (Role::Requester, Operation::ListPendingRequests) => false,
        (Role::Requester, Operation::DecideRequest) => false,
        (Role::Approver, Operation::CreateRequest) => false,
        (Role::Approver, Operation::ListOwnRequests) => true,
        (Role::Approver, Operation::ListPendingRequests) => true,
        (Role::Approver, Operation::DecideRequest) => true,
    }
}
