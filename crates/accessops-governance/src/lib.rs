//! Access request governance domain logic.
//!
//! This crate provides the core domain logic for the access request
//! lifecycle, from submission by a requester to a one-shot decision by an
//! approver.
//!
//! # Features
//!
//! - Account registration with role assignment
//! - Access request submission with domain validation
//! - Role-scoped request listings (own requests, pending queue)
//! - One-shot approve/reject decisions with conditional status updates
//! - Role-based authorization over every operation
//! - Audit logging for all decisions
//!
//! # Services
//!
//! The [`services`] module provides business logic for:
//! - [`services::AccountService`] - Account registration and lookup
//! - [`services::RequestService`] - Access request lifecycle operations
//!
//! # Policy
//!
//! The [`policy`] module is the single authorization table: a pure
//! function from (role, operation) to allow/deny.
//!
//! # Audit
//!
//! The [`audit`] module records request decisions:
//! - [`audit::AuditStore`] trait for pluggable storage backends
//! - [`audit::InMemoryAuditStore`] for testing
//! - [`audit::RequestAuditEvent`] for tracking decisions

pub mod audit;
pub mod error;
pub mod policy;
pub mod services;
pub mod types;

// Re-export commonly used types
pub use error::{GovernanceError, Result};
pub use types::{Caller, DecisionOutcome, RequestStatus, Role};

// Re-export service types
pub use services::{
    AccessRequest, Account, AccountService, AccountStore, CreateAccessRequestInput,
    InMemoryAccountStore, InMemoryRequestStore, NewAccessRequest, NewAccount, RequestService,
    RequestStore,
};

// Re-export audit types
pub use audit::{AuditStore, InMemoryAuditStore, RequestAuditAction, RequestAuditEvent};
