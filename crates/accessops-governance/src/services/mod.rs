//! Service layer for access request governance.
//!
//! This module provides business logic services for account registration
//! and the access request lifecycle.

pub mod accounts;
pub mod requests;

// Re-export commonly used types
pub use accounts::{Account, AccountService, AccountStore, InMemoryAccountStore, NewAccount};
pub use requests::{
    AccessRequest, CreateAccessRequestInput, InMemoryRequestStore, NewAccessRequest,
    RequestService, RequestStore,
};
