//! Common test utilities for accessops-governance integration tests.
//!
//! This module provides shared fixtures for integration testing the
//! governance crate. All tests use in-memory stores for isolation and
//! speed.

#![allow(dead_code)]

use std::sync::Arc;

use uuid::Uuid;

use accessops_governance::audit::InMemoryAuditStore;
use accessops_governance::services::accounts::{AccountService, InMemoryAccountStore};
use accessops_governance::services::requests::{
    CreateAccessRequestInput, InMemoryRequestStore, RequestService,
};
use accessops_governance::types::{Caller, Role};

/// All the in-memory stores backing a test run.
#[derive(Clone)]
pub struct TestStores {
    pub request_store: Arc<InMemoryRequestStore>,
    pub account_store: Arc<InMemoryAccountStore>,
    pub audit_store: Arc<InMemoryAuditStore>,
}

impl TestStores {
    /// Create a new set of isolated test stores.
    pub fn new() -> Self {
        Self {
            request_store: Arc::new(InMemoryRequestStore::new()),
            account_store: Arc::new(InMemoryAccountStore::new()),
            audit_store: Arc::new(InMemoryAuditStore::new()),
        }
    }
}

impl Default for TestStores {
    fn default() -> Self {
        Self::new()
    }
}

/// All governance services for integration testing.
pub struct TestServices {
    pub requests: RequestService,
    pub accounts: AccountService,
}

impl TestServices {
    /// Create a new set of services backed by the provided stores.
    pub fn new(stores: &TestStores) -> Self {
        Self {
            requests: RequestService::new(
                stores.request_store.clone(),
                stores.audit_store.clone(),
            ),
            accounts: AccountService::new(stores.account_store.clone()),
        }
    }
}

/// Test context containing stores, services, and two callers.
pub struct TestContext {
    pub stores: TestStores,
    pub services: TestServices,
    pub requester: Caller,
    pub approver: Caller,
}

impl TestContext {
    /// Create a new isolated test context with one caller per role.
    pub fn new() -> Self {
        let stores = TestStores::new();
        let services = TestServices::new(&stores);
        Self {
            stores,
            services,
            requester: Caller::new(Uuid::new_v4(), Role::Requester),
            approver: Caller::new(Uuid::new_v4(), Role::Approver),
        }
    }

    /// A second caller with the requester role.
    pub fn other_requester(&self) -> Caller {
        Caller::new(Uuid::new_v4(), Role::Requester)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A request payload with distinct, recognizable values.
pub fn sample_input() -> CreateAccessRequestInput {
    CreateAccessRequestInput {
        resource: "prod-db".to_string(),
        action: "read".to_string(),
        justification: Some("oncall investigation".to_string()),
    }
}
