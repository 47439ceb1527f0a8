//! Access request service.
//!
//! This module provides the `RequestService` for the full request
//! lifecycle: creation by requesters, role-scoped listings, and one-shot
//! decisions by approvers with audit logging.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::audit::{
    AuditStore, RequestAuditAction, RequestAuditEventInput, ENTITY_ACCESS_REQUEST,
};
use crate::error::{GovernanceError, Result};
use crate::policy::{self, Operation};
use crate::types::{Caller, DecisionOutcome, RequestStatus, Role};

// ============================================================================
// Domain Types
// ============================================================================

/// A request for access to a resource.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct AccessRequest {
    /// Unique identifier.
    pub id: Uuid,
    /// Account that submitted the request.
    pub requester_id: Uuid,
    /// The resource access is requested for.
    pub resource: String,
    /// The action or permission level requested.
    pub action: String,
    /// Free-form reason for the request.
    pub justification: Option<String>,
    /// Current lifecycle status.
    pub status: RequestStatus,
    /// Approver that decided the request, if decided.
    pub decided_by: Option<Uuid>,
    /// When the decision was made, if decided.
    pub decided_at: Option<DateTime<Utc>>,
    /// When the request was submitted.
    pub created_at: DateTime<Utc>,
}

/// Input for creating an access request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAccessRequestInput {
    /// The resource access is requested for.
    pub resource: String,
    /// The action or permission level requested.
    pub action: String,
    /// Free-form reason for the request.
    pub justification: Option<String>,
}

/// A validated request ready for insertion.
#[derive(Debug, Clone)]
pub struct NewAccessRequest {
    /// Account that submitted the request.
    pub requester_id: Uuid,
    /// The resource access is requested for.
    pub resource: String,
    /// The action or permission level requested.
    pub action: String,
    /// Free-form reason for the request.
    pub justification: Option<String>,
}

// ============================================================================
// Store Trait
// ============================================================================

/// Trait for access request storage backends.
#[async_trait::async_trait]
pub trait RequestStore: Send + Sync {
    /// Insert a new pending request and return the stored row.
    async fn insert(&self, new_request: NewAccessRequest) -> Result<AccessRequest>;

    /// Get a request by ID.
    async fn get_by_id(&self, id: Uuid) -> Result<Option<AccessRequest>>;

    /// List requests submitted by an account, newest first.
    async fn list_by_requester(&self, requester_id: Uuid) -> Result<Vec<AccessRequest>>;

    /// List every request, newest first.
    async fn list_all(&self) -> Result<Vec<AccessRequest>>;

    /// List requests with the given status, oldest first.
    async fn list_by_status(&self, status: RequestStatus) -> Result<Vec<AccessRequest>>;

    /// Atomically move a request from `expected` to `new_status`, stamping
    /// the decision columns.
    ///
    /// Returns the updated row, or `None` if the request does not exist or
    /// its status no longer matches `expected`.
    async fn conditional_update_status(
        &self,
        id: Uuid,
        expected: RequestStatus,
        new_status: RequestStatus,
        decided_by: Uuid,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<AccessRequest>>;
}

// ============================================================================
// In-Memory Store (for testing)
// ============================================================================

/// In-memory request store for testing.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    requests: Arc<RwLock<HashMap<Uuid, AccessRequest>>>,
}

impl InMemoryRequestStore {
    /// Create a new in-memory request store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            requests: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the count of stored requests.
    pub async fn count(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Clear all requests (for testing).
    pub async fn clear(&self) {
        self.requests.write().await.clear();
    }
}

#[async_trait::async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn insert(&self, new_request: NewAccessRequest) -> Result<AccessRequest> {
        let request = AccessRequest {
            id: Uuid::new_v4(),
            requester_id: new_request.requester_id,
            resource: new_request.resource,
            action: new_request.action,
            justification: new_request.justification,
            status: RequestStatus::Pending,
            decided_by: None,
            decided_at: None,
            created_at: Utc::now(),
        };

        self.requests.write().await.insert(request.id, request.clone());
        Ok(request)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<AccessRequest>> {
        Ok(self.requests.read().await.get(&id).cloned())
    }

    async fn list_by_requester(&self, requester_id: Uuid) -> Result<Vec<AccessRequest>> {
        let requests = self.requests.read().await;
        let mut results: Vec<_> = requests
            .values()
            .filter(|r| r.requester_id == requester_id)
            .cloned()
            .collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }

    async fn list_all(&self) -> Result<Vec<AccessRequest>> {
        let requests = self.requests.read().await;
        let mut results: Vec<_> = requests.values().cloned().collect();
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(results)
    }

    async fn list_by_status(&self, status: RequestStatus) -> Result<Vec<AccessRequest>> {
        let requests = self.requests.read().await;
        let mut results: Vec<_> = requests
            .values()
            .filter(|r| r.status == status)
            .cloned()
            .collect();
        results.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(results)
    }

    async fn conditional_update_status(
        &self,
        id: Uuid,
        expected: RequestStatus,
        new_status: RequestStatus,
        decided_by: Uuid,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<AccessRequest>> {
        let mut requests = self.requests.write().await;
        match requests.get_mut(&id) {
            Some(request) if request.status == expected => {
                request.status = new_status;
                request.decided_by = Some(decided_by);
                request.decided_at = Some(decided_at);
                Ok(Some(request.clone()))
            }
            _ => Ok(None),
        }
    }
}

// ============================================================================
// Service
// ============================================================================

/// Service for the access request lifecycle.
pub struct RequestService {
    store: Arc<dyn RequestStore>,
    audit_store: Arc<dyn AuditStore>,
}

impl RequestService {
    /// Create a new request service.
    pub fn new(store: Arc<dyn RequestStore>, audit_store: Arc<dyn AuditStore>) -> Self {
        Self { store, audit_store }
    }

    /// Create a new access request on behalf of the caller.
    pub async fn create(
        &self,
        caller: Caller,
        input: CreateAccessRequestInput,
    ) -> Result<AccessRequest> {
        self.authorize(caller, Operation::CreateRequest)?;

        if input.resource.trim().is_empty() {
            return Err(GovernanceError::Validation(
                "resource must not be empty".to_string(),
            ));
        }
        if input.action.trim().is_empty() {
            return Err(GovernanceError::Validation(
                "action must not be empty".to_string(),
            ));
        }

        let request = self
            .store
            .insert(NewAccessRequest {
                requester_id: caller.account_id,
                resource: input.resource,
                action: input.action,
                justification: input.justification,
            })
            .await?;

        tracing::info!(
            request_id = %request.id,
            requester_id = %request.requester_id,
            resource = %request.resource,
            "access request created"
        );

        Ok(request)
    }

    /// List requests visible to the caller, newest first.
    ///
    /// Requesters see only their own requests; approvers see every request.
    pub async fn list_mine(&self, caller: Caller) -> Result<Vec<AccessRequest>> {
        self.authorize(caller, Operation::ListOwnRequests)?;

        match caller.role {
            Role::Requester => self.store.list_by_requester(caller.account_id).await,
            Role::Approver => self.store.list_all().await,
        }
    }

    /// List pending requests in queue order, oldest first.
    pub async fn list_pending(&self, caller: Caller) -> Result<Vec<AccessRequest>> {
        self.authorize(caller, Operation::ListPendingRequests)?;

        self.store.list_by_status(RequestStatus::Pending).await
    }

    /// Decide a pending request, moving it to its terminal status.
    ///
    /// A request can be decided exactly once. Concurrent decisions race on
    /// a conditional status update; the loser observes the winner's status.
    pub async fn decide(
        &self,
        caller: Caller,
        request_id: Uuid,
        outcome: DecisionOutcome,
    ) -> Result<AccessRequest> {
        self.authorize(caller, Operation::DecideRequest)?;

        let existing = self
            .store
            .get_by_id(request_id)
            .await?
            .ok_or(GovernanceError::RequestNotFound(request_id))?;
        if existing.status.is_terminal() {
            return Err(GovernanceError::AlreadyDecided {
                id: request_id,
                status: existing.status,
            });
        }

        let updated = self
            .store
            .conditional_update_status(
                request_id,
                RequestStatus::Pending,
                outcome.terminal_status(),
                caller.account_id,
                Utc::now(),
            )
            .await?;

        let Some(updated) = updated else {
            // Another decision won the race; report the current status.
            let current = self
                .store
                .get_by_id(request_id)
                .await?
                .ok_or(GovernanceError::RequestNotFound(request_id))?;
            return Err(GovernanceError::AlreadyDecided {
                id: request_id,
                status: current.status,
            });
        };

        self.log_decision(caller, &updated, outcome).await;

        tracing::info!(
            request_id = %updated.id,
            approver_id = %caller.account_id,
            outcome = %outcome,
            "access request decided"
        );

        Ok(updated)
    }

    fn authorize(&self, caller: Caller, operation: Operation) -> Result<()> {
        if policy::allow(caller.role, operation) {
            Ok(())
        } else {
            tracing::warn!(
                account_id = %caller.account_id,
                role = %caller.role,
                operation = %operation,
                "operation denied"
            );
            Err(GovernanceError::Forbidden(format!(
                "{} may not {}",
                caller.role, operation
            )))
        }
    }

    /// Record the decision in the audit trail.
    ///
    /// The decision stands even if the audit write fails; failures are
    /// logged and never surfaced to the caller.
    async fn log_decision(
        &self,
        caller: Caller,
        request: &AccessRequest,
        outcome: DecisionOutcome,
    ) {
        let action = match outcome {
            DecisionOutcome::Approve => RequestAuditAction::Approved,
            DecisionOutcome::Reject => RequestAuditAction::Rejected,
        };

        let input = RequestAuditEventInput {
            actor_id: caller.account_id,
            action,
            entity_type: ENTITY_ACCESS_REQUEST.to_string(),
            entity_id: request.id,
            details: json!({
                "requester_id": request.requester_id,
                "resource": request.resource,
                "action": request.action,
                "previous_status": RequestStatus::Pending,
                "new_status": request.status,
            }),
        };

        if let Err(err) = self.audit_store.log_event(input).await {
            tracing::warn!(
                request_id = %request.id,
                error = %err,
                "failed to record audit event"
            );
        }
    }
}
