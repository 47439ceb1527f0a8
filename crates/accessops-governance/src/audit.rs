//! Audit logging for access request decisions.
//!
//! Every decision on an access request produces an immutable audit event
//! capturing who acted, what they did, and the state transition. Events
//! are append-only; nothing in this module updates or deletes them.
//!
//! # Example
//!
//! ```rust,ignore
//! use accessops_governance::audit::{
//!     AuditStore, InMemoryAuditStore, RequestAuditAction, RequestAuditEventInput,
//!     ENTITY_ACCESS_REQUEST,
//! };
//! use std::sync::Arc;
//! use uuid::Uuid;
//!
//! let store = Arc::new(InMemoryAuditStore::new());
//! let input = RequestAuditEventInput {
//!     actor_id: Uuid::new_v4(),
//!     action: RequestAuditAction::Approved,
//!     entity_type: ENTITY_ACCESS_REQUEST.to_string(),
//!     entity_id: Uuid::new_v4(),
//!     ..Default::default()
//! };
//! let event = store.log_event(input).await?;
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::Result;

/// Entity type recorded on events about access requests.
pub const ENTITY_ACCESS_REQUEST: &str = "access_request";

/// Action recorded when a request is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, sqlx::Type)]
#[sqlx(type_name = "varchar")]
pub enum RequestAuditAction {
    /// The request was approved.
    #[default]
    #[serde(rename = "access_request.approved")]
    #[sqlx(rename = "access_request.approved")]
    Approved,
    /// The request was rejected.
    #[serde(rename = "access_request.rejected")]
    #[sqlx(rename = "access_request.rejected")]
    Rejected,
}

impl std::fmt::Display for RequestAuditAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Approved => write!(f, "access_request.approved"),
            Self::Rejected => write!(f, "access_request.rejected"),
        }
    }
}

/// An audit event recording a decision on an access request.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct RequestAuditEvent {
    /// Unique identifier for the event.
    pub id: Uuid,
    /// Account that performed the action.
    pub actor_id: Uuid,
    /// Action performed.
    pub action: RequestAuditAction,
    /// Kind of entity the event is about.
    pub entity_type: String,
    /// The entity involved.
    pub entity_id: Uuid,
    /// Action-specific detail payload (JSON).
    pub details: serde_json::Value,
    /// When the event occurred.
    pub created_at: DateTime<Utc>,
}

/// Input for creating an audit event.
#[derive(Debug, Clone, Default)]
pub struct RequestAuditEventInput {
    /// Account that performed the action.
    pub actor_id: Uuid,
    /// Action performed.
    pub action: RequestAuditAction,
    /// Kind of entity the event is about.
    pub entity_type: String,
    /// The entity involved.
    pub entity_id: Uuid,
    /// Action-specific detail payload (JSON).
    pub details: serde_json::Value,
}

/// Filter for querying audit events.
#[derive(Debug, Clone, Default)]
pub struct AuditEventFilter {
    /// Filter by the entity the event is about.
    pub entity_id: Option<Uuid>,
    /// Filter by acting account.
    pub actor_id: Option<Uuid>,
    /// Filter by action type.
    pub action: Option<RequestAuditAction>,
    /// Filter by events after this date.
    pub from_date: Option<DateTime<Utc>>,
    /// Filter by events before this date.
    pub to_date: Option<DateTime<Utc>>,
    /// Maximum number of results.
    pub limit: Option<usize>,
    /// Number of results to skip.
    pub offset: Option<usize>,
}

/// Trait for audit event storage backends.
#[async_trait::async_trait]
pub trait AuditStore: Send + Sync {
    /// Log an audit event.
    async fn log_event(&self, input: RequestAuditEventInput) -> Result<RequestAuditEvent>;

    /// Query audit events, most recent first.
    async fn query_events(&self, filter: AuditEventFilter) -> Result<Vec<RequestAuditEvent>>;

    /// Get a specific audit event by ID.
    async fn get_event(&self, event_id: Uuid) -> Result<Option<RequestAuditEvent>>;
}

/// In-memory audit store for testing.
#[derive(Debug, Default)]
pub struct InMemoryAuditStore {
    events: Arc<RwLock<Vec<RequestAuditEvent>>>,
}

impl InMemoryAuditStore {
    /// Create a new in-memory audit store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            events: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Get the count of events in the store.
    pub async fn count(&self) -> usize {
        self.events.read().await.len()
    }

    /// Clear all events (for testing).
    pub async fn clear(&self) {
        self.events.write().await.clear();
    }

    /// Get all events (for testing).
    #[must_use]
    pub fn get_all(&self) -> Vec<RequestAuditEvent> {
        // Use try_read to avoid blocking
        self.events
            .try_read()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

#[async_trait::async_trait]
impl AuditStore for InMemoryAuditStore {
    async fn log_event(&self, input: RequestAuditEventInput) -> Result<RequestAuditEvent> {
        let event = RequestAuditEvent {
            id: Uuid::new_v4(),
            actor_id: input.actor_id,
            action: input.action,
            entity_type: input.entity_type,
            entity_id: input.entity_id,
            details: input.details,
            created_at: Utc::now(),
        };

        self.events.write().await.push(event.clone());
        Ok(event)
    }

    async fn query_events(&self, filter: AuditEventFilter) -> Result<Vec<RequestAuditEvent>> {
        let events = self.events.read().await;
        let mut results: Vec<_> = events
            .iter()
            .filter(|e| filter.entity_id.is_none_or(|id| e.entity_id == id))
            .filter(|e| filter.actor_id.is_none_or(|id| e.actor_id == id))
            .filter(|e| filter.action.is_none_or(|a| e.action == a))
            .filter(|e| filter.from_date.is_none_or(|d| e.created_at >= d))
            .filter(|e| filter.to_date.is_none_or(|d| e.created_at <= d))
            .cloned()
            .collect();

        // Sort by creation time descending (most recent first)
        results.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Apply offset and limit
        let offset = filter.offset.unwrap_or(0);
        let limit = filter.limit.unwrap_or(usize::MAX);

        Ok(results.into_iter().skip(offset).take(limit).collect())
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<RequestAuditEvent>> {
        let events = self.events.read().await;
        Ok(events.iter().find(|e| e.id == event_id).cloned())
    }
}
