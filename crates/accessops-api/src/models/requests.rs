//! Request and response models for the access request endpoints.
//!
//! This module provides the DTOs for POST /requests, the two listing
//! endpoints, and the decision endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use accessops_governance::{AccessRequest, CreateAccessRequestInput, RequestStatus};

/// Access request creation payload.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAccessRequestRequest {
    /// The resource access is requested for.
    #[validate(length(min = 1, max = 255, message = "Resource must be 1-255 characters"))]
    pub resource: String,

    /// The action or permission level requested.
    #[validate(length(min = 1, max = 64, message = "Action must be 1-64 characters"))]
    pub action: String,

    /// Free-form reason for the request.
    #[serde(default)]
    pub justification: Option<String>,
}

impl From<CreateAccessRequestRequest> for CreateAccessRequestInput {
    fn from(request: CreateAccessRequestRequest) -> Self {
        Self {
            resource: request.resource,
            action: request.action,
            justification: request.justification,
        }
    }
}

/// A single access request as returned by the API.
///
/// Decision fields are null until an approver decides the request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AccessRequestResponse {
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

impl From<AccessRequest> for AccessRequestResponse {
    fn from(request: AccessRequest) -> Self {
        Self {
            id: request.id,
            requester_id: request.requester_id,
            resource: request.resource,
            action: request.action,
            justification: request.justification,
            status: request.status,
            decided_by: request.decided_by,
            decided_at: request.decided_at,
            created_at: request.created_at,
        }
    }
}
