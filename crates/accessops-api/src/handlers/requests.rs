//! HTTP handlers for the access request endpoints.
//!
//! All routes here sit behind the JWT middleware, which resolves the
//! bearer token into the [`Caller`] extension consumed by every handler.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;
use validator::Validate;

use accessops_governance::{Caller, DecisionOutcome};

use crate::error::{ApiError, ApiResult};
use crate::models::{AccessRequestResponse, CreateAccessRequestRequest};
use crate::router::AppState;

/// Submit a new access request.
///
/// # Errors
///
/// - 400 Bad Request: Resource or action is blank
/// - 401 Unauthorized: Missing or invalid token
/// - 403 Forbidden: Caller is not a requester
/// - 422 Unprocessable Entity: Field length violations
#[utoipa::path(
    post,
    path = "/requests",
    request_body = CreateAccessRequestRequest,
    responses(
        (status = 201, description = "Access request created", body = AccessRequestResponse),
        (status = 400, description = "Blank resource or action"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not a requester"),
        (status = 422, description = "Validation error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Access Requests"
)]
pub async fn create_request(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Json(request): Json<CreateAccessRequestRequest>,
) -> ApiResult<(StatusCode, Json<AccessRequestResponse>)> {
    request.validate()?;

    let created = state.request_service.create(caller, request.into()).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// List requests visible to the caller, newest first.
///
/// Requesters see their own requests; approvers see every request.
#[utoipa::path(
    get,
    path = "/requests",
    responses(
        (status = 200, description = "Requests visible to the caller", body = Vec<AccessRequestResponse>),
        (status = 401, description = "Missing or invalid token"),
    ),
    security(("bearer_auth" = [])),
    tag = "Access Requests"
)]
pub async fn list_requests(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<Vec<AccessRequestResponse>>> {
    let requests = state.request_service.list_mine(caller).await?;

    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// List the pending queue, oldest first.
///
/// # Errors
///
/// - 401 Unauthorized: Missing or invalid token
/// - 403 Forbidden: Caller is not an approver
#[utoipa::path(
    get,
    path = "/requests/pending",
    responses(
        (status = 200, description = "Pending requests", body = Vec<AccessRequestResponse>),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an approver"),
    ),
    security(("bearer_auth" = [])),
    tag = "Access Requests"
)]
pub async fn list_pending(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
) -> ApiResult<Json<Vec<AccessRequestResponse>>> {
    let requests = state.request_service.list_pending(caller).await?;

    Ok(Json(requests.into_iter().map(Into::into).collect()))
}

/// Approve a pending request.
///
/// # Errors
///
/// - 400 Bad Request: Malformed request id
/// - 401 Unauthorized: Missing or invalid token
/// - 403 Forbidden: Caller is not an approver
/// - 404 Not Found: No such request
/// - 409 Conflict: Request already decided
#[utoipa::path(
    patch,
    path = "/requests/{id}/approve",
    params(
        ("id" = String, Path, description = "Access request ID")
    ),
    responses(
        (status = 200, description = "Request approved", body = AccessRequestResponse),
        (status = 400, description = "Malformed request id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an approver"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided"),
    ),
    security(("bearer_auth" = [])),
    tag = "Access Requests"
)]
pub async fn approve_request(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ApiResult<Json<AccessRequestResponse>> {
    let request_id = parse_request_id(&id)?;

    let decided = state
        .request_service
        .decide(caller, request_id, DecisionOutcome::Approve)
        .await?;

    Ok(Json(decided.into()))
}

/// Reject a pending request.
///
/// # Errors
///
/// - 400 Bad Request: Malformed request id
/// - 401 Unauthorized: Missing or invalid token
/// - 403 Forbidden: Caller is not an approver
/// - 404 Not Found: No such request
/// - 409 Conflict: Request already decided
#[utoipa::path(
    patch,
    path = "/requests/{id}/reject",
    params(
        ("id" = String, Path, description = "Access request ID")
    ),
    responses(
        (status = 200, description = "Request rejected", body = AccessRequestResponse),
        (status = 400, description = "Malformed request id"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Caller is not an approver"),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request already decided"),
    ),
    security(("bearer_auth" = [])),
    tag = "Access Requests"
)]
pub async fn reject_request(
    State(state): State<AppState>,
    Extension(caller): Extension<Caller>,
    Path(id): Path<String>,
) -> ApiResult<Json<AccessRequestResponse>> {
    let request_id = parse_request_id(&id)?;

    let decided = state
        .request_service
        .decide(caller, request_id, DecisionOutcome::Reject)
        .await?;

    Ok(Json(decided.into()))
}

/// Parse the request id path segment.
///
/// A typed `Path<Uuid>` extractor would reject malformed ids with axum's
/// plain-text body; parsing by hand keeps the response in the error
/// envelope.
fn parse_request_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::InvalidRequestId(raw.to_string()))
}
