//! Integration tests for the access request endpoints.
//!
//! Tokens are minted directly against the shared test secret; the
//! handlers trust claims alone, so no accounts need to exist.

mod common;

use axum::http::{header, StatusCode};
use axum::{body::Body, http::Request};
use serde_json::json;
use tower::ServiceExt;
use uuid::Uuid;

use accessops_governance::{RequestAuditAction, RequestStatus, RequestStore, Role};

use common::{bare_request, bearer_token, body_json, json_request, test_app};

fn create_payload() -> serde_json::Value {
    json!({
        "resource": "prod-db",
        "action": "read",
        "justification": "oncall investigation"
    })
}

#[tokio::test]
async fn test_create_request_round_trip() {
    let app = test_app();
    let requester_id = Uuid::new_v4();
    let token = bearer_token(requester_id, Role::Requester);

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&token),
            &create_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let body = body_json(response).await;
    assert_eq!(body["requester_id"], requester_id.to_string());
    assert_eq!(body["resource"], "prod-db");
    assert_eq!(body["action"], "read");
    assert_eq!(body["justification"], "oncall investigation");
    assert_eq!(body["status"], "PENDING");
    assert!(body["decided_by"].is_null());
    assert!(body["decided_at"].is_null());
    assert_eq!(body.as_object().unwrap().len(), 9);
}

#[tokio::test]
async fn test_create_request_without_token() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request("POST", "/requests", None, &create_payload()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Missing token");
}

#[tokio::test]
async fn test_create_request_with_garbage_token() {
    let app = test_app();

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/requests",
            Some("not-a-jwt"),
            &create_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Invalid token");
}

#[tokio::test]
async fn test_create_request_with_non_bearer_scheme() {
    let app = test_app();

    let request = Request::builder()
        .method("POST")
        .uri("/requests")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, "Basic YWxpY2U6cGFzcw==")
        .body(Body::from(serde_json::to_vec(&create_payload()).unwrap()))
        .unwrap();

    let response = app.router.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Missing token");
}

#[tokio::test]
async fn test_create_request_empty_resource() {
    let app = test_app();
    let token = bearer_token(Uuid::new_v4(), Role::Requester);

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&token),
            &json!({"resource": "", "action": "read"}),
        ))
        .await
        .unwrap();

    // The empty string fails DTO validation before the engine sees it
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["detail"][0]["msg"], "Resource must be 1-255 characters");
}

#[tokio::test]
async fn test_create_request_blank_resource() {
    let app = test_app();
    let token = bearer_token(Uuid::new_v4(), Role::Requester);

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&token),
            &json!({"resource": "   ", "action": "read"}),
        ))
        .await
        .unwrap();

    // Whitespace passes the length check and is caught by the engine
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "resource must not be empty");
}

#[tokio::test]
async fn test_create_request_blank_action() {
    let app = test_app();
    let token = bearer_token(Uuid::new_v4(), Role::Requester);

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&token),
            &json!({"resource": "prod-db", "action": "   "}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "action must not be empty");
}

#[tokio::test]
async fn test_approver_cannot_create_request() {
    let app = test_app();
    let token = bearer_token(Uuid::new_v4(), Role::Approver);

    let response = app
        .router
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&token),
            &create_payload(),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Forbidden");
}

#[tokio::test]
async fn test_list_requests_scoped_to_caller() {
    let app = test_app();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();
    let alice_token = bearer_token(alice, Role::Requester);
    let bob_token = bearer_token(bob, Role::Requester);

    for resource in ["prod-db", "staging-db"] {
        app.router
            .clone()
            .oneshot(json_request(
                "POST",
                "/requests",
                Some(&alice_token),
                &json!({"resource": resource, "action": "read"}),
            ))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }
    app.router
        .clone()
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&bob_token),
            &json!({"resource": "billing", "action": "write"}),
        ))
        .await
        .unwrap();

    let response = app
        .router
        .clone()
        .oneshot(bare_request("GET", "/requests", Some(&alice_token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    // Newest first
    assert_eq!(items[0]["resource"], "staging-db");
    assert_eq!(items[1]["resource"], "prod-db");

    let response = app
        .router
        .clone()
        .oneshot(bare_request("GET", "/requests", Some(&bob_token)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 1);

    // Approvers see every request
    let approver_token = bearer_token(Uuid::new_v4(), Role::Approver);
    let response = app
        .router
        .oneshot(bare_request("GET", "/requests", Some(&approver_token)))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body.as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_list_pending_oldest_first() {
    let app = test_app();
    let requester_token = bearer_token(Uuid::new_v4(), Role::Requester);
    let approver_token = bearer_token(Uuid::new_v4(), Role::Approver);

    for resource in ["first", "second"] {
        app.router
            .clone()
            .oneshot(json_request(
                "POST",
                "/requests",
                Some(&requester_token),
                &json!({"resource": resource, "action": "read"}),
            ))
            .await
            .unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    }

    let response = app
        .router
        .oneshot(bare_request("GET", "/requests/pending", Some(&approver_token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    let items = body.as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["resource"], "first");
    assert_eq!(items[1]["resource"], "second");
}

#[tokio::test]
async fn test_requester_cannot_list_pending() {
    let app = test_app();
    let token = bearer_token(Uuid::new_v4(), Role::Requester);

    let response = app
        .router
        .oneshot(bare_request("GET", "/requests/pending", Some(&token)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Forbidden");
}

#[tokio::test]
async fn test_approve_request_stamps_decision() {
    let app = test_app();
    let requester_id = Uuid::new_v4();
    let approver_id = Uuid::new_v4();
    let requester_token = bearer_token(requester_id, Role::Requester);
    let approver_token = bearer_token(approver_id, Role::Approver);

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&requester_token),
            &create_payload(),
        ))
        .await
        .unwrap();
    let request_id = body_json(created).await["id"].as_str().unwrap().to_string();

    let response = app
        .router
        .oneshot(bare_request(
            "PATCH",
            &format!("/requests/{request_id}/approve"),
            Some(&approver_token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "APPROVED");
    assert_eq!(body["decided_by"], approver_id.to_string());
    assert!(!body["decided_at"].is_null());

    // The decision leaves an audit trail
    let events = app.audit_store.get_all();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, RequestAuditAction::Approved);
    assert_eq!(events[0].actor_id, approver_id);
    assert_eq!(events[0].entity_id.to_string(), request_id);
    assert_eq!(events[0].details["requester_id"], requester_id.to_string());
    assert_eq!(events[0].details["previous_status"], "PENDING");
    assert_eq!(events[0].details["new_status"], "APPROVED");
}

#[tokio::test]
async fn test_reject_request_stamps_decision() {
    let app = test_app();
    let requester_token = bearer_token(Uuid::new_v4(), Role::Requester);
    let approver_token = bearer_token(Uuid::new_v4(), Role::Approver);

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&requester_token),
            &create_payload(),
        ))
        .await
        .unwrap();
    let request_id = body_json(created).await["id"].as_str().unwrap().to_string();

    let response = app
        .router
        .oneshot(bare_request(
            "PATCH",
            &format!("/requests/{request_id}/reject"),
            Some(&approver_token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "REJECTED");

    let events = app.audit_store.get_all();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].action, RequestAuditAction::Rejected);
    assert_eq!(events[0].details["new_status"], "REJECTED");
}

#[tokio::test]
async fn test_decide_twice_conflicts() {
    let app = test_app();
    let requester_token = bearer_token(Uuid::new_v4(), Role::Requester);
    let approver_token = bearer_token(Uuid::new_v4(), Role::Approver);

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&requester_token),
            &create_payload(),
        ))
        .await
        .unwrap();
    let request_id = body_json(created).await["id"].as_str().unwrap().to_string();

    let first = app
        .router
        .clone()
        .oneshot(bare_request(
            "PATCH",
            &format!("/requests/{request_id}/approve"),
            Some(&approver_token),
        ))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    // The second decision finds a request that is no longer pending
    let second = app
        .router
        .oneshot(bare_request(
            "PATCH",
            &format!("/requests/{request_id}/reject"),
            Some(&approver_token),
        ))
        .await
        .unwrap();

    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body = body_json(second).await;
    assert_eq!(body["detail"], "Request not pending");

    // The stored row kept the first decision and no second event was written
    let stored = app
        .request_store
        .get_by_id(Uuid::parse_str(&request_id).unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.status, RequestStatus::Approved);
    assert_eq!(app.audit_store.count().await, 1);
}

#[tokio::test]
async fn test_decide_unknown_request() {
    let app = test_app();
    let token = bearer_token(Uuid::new_v4(), Role::Approver);

    let response = app
        .router
        .oneshot(bare_request(
            "PATCH",
            &format!("/requests/{}/approve", Uuid::new_v4()),
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Request not found");
}

#[tokio::test]
async fn test_decide_malformed_id() {
    let app = test_app();
    let token = bearer_token(Uuid::new_v4(), Role::Approver);

    let response = app
        .router
        .oneshot(bare_request(
            "PATCH",
            "/requests/not-a-uuid/approve",
            Some(&token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Invalid request id");
}

#[tokio::test]
async fn test_requester_cannot_decide() {
    let app = test_app();
    let requester_token = bearer_token(Uuid::new_v4(), Role::Requester);

    let created = app
        .router
        .clone()
        .oneshot(json_request(
            "POST",
            "/requests",
            Some(&requester_token),
            &create_payload(),
        ))
        .await
        .unwrap();
    let request_id = body_json(created).await["id"].as_str().unwrap().to_string();

    let response = app
        .router
        .oneshot(bare_request(
            "PATCH",
            &format!("/requests/{request_id}/approve"),
            Some(&requester_token),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Forbidden");
}
