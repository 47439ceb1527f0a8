//! HTTP handlers for the access request API.
//!
//! Each handler corresponds to an API endpoint:
//! - `register` - POST /auth/register
//! - `login` - POST /auth/login
//! - `create_request` - POST /requests
//! - `list_requests` - GET /requests
//! - `list_pending` - GET /requests/pending
//! - `approve_request` - PATCH /requests/{id}/approve
//! - `reject_request` - PATCH /requests/{id}/reject

pub mod auth;
pub mod requests;

pub use auth::{login, register};
pub use requests::{approve_request, create_request, list_pending, list_requests, reject_request};
