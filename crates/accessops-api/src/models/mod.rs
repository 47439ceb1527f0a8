//! Request and response models for the access request API.
//!
//! Each endpoint's payloads live next to each other:
//! - [`auth`] - registration and login DTOs
//! - [`requests`] - access request DTOs

pub mod auth;
pub mod requests;

pub use auth::{LoginRequest, RegisterRequest, RegisterResponse, TokenResponse};
pub use requests::{AccessRequestResponse, CreateAccessRequestRequest};
