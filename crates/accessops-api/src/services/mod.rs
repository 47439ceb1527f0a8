//! Business logic services for the access request API.

pub mod auth_service;

pub use auth_service::AuthService;
