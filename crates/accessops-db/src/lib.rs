//! Postgres persistence for the access request service.
//!
//! Provides the connection pool, embedded schema migrations, and Postgres
//! implementations of the store traits defined in `accessops-governance`.
//!
//! # Features
//!
//! - Connection pool management with sane defaults
//! - Versioned SQL migrations embedded at compile time
//! - `PostgresAccountStore`, `PostgresRequestStore` and `PostgresAuditStore`
//! - Atomic status transitions so concurrent decisions cannot both win

pub mod error;
pub mod migrations;
pub mod pool;
pub mod stores;

// Re-export commonly used types
pub use error::DbError;
pub use migrations::run_migrations;
pub use pool::DbPool;
pub use stores::{PostgresAccountStore, PostgresAuditStore, PostgresRequestStore};
