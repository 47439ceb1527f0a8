//! Postgres implementations of the governance store traits.
//!
//! Each store wraps a connection pool and translates between the domain
//! types and the underlying tables. Query failures surface through the
//! traits as `GovernanceError::Database`.

pub mod accounts;
pub mod audit;
pub mod requests;

pub use accounts::PostgresAccountStore;
pub use audit::PostgresAuditStore;
pub use requests::PostgresRequestStore;
