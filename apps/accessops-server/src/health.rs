//! Service health endpoint.
//!
//! `GET /health` answers without authentication so load balancers and
//! orchestrators can probe the service. Database connectivity is reported
//! in the body; a failing probe never turns into an error status.

use std::time::Instant;

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use accessops_db::DbPool;

/// Health report returned by `GET /health`.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall service status ("healthy" or "degraded").
    pub status: String,
    /// Running server version.
    pub version: String,
    /// Seconds since the server started.
    pub uptime_seconds: u64,
    /// Database connectivity ("ok" / "error"), or null when no pool is wired.
    pub database: Option<String>,
    /// When the report was generated.
    pub timestamp: DateTime<Utc>,
}

/// Shared state for the health endpoint.
#[derive(Clone)]
pub struct HealthState {
    started_at: Instant,
    pool: Option<DbPool>,
}

impl HealthState {
    /// Create health state, optionally wired to the database pool.
    #[must_use]
    pub fn new(pool: Option<DbPool>) -> Self {
        Self {
            started_at: Instant::now(),
            pool,
        }
    }
}

/// Health check handler.
#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service health report", body = HealthResponse)
    ),
    tag = "Health"
)]
pub async fn health_handler(State(state): State<HealthState>) -> Json<HealthResponse> {
    let database = match &state.pool {
        Some(pool) => match sqlx::query("SELECT 1").execute(pool.inner()).await {
            Ok(_) => Some("ok".to_string()),
            Err(e) => {
                tracing::error!("Health check database probe failed: {e}");
                Some("error".to_string())
            }
        },
        None => None,
    };

    let status = if database.as_deref() == Some("error") {
        "degraded"
    } else {
        "healthy"
    };

    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        database,
        timestamp: Utc::now(),
    })
}
