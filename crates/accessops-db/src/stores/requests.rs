//! Postgres-backed access request store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use accessops_governance::error::Result;
use accessops_governance::services::requests::{AccessRequest, NewAccessRequest, RequestStore};
use accessops_governance::types::RequestStatus;

/// Request store backed by the `access_requests` table.
pub struct PostgresRequestStore {
    pool: PgPool,
}

impl PostgresRequestStore {
    /// Create a new store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for PostgresRequestStore {
    async fn insert(&self, new_request: NewAccessRequest) -> Result<AccessRequest> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO access_requests (requester_id, resource, action, justification)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(new_request.requester_id)
        .bind(&new_request.resource)
        .bind(&new_request.action)
        .bind(&new_request.justification)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<AccessRequest>> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM access_requests
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn list_by_requester(&self, requester_id: Uuid) -> Result<Vec<AccessRequest>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM access_requests
            WHERE requester_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(requester_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_all(&self) -> Result<Vec<AccessRequest>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM access_requests
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_by_status(&self, status: RequestStatus) -> Result<Vec<AccessRequest>> {
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM access_requests
            WHERE status = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(status)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn conditional_update_status(
        &self,
        id: Uuid,
        expected: RequestStatus,
        new_status: RequestStatus,
        decided_by: Uuid,
        decided_at: DateTime<Utc>,
    ) -> Result<Option<AccessRequest>> {
        // The WHERE clause makes the status transition atomic: of two
        // concurrent decisions, only one matches the expected status.
        let row = sqlx::query_as(
            r#"
            UPDATE access_requests
            SET status = $3, decided_by = $4, decided_at = $5
            WHERE id = $1 AND status = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(expected)
        .bind(new_status)
        .bind(decided_by)
        .bind(decided_at)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
