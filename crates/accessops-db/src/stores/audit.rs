//! Postgres-backed audit event store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use accessops_governance::audit::{
    AuditEventFilter, AuditStore, RequestAuditEvent, RequestAuditEventInput,
};
use accessops_governance::error::Result;

/// Audit store backed by the `audit_events` table.
pub struct PostgresAuditStore {
    pool: PgPool,
}

impl PostgresAuditStore {
    /// Create a new store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditStore for PostgresAuditStore {
    async fn log_event(&self, input: RequestAuditEventInput) -> Result<RequestAuditEvent> {
        let row = sqlx::query_as(
            r#"
            INSERT INTO audit_events (actor_id, action, entity_type, entity_id, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(input.actor_id)
        .bind(input.action)
        .bind(&input.entity_type)
        .bind(input.entity_id)
        .bind(&input.details)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn query_events(&self, filter: AuditEventFilter) -> Result<Vec<RequestAuditEvent>> {
        let limit = filter.limit.map(|n| n as i64);
        let offset = filter.offset.map(|n| n as i64);

        // NULL parameters disable their filter; LIMIT NULL and OFFSET NULL
        // are the same as omitting the clause.
        let rows = sqlx::query_as(
            r#"
            SELECT * FROM audit_events
            WHERE ($1::uuid IS NULL OR entity_id = $1)
              AND ($2::uuid IS NULL OR actor_id = $2)
              AND ($3::text IS NULL OR action = $3)
              AND ($4::timestamptz IS NULL OR created_at >= $4)
              AND ($5::timestamptz IS NULL OR created_at <= $5)
            ORDER BY created_at DESC
            LIMIT $6 OFFSET $7
            "#,
        )
        .bind(filter.entity_id)
        .bind(filter.actor_id)
        .bind(filter.action.map(|a| a.to_string()))
        .bind(filter.from_date)
        .bind(filter.to_date)
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn get_event(&self, event_id: Uuid) -> Result<Option<RequestAuditEvent>> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM audit_events
            WHERE id = $1
            "#,
        )
        .bind(event_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

#[cfg(test)]
mod tests {
    // Store tests require a real database and are in integration tests
}
