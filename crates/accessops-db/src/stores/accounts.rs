//! Postgres-backed account store.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use accessops_governance::error::{GovernanceError, Result};
use accessops_governance::services::accounts::{Account, AccountStore, NewAccount};

/// Account store backed by the `accounts` table.
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    /// Create a new store over the given pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn insert(&self, new_account: NewAccount) -> Result<Account> {
        let row: Option<Account> = sqlx::query_as(
            r#"
            INSERT INTO accounts (email, password_hash, display_name, role)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (email) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(&new_account.email)
        .bind(&new_account.password_hash)
        .bind(&new_account.display_name)
        .bind(new_account.role)
        .fetch_optional(&self.pool)
        .await?;

        // No row back means a concurrent insert with the same email won.
        row.ok_or(GovernanceError::EmailExists(new_account.email))
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        let row = sqlx::query_as(
            r#"
            SELECT * FROM accounts
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}
