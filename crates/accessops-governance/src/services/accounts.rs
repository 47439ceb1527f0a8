//! Account service.
//!
//! This module provides the `AccountService` for registering accounts and
//! looking them up during authentication. Password hashing happens in the
//! callers; this service only ever sees finished hashes.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::error::{GovernanceError, Result};
use crate::types::Role;

// ============================================================================
// Domain Types
// ============================================================================

/// A registered account.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct Account {
    /// Unique identifier.
    pub id: Uuid,
    /// Login email, stored lowercase.
    pub email: String,
    /// Argon2 hash of the account password.
    pub password_hash: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// The account's role.
    pub role: Role,
    /// When the account was registered.
    pub created_at: DateTime<Utc>,
}

/// Input for registering an account.
#[derive(Debug, Clone)]
pub struct NewAccount {
    /// Login email.
    pub email: String,
    /// Argon2 hash of the account password.
    pub password_hash: String,
    /// Optional display name.
    pub display_name: Option<String>,
    /// The account's role.
    pub role: Role,
}

// ============================================================================
// Store Trait
// ============================================================================

/// Trait for account storage backends.
#[async_trait::async_trait]
pub trait AccountStore: Send + Sync {
    /// Insert a new account and return the stored row.
    async fn insert(&self, new_account: NewAccount) -> Result<Account>;

    /// Find an account by its (lowercase) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<Account>>;

    /// Find an account by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>>;
}

// ============================================================================
// In-Memory Store (for testing)
// ============================================================================

/// In-memory account store for testing.
#[derive(Debug, Default)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<Uuid, Account>>>,
}

impl InMemoryAccountStore {
    /// Create a new in-memory account store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            accounts: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Get the count of stored accounts.
    pub async fn count(&self) -> usize {
        self.accounts.read().await.len()
    }

    /// Clear all accounts (for testing).
    pub async fn clear(&self) {
        self.accounts.write().await.clear();
    }
}

#[async_trait::async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn insert(&self, new_account: NewAccount) -> Result<Account> {
        let account = Account {
            id: Uuid::new_v4(),
            email: new_account.email,
            password_hash: new_account.password_hash,
            display_name: new_account.display_name,
            role: new_account.role,
            created_at: Utc::now(),
        };

        self.accounts.write().await.insert(account.id, account.clone());
        Ok(account)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().find(|a| a.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        Ok(self.accounts.read().await.get(&id).cloned())
    }
}

// ============================================================================
// Service
// ============================================================================

/// Service for account registration and lookup.
pub struct AccountService {
    store: Arc<dyn AccountStore>,
}

impl AccountService {
    /// Create a new account service.
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }

    /// Register a new account.
    ///
    /// The email is lowercased and trimmed before the uniqueness check, so
    /// two registrations differing only in case collide.
    pub async fn create_account(&self, input: NewAccount) -> Result<Account> {
        let email = normalize_email(&input.email);

        // Check for an existing registration
        if self.store.find_by_email(&email).await?.is_some() {
            return Err(GovernanceError::EmailExists(email));
        }

        let account = self
            .store
            .insert(NewAccount { email, ..input })
            .await?;

        tracing::info!(
            account_id = %account.id,
            role = %account.role,
            "account registered"
        );

        Ok(account)
    }

    /// Find an account by email, applying the same normalization as
    /// registration.
    pub async fn find_by_email(&self, email: &str) -> Result<Option<Account>> {
        self.store.find_by_email(&normalize_email(email)).await
    }

    /// Find an account by ID.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>> {
        self.store.find_by_id(id).await
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
