//! Authentication service for account operations.
//!
//! Handles account registration, login, and credential verification.

use accessops_auth::{encode_token, AccessClaims, PasswordHasher};
use accessops_core::AccountId;
use accessops_governance::{Account, AccountService, NewAccount, Role};

use crate::error::{ApiError, ApiResult};

/// Service for account authentication operations.
pub struct AuthService {
    accounts: AccountService,
    password_hasher: PasswordHasher,
    jwt_secret: String,
    token_ttl_minutes: i64,
}

impl AuthService {
    /// Create a new authentication service.
    #[must_use]
    pub fn new(accounts: AccountService, jwt_secret: String, token_ttl_minutes: i64) -> Self {
        Self {
            accounts,
            password_hasher: PasswordHasher::default(),
            jwt_secret,
            token_ttl_minutes,
        }
    }

    /// Register a new account.
    ///
    /// Every account registered through this service starts as a requester.
    ///
    /// # Arguments
    ///
    /// * `email` - Account email address
    /// * `password` - Plaintext password
    /// * `display_name` - Optional display name
    ///
    /// # Returns
    ///
    /// The newly created account.
    ///
    /// # Errors
    ///
    /// - `GovernanceError::EmailExists` if the email is already registered
    /// - `ApiError::Internal` if password hashing fails
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        display_name: Option<String>,
    ) -> ApiResult<Account> {
        // Hash password
        let password_hash = self
            .password_hasher
            .hash(password)
            .map_err(|e| ApiError::Internal(format!("Password hashing failed: {e}")))?;

        let account = self
            .accounts
            .create_account(NewAccount {
                email: email.to_string(),
                password_hash,
                display_name,
                role: Role::Requester,
            })
            .await?;

        Ok(account)
    }

    /// Authenticate an account and mint an access token.
    ///
    /// # Arguments
    ///
    /// * `email` - Account email address
    /// * `password` - Plaintext password
    ///
    /// # Returns
    ///
    /// A signed JWT carrying the account id and role.
    ///
    /// # Errors
    ///
    /// - `ApiError::InvalidCredentials` if the email/password combination is invalid
    /// - `ApiError::Internal` if password verification or token signing fails
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<String> {
        let account = self.accounts.find_by_email(email).await?;

        let account = account.ok_or_else(|| {
            // Use generic error to prevent email enumeration
            tracing::debug!(email = %email, "Login attempt for non-existent account");
            ApiError::InvalidCredentials
        })?;

        // Verify password
        let valid = self
            .password_hasher
            .verify(password, &account.password_hash)
            .map_err(|e| {
                tracing::error!("Password verification error: {}", e);
                ApiError::Internal(format!("Password verification failed: {e}"))
            })?;

        if !valid {
            tracing::debug!(account_id = %account.id, "Invalid password attempt");
            return Err(ApiError::InvalidCredentials);
        }

        // Mint the access token
        let claims = AccessClaims::new(
            AccountId::from_uuid(account.id),
            account.role.to_string(),
            self.token_ttl_minutes,
        );

        let token = encode_token(&claims, &self.jwt_secret)
            .map_err(|e| ApiError::Internal(format!("Token signing failed: {e}")))?;

        tracing::info!(account_id = %account.id, "Account logged in successfully");
        Ok(token)
    }
}
