//! Application bootstrap module.
//!
//! Self-service registration only ever produces requester accounts, so the
//! first approver has to be provisioned out of band. This module seeds that
//! account during startup, after the database connection is established but
//! before the HTTP server starts accepting requests.

use thiserror::Error;
use tracing::{info, instrument};

use accessops_auth::{AuthError, PasswordHasher};
use accessops_governance::{AccountService, GovernanceError, NewAccount, Role};

use crate::config::Config;

/// Errors that can occur during the bootstrap pass.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("Password hashing failed: {0}")]
    Hashing(#[from] AuthError),

    #[error(transparent)]
    Governance(#[from] GovernanceError),
}

/// Result of the bootstrap operation.
#[derive(Debug, Clone, Copy)]
pub struct BootstrapResult {
    /// Whether the approver account was created (false if it already
    /// existed or no bootstrap credentials were configured).
    pub approver_created: bool,
}

/// Seed the initial approver account if configured.
///
/// Reads `BOOTSTRAP_APPROVER_EMAIL` / `BOOTSTRAP_APPROVER_PASSWORD` from the
/// loaded [`Config`]; when both are set and the email is not yet registered,
/// inserts an approver account with a hashed password. Re-running against a
/// seeded database is a no-op, so restarts are safe.
///
/// An existing account with the configured email is left untouched, whatever
/// its role.
///
/// # Errors
///
/// Returns `BootstrapError` if hashing or the account insert fails. The
/// calling code should treat this as fatal and prevent the application from
/// starting.
#[instrument(skip(config, accounts))]
pub async fn bootstrap_approver(
    config: &Config,
    accounts: &AccountService,
) -> Result<BootstrapResult, BootstrapError> {
    let (email, password) = match (
        &config.bootstrap_approver_email,
        &config.bootstrap_approver_password,
    ) {
        (Some(email), Some(password)) => (email, password),
        _ => {
            info!("No bootstrap approver configured, skipping seed");
            return Ok(BootstrapResult {
                approver_created: false,
            });
        }
    };

    if accounts.find_by_email(email).await?.is_some() {
        info!("Bootstrap approver already registered");
        return Ok(BootstrapResult {
            approver_created: false,
        });
    }

    let password_hash = PasswordHasher::default().hash(password)?;

    let new_account = NewAccount {
        email: email.clone(),
        password_hash,
        display_name: None,
        role: Role::Approver,
    };

    match accounts.create_account(new_account).await {
        Ok(account) => {
            info!(account_id = %account.id, "Bootstrap approver created");
            Ok(BootstrapResult {
                approver_created: true,
            })
        }
        // Another instance may have inserted the account between the lookup
        // and the insert.
        Err(GovernanceError::EmailExists(_)) => {
            info!("Bootstrap approver already registered");
            Ok(BootstrapResult {
                approver_created: false,
            })
        }
        Err(e) => Err(e.into()),
    }
}
