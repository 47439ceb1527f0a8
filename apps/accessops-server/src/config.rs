//! Application configuration loaded from environment variables.
//!
//! This module provides fail-fast configuration loading with validation.
//! Required variables must be present and valid, or the application will
//! exit with a clear error message.
//!
//! Security hardening: production environment detection refuses the
//! known development JWT secret and wildcard CORS at startup.

use std::env;

use thiserror::Error;

/// Default JWT_SECRET shipped for local development only.
pub const INSECURE_JWT_SECRET: &str = "development-jwt-secret-change-in-production";

/// Minimum accepted JWT secret length in bytes.
const MIN_JWT_SECRET_LEN: usize = 32;

/// Application environment mode.
///
/// Controls security enforcement behavior:
/// - `Development`: Insecure defaults are allowed with WARN-level logging.
/// - `Production`: Insecure defaults cause the application to refuse startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    /// Parse from the `APP_ENV` environment variable value.
    /// Defaults to `Development` if unset or unrecognized.
    pub fn from_env_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => {
                tracing::warn!(
                    value = other,
                    "Unrecognized APP_ENV value, defaulting to Development"
                );
                Self::Development
            }
        }
    }

    /// Returns true if this is production mode.
    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// Application environment (development or production).
    pub app_env: AppEnvironment,

    /// PostgreSQL connection string
    pub database_url: String,

    /// HS256 shared secret for signing and verifying JWTs
    pub jwt_secret: String,

    /// Access token lifetime in minutes
    pub jwt_expires_minutes: i64,

    /// Tracing filter directive (e.g., "info,accessops=debug")
    pub rust_log: String,

    /// Allowed CORS origins (comma-separated URLs or "*" for development)
    pub cors_allowed_origins: Vec<String>,

    /// Server bind address
    pub host: String,

    /// Server listen port
    pub port: u16,

    /// Email for the seeded approver account (unset disables seeding)
    pub bootstrap_approver_email: Option<String>,

    /// Password for the seeded approver account
    pub bootstrap_approver_password: Option<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("database_url", &"[redacted]")
            .field("jwt_secret", &"[redacted]")
            .field("jwt_expires_minutes", &self.jwt_expires_minutes)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("cors_allowed_origins", &self.cors_allowed_origins)
            .field("bootstrap_approver_email", &self.bootstrap_approver_email)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Required variables are missing
    /// - Values are invalid (e.g., invalid port number)
    ///
    /// # Required Variables
    ///
    /// - `DATABASE_URL` - PostgreSQL connection string
    ///
    /// # Optional Variables
    ///
    /// - `JWT_SECRET` - Token signing secret (development fallback; rejected
    ///   in production by `validate_security_config`)
    /// - `JWT_EXPIRES_MINUTES` - Token lifetime (default: 60)
    /// - `RUST_LOG` - Log level filter (default: "info")
    /// - `CORS_ALLOWED_ORIGINS` - Comma-separated allowed origins (default: "*")
    /// - `HOST` - Bind address (default: "0.0.0.0")
    /// - `PORT` - Listen port (default: 8080)
    /// - `BOOTSTRAP_APPROVER_EMAIL` / `BOOTSTRAP_APPROVER_PASSWORD` - Seeded
    ///   approver credentials; must be set together
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        let app_env = AppEnvironment::from_env_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        // Required variables
        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let jwt_secret =
            env::var("JWT_SECRET").unwrap_or_else(|_| INSECURE_JWT_SECRET.to_string());

        let jwt_expires_minutes: i64 = env::var("JWT_EXPIRES_MINUTES")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                var: "JWT_EXPIRES_MINUTES".to_string(),
                message: "Must be a whole number of minutes".to_string(),
            })?;

        if jwt_expires_minutes <= 0 {
            return Err(ConfigError::InvalidValue {
                var: "JWT_EXPIRES_MINUTES".to_string(),
                message: "Must be greater than zero".to_string(),
            });
        }

        // Optional variables with defaults
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        validate_cors_origins(&cors_allowed_origins, &app_env)?;

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;

        // Validate port range
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        // Bootstrap approver credentials must come as a pair
        let bootstrap_approver_email = env::var("BOOTSTRAP_APPROVER_EMAIL").ok();
        let bootstrap_approver_password = env::var("BOOTSTRAP_APPROVER_PASSWORD").ok();

        match (&bootstrap_approver_email, &bootstrap_approver_password) {
            (Some(_), None) | (None, Some(_)) => {
                return Err(ConfigError::InvalidValue {
                    var: "BOOTSTRAP_APPROVER_EMAIL".to_string(),
                    message: "BOOTSTRAP_APPROVER_EMAIL and BOOTSTRAP_APPROVER_PASSWORD \
                              must be set together"
                        .to_string(),
                });
            }
            _ => {}
        }

        if let Some(password) = &bootstrap_approver_password {
            if password.len() < 8 {
                return Err(ConfigError::InvalidValue {
                    var: "BOOTSTRAP_APPROVER_PASSWORD".to_string(),
                    message: "Must be at least 8 characters".to_string(),
                });
            }
        }

        Ok(Config {
            app_env,
            database_url,
            jwt_secret,
            jwt_expires_minutes,
            rust_log,
            cors_allowed_origins,
            host,
            port,
            bootstrap_approver_email,
            bootstrap_approver_password,
        })
    }

    /// Get the server bind address as a socket address string.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Validate security configuration based on the application environment.
    ///
    /// In **production** mode: returns `Err(errors)` listing all insecure defaults found.
    /// In **development** mode: returns `Ok(warnings)` listing all insecure defaults found.
    ///
    /// This function checks:
    /// - JWT_SECRET is not the development default
    /// - JWT_SECRET is at least 32 bytes
    /// - CORS_ALLOWED_ORIGINS is not wildcard ("*") in production
    pub fn validate_security_config(&self) -> Result<Vec<String>, Vec<String>> {
        let mut issues = Vec::new();

        if self.jwt_secret == INSECURE_JWT_SECRET {
            issues.push("JWT_SECRET is using the default insecure value".to_string());
        }

        if self.jwt_secret.len() < MIN_JWT_SECRET_LEN {
            issues.push(format!(
                "JWT_SECRET is shorter than {MIN_JWT_SECRET_LEN} characters"
            ));
        }

        if self.cors_allowed_origins.iter().any(|o| o == "*") {
            issues.push(
                "CORS_ALLOWED_ORIGINS contains wildcard '*' which is not allowed in production"
                    .to_string(),
            );
        }

        if issues.is_empty() {
            return Ok(Vec::new());
        }

        if self.app_env.is_production() {
            Err(issues)
        } else {
            Ok(issues)
        }
    }
}

/// Validate CORS origin URL formats at startup.
///
/// In production mode, invalid URLs cause a startup error.
/// In development mode, invalid URLs produce a warning.
/// The wildcard "*" origin is allowed through (but rejected separately by
/// `validate_security_config`).
fn validate_cors_origins(origins: &[String], app_env: &AppEnvironment) -> Result<(), ConfigError> {
    for origin in origins {
        // Wildcard is handled by security validation
        if origin == "*" {
            continue;
        }

        let is_valid = origin.starts_with("http://") || origin.starts_with("https://");
        if !is_valid {
            let msg = format!(
                "CORS origin '{origin}' is not a valid URL (must start with http:// or https://)"
            );
            if app_env.is_production() {
                return Err(ConfigError::InvalidValue {
                    var: "CORS_ALLOWED_ORIGINS".to_string(),
                    message: msg,
                });
            }
            tracing::warn!(target: "security", origin = %origin, "{}", msg);
        }
    }
    Ok(())
}
