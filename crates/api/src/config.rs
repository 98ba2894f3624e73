use std::fmt::Display;
use std::str::FromStr;

use crate::auth::credentials::HashedCredentials;
use crate::auth::jwt::SigningKey;

/// Errors raised while reading configuration at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{var} is invalid: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Server configuration loaded from environment variables.
///
/// Everything except the signing key has a default suitable for local
/// development. In production, override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Mount point of the login route (default: `/auth`).
    pub auth_subroute: String,
    /// Mount point of the company routes (default: `/company`).
    pub company_subroute: String,
    /// Session token signing key and credential store.
    pub auth: AuthConfig,
}

/// Authentication settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HS256 key used to sign and verify session tokens.
    pub key: SigningKey,
    /// Credential store parsed from `AUTH_USERS`. `None` selects the
    /// placeholder checker.
    pub credentials: Option<HashedCredentials>,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                    |
    /// |------------------------|----------------------------|
    /// | `HOST`                 | `0.0.0.0`                  |
    /// | `PORT`                 | `3000`                     |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                       |
    /// | `AUTH_SUBROUTE`        | `/auth`                    |
    /// | `COMPANY_SUBROUTE`     | `/company`                 |
    /// | `AUTH_KEY`             | required, base64           |
    /// | `AUTH_USERS`           | unset                      |
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 3000u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;

        let auth_subroute =
            normalize_subroute(&lookup("AUTH_SUBROUTE").unwrap_or_else(|| "/auth".into()));
        let company_subroute =
            normalize_subroute(&lookup("COMPANY_SUBROUTE").unwrap_or_else(|| "/company".into()));
        if auth_subroute == company_subroute {
            return Err(ConfigError::Invalid {
                var: "COMPANY_SUBROUTE",
                reason: format!("must differ from AUTH_SUBROUTE ({auth_subroute})"),
            });
        }

        let auth = AuthConfig::from_lookup(&lookup)?;

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            auth_subroute,
            company_subroute,
            auth,
        })
    }
}

impl AuthConfig {
    fn from_lookup(lookup: &impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let raw_key = lookup("AUTH_KEY").ok_or(ConfigError::Missing("AUTH_KEY"))?;
        let key = SigningKey::from_base64(raw_key.trim()).map_err(|e| ConfigError::Invalid {
            var: "AUTH_KEY",
            reason: e.to_string(),
        })?;
        if key.is_empty() {
            return Err(ConfigError::Invalid {
                var: "AUTH_KEY",
                reason: "decoded key is empty".into(),
            });
        }

        let credentials = lookup("AUTH_USERS")
            .filter(|raw| !raw.trim().is_empty())
            .map(|raw| HashedCredentials::parse(&raw))
            .transpose()
            .map_err(|e| ConfigError::Invalid {
                var: "AUTH_USERS",
                reason: e.to_string(),
            })?;

        Ok(Self { key, credentials })
    }
}

fn parse_or<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    var: &'static str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    match lookup(var) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            var,
            reason: e.to_string(),
        }),
    }
}

/// Normalize a mount point to `/segment` form. Empty means the root.
fn normalize_subroute(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{trimmed}")
    }
}
