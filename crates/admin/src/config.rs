//! Admin configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `ADMIN_BASE_URL` - Public URL for the admin panel (https enables `Secure` cookies)
//! - `AUTH_API_LOGIN_URL` - Login endpoint of the restaurant authentication API
//!
//! ## Optional
//! - `ADMIN_HOST` - Bind address (default: 127.0.0.1)
//! - `ADMIN_PORT` - Listen port (default: 3001)
//! - `ADMIN_TOKEN_TTL_HOURS` - Lifetime of the session cookies, 1 to 8784 (default: 6)
//! - `AUTH_API_TIMEOUT_SECS` - Authentication API request timeout (default: 10)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Traces sample rate (default: 1.0)
//!
//! ## Optional (TLS)
//! - `ADMIN_TLS_CERT` - PEM-encoded certificate chain
//! - `ADMIN_TLS_KEY` - PEM-encoded private key

use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::session::{CookiePolicy, DEFAULT_TOKEN_TTL_HOURS};

const DEFAULT_AUTH_API_TIMEOUT_SECS: u64 = 10;

/// Longest accepted session cookie lifetime (one year).
const MAX_TOKEN_TTL_HOURS: u32 = 24 * 366;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Admin application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the admin panel
    pub base_url: String,
    /// Authentication API configuration
    pub auth_api: AuthApiConfig,
    /// Lifetime of the token, id and feature cookies set on login
    pub token_ttl_hours: u32,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
    /// TLS configuration for HTTPS (optional)
    pub tls: Option<TlsConfig>,
}

/// Authentication API configuration.
#[derive(Debug, Clone)]
pub struct AuthApiConfig {
    /// Endpoint receiving `{email, password}`
    pub login_url: Url,
    /// Per-request timeout
    pub timeout: Duration,
}

/// TLS configuration for HTTPS.
#[derive(Clone)]
pub struct TlsConfig {
    /// PEM-encoded certificate chain
    pub cert_pem: String,
    /// PEM-encoded private key
    pub key_pem: SecretString,
}

impl std::fmt::Debug for TlsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TlsConfig")
            .field("cert_pem", &"[CERTIFICATE]")
            .field("key_pem", &"[REDACTED]")
            .finish()
    }
}

/// Variable lookup; `std::env::var` in production, a map in tests.
type Env<'a> = &'a dyn Fn(&str) -> Option<String>;

impl TlsConfig {
    fn from_source(env: Env<'_>) -> Result<Option<Self>, ConfigError> {
        let cert_pem = get_optional_env(env, "ADMIN_TLS_CERT");
        let key_pem = get_optional_env(env, "ADMIN_TLS_KEY");

        match (cert_pem, key_pem) {
            (Some(cert), Some(key)) => Ok(Some(Self {
                cert_pem: cert,
                key_pem: SecretString::from(key),
            })),
            (None, None) => Ok(None),
            _ => Err(ConfigError::InvalidEnvVar(
                "ADMIN_TLS_*".to_string(),
                "Both ADMIN_TLS_CERT and ADMIN_TLS_KEY must be set together".to_string(),
            )),
        }
    }
}

impl AuthApiConfig {
    fn from_source(env: Env<'_>) -> Result<Self, ConfigError> {
        let login_url = get_required_env(env, "AUTH_API_LOGIN_URL")?;
        let login_url = Url::parse(&login_url).map_err(|e| {
            ConfigError::InvalidEnvVar("AUTH_API_LOGIN_URL".to_string(), e.to_string())
        })?;
        let timeout_secs = parse_env_or_default(
            env,
            "AUTH_API_TIMEOUT_SECS",
            DEFAULT_AUTH_API_TIMEOUT_SECS,
        )?;

        Ok(Self {
            login_url,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_source(&|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_source(env: Env<'_>) -> Result<Self, ConfigError> {
        let host = get_env_or_default(env, "ADMIN_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("ADMIN_HOST".to_string(), e.to_string()))?;
        let port = parse_env_or_default(env, "ADMIN_PORT", 3001_u16)?;
        let base_url = get_required_env(env, "ADMIN_BASE_URL")?;
        let auth_api = AuthApiConfig::from_source(env)?;
        let token_ttl_hours =
            parse_env_or_default(env, "ADMIN_TOKEN_TTL_HOURS", DEFAULT_TOKEN_TTL_HOURS)?;
        if !(1..=MAX_TOKEN_TTL_HOURS).contains(&token_ttl_hours) {
            return Err(ConfigError::InvalidEnvVar(
                "ADMIN_TOKEN_TTL_HOURS".to_string(),
                format!("must be between 1 and {MAX_TOKEN_TTL_HOURS}"),
            ));
        }
        let sentry_dsn = get_optional_env(env, "SENTRY_DSN");
        let sentry_environment = get_optional_env(env, "SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env(env, "SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env(env, "SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let tls = TlsConfig::from_source(env)?;

        Ok(Self {
            host,
            port,
            base_url,
            auth_api,
            token_ttl_hours,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
            tls,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Cookie attributes implied by the public base URL.
    #[must_use]
    pub fn cookie_policy(&self) -> CookiePolicy {
        CookiePolicy::for_base_url(&self.base_url)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(env: Env<'_>, key: &str) -> Result<String, ConfigError> {
    get_optional_env(env, key).ok_or_else(|| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Blank values count as unset.
fn get_optional_env(env: Env<'_>, key: &str) -> Option<String> {
    env(key).filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(env: Env<'_>, key: &str, default: &str) -> String {
    get_optional_env(env, key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn parse_env_or_default<T>(env: Env<'_>, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(env, key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}
