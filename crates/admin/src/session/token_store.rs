//! Admin token, id and feature flag cookies.
//!
//! Every value is encoded with [`codec`](super::codec) and written with its own
//! absolute expiry. Readers never check the deadline themselves; they trust the
//! medium to stop returning expired entries.
//!
//! None of the public accessors fail. A missing, expired, undecodable or
//! unreadable entry is simply absent, and unreadable feature flags fall back
//! to all-off. The `read_*` methods expose the underlying reason for tests and
//! diagnostics.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use secrecy::SecretString;
use thiserror::Error;

use menuboard_core::{AdminId, FeatureFlags};

use super::codec::{self, DecodeError};
use super::events::FeatureBus;
use super::storage::{Clock, CookieStore, StorageError, SystemClock};
use crate::models::{AdminData, AdminSession, session_keys};

/// Token lifetime when the caller does not choose one.
pub const DEFAULT_TOKEN_TTL_HOURS: u32 = 6;

/// Lifetime of the feature flag cookie when flags are updated on their own.
const FEATURES_TTL_HOURS: u32 = 6;

/// Why a session cookie could not be read.
#[derive(Debug, Error)]
pub enum SessionReadError {
    /// The cookie is not set (or has expired).
    #[error("cookie not set")]
    Absent,

    /// The storage medium failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The cookie value is not in the expected encoding.
    #[error("cookie value could not be decoded: {0}")]
    Decode(#[from] DecodeError),

    /// The feature flag cookie does not hold a valid flag set.
    #[error("feature flags are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Cookie-backed credential cache for the admin.
pub struct TokenStore<S> {
    storage: S,
    clock: Arc<dyn Clock>,
    bus: Option<FeatureBus>,
}

impl<S: CookieStore> TokenStore<S> {
    /// Create a store over `storage` using the system clock.
    #[must_use]
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            clock: Arc::new(SystemClock),
            bus: None,
        }
    }

    /// Use a custom clock to compute expiry instants.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Announce feature flag updates on `bus`.
    #[must_use]
    pub fn with_bus(mut self, bus: FeatureBus) -> Self {
        self.bus = Some(bus);
        self
    }

    /// The underlying medium.
    #[must_use]
    pub const fn storage(&self) -> &S {
        &self.storage
    }

    /// Give back the underlying medium (e.g. to return a cookie jar).
    #[must_use]
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Store a token with the default six hour lifetime.
    pub fn set_token(&self, token: &str, admin: Option<&AdminData>) {
        self.set_token_with_expiry(token, DEFAULT_TOKEN_TTL_HOURS, admin);
    }

    /// Store a token, and any supplied admin id and flags, expiring in `hours`.
    ///
    /// `hours == 0` writes entries that are already expired.
    pub fn set_token_with_expiry(&self, token: &str, hours: u32, admin: Option<&AdminData>) {
        let expires_at = self.expiry(hours);
        self.write(session_keys::ADMIN_TOKEN, token, expires_at);

        if let Some(admin) = admin {
            if let Some(features) = &admin.features {
                self.write_features(features, expires_at);
            }
            if let Some(id) = &admin.id {
                self.write(session_keys::ADMIN_ID, id.as_str(), expires_at);
            }
        }
    }

    /// Whether a token is present. This is not an authentication check.
    #[must_use]
    pub fn is_token_valid(&self) -> bool {
        self.get_valid_token().is_some()
    }

    /// The stored token, if present and decodable.
    #[must_use]
    pub fn get_valid_token(&self) -> Option<String> {
        self.read_token()
            .inspect_err(|e| log_read_failure(session_keys::ADMIN_TOKEN, e))
            .ok()
    }

    /// Read the token, reporting why it is unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`SessionReadError`] if the token is absent, empty or unreadable.
    pub fn read_token(&self) -> Result<String, SessionReadError> {
        let token = self.read_decoded(session_keys::ADMIN_TOKEN)?;
        if token.is_empty() {
            return Err(SessionReadError::Absent);
        }
        Ok(token)
    }

    /// The stored feature flags, or all-off if they cannot be read.
    #[must_use]
    pub fn get_admin_features(&self) -> FeatureFlags {
        self.read_admin_features().unwrap_or_else(|e| {
            log_read_failure(session_keys::ADMIN_FEATURES, &e);
            FeatureFlags::default()
        })
    }

    /// Read the feature flags, reporting why they are unavailable.
    ///
    /// # Errors
    ///
    /// Returns [`SessionReadError`] if the cookie is absent, not decodable or
    /// not a valid flag set.
    pub fn read_admin_features(&self) -> Result<FeatureFlags, SessionReadError> {
        let json = self.read_decoded(session_keys::ADMIN_FEATURES)?;
        Ok(serde_json::from_str(&json)?)
    }

    /// The stored admin id, if any.
    ///
    /// A value that is not encoded is returned as-is.
    #[must_use]
    pub fn get_admin_id(&self) -> Option<AdminId> {
        match self.storage.get(session_keys::ADMIN_ID) {
            Ok(Some(value)) => Some(codec::decode(&value))
                .filter(|id| !id.is_empty())
                .map(AdminId::from),
            Ok(None) => None,
            Err(e) => {
                log_read_failure(session_keys::ADMIN_ID, &SessionReadError::Storage(e));
                None
            }
        }
    }

    /// Replace the feature flags (six hour lifetime) and notify subscribers.
    pub fn set_admin_features(&self, features: &FeatureFlags) {
        self.write_features(features, self.expiry(FEATURES_TTL_HOURS));
        if let Some(bus) = &self.bus {
            let notified = bus.publish(features);
            tracing::debug!(notified, "published feature flag change");
        }
    }

    /// Remove the token, admin id and feature flags.
    pub fn clear_token(&self) {
        for name in [
            session_keys::ADMIN_TOKEN,
            session_keys::ADMIN_FEATURES,
            session_keys::ADMIN_ID,
        ] {
            if let Err(e) = self.storage.delete(name) {
                tracing::warn!(cookie = name, error = %e, "failed to delete session cookie");
            }
        }
    }

    /// Everything a guarded request needs, or `None` without a token.
    #[must_use]
    pub fn session(&self) -> Option<AdminSession> {
        let token = self.get_valid_token()?;
        Some(AdminSession {
            token: SecretString::from(token),
            admin_id: self.get_admin_id(),
            features: self.get_admin_features(),
        })
    }

    /// `now + hours`, clamped to the latest representable instant.
    fn expiry(&self, hours: u32) -> DateTime<Utc> {
        TimeDelta::try_hours(i64::from(hours))
            .and_then(|ttl| self.clock.now().checked_add_signed(ttl))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    fn read_decoded(&self, name: &str) -> Result<String, SessionReadError> {
        let stored = self.storage.get(name)?.ok_or(SessionReadError::Absent)?;
        Ok(codec::try_decode(&stored)?)
    }

    fn write(&self, name: &str, value: &str, expires_at: DateTime<Utc>) {
        if let Err(e) = self.storage.set(name, &codec::encode(value), expires_at) {
            tracing::warn!(cookie = name, error = %e, "failed to write session cookie");
        }
    }

    fn write_features(&self, features: &FeatureFlags, expires_at: DateTime<Utc>) {
        match serde_json::to_string(features) {
            Ok(json) => self.write(session_keys::ADMIN_FEATURES, &json, expires_at),
            Err(e) => tracing::warn!(error = %e, "failed to serialize feature flags"),
        }
    }
}

fn log_read_failure(name: &str, error: &SessionReadError) {
    match error {
        SessionReadError::Absent => {}
        SessionReadError::Storage(e) => {
            tracing::warn!(cookie = name, error = %e, "session cookie storage failed");
        }
        SessionReadError::Decode(_) | SessionReadError::Json(_) => {
            tracing::debug!(cookie = name, error = %error, "ignoring unreadable session cookie");
        }
    }
}
