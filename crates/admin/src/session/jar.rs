//! Cookie storage backed by the request's cookie jar.
//!
//! Reads come from the `Cookie` header; writes become `Set-Cookie` headers when
//! the jar is returned from the handler. The browser enforces expiry between
//! requests, so an incoming cookie is live by definition. Within a request a
//! written cookie is visible to later reads until its own deadline passes.

use std::sync::{Arc, Mutex};

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::{DateTime, Utc};
use time::OffsetDateTime;

use super::storage::{Clock, CookieStore, StorageError, SystemClock};

/// 9999-12-31T23:59:59Z, the last instant an `Expires` attribute can carry.
const LATEST_EXPIRES: i64 = 253_402_300_799;

/// Attributes applied to every cookie written by the admin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CookiePolicy {
    /// Emit the `Secure` attribute (admin served over https).
    pub secure: bool,
}

impl CookiePolicy {
    /// Derive the policy from the admin's public base URL.
    #[must_use]
    pub fn for_base_url(base_url: &str) -> Self {
        Self {
            secure: base_url.starts_with("https://"),
        }
    }
}

/// [`CookieStore`] over an axum-extra [`CookieJar`].
pub struct JarCookieStore {
    jar: Mutex<CookieJar>,
    policy: CookiePolicy,
    clock: Arc<dyn Clock>,
}

impl JarCookieStore {
    /// Wrap a request's cookie jar.
    #[must_use]
    pub fn new(jar: CookieJar, policy: CookiePolicy) -> Self {
        Self {
            jar: Mutex::new(jar),
            policy,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replace the clock used to judge in-request expiry.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Return the jar, including pending `Set-Cookie` changes.
    #[must_use]
    pub fn into_jar(self) -> CookieJar {
        self.jar
            .into_inner()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn update(&self, change: impl FnOnce(CookieJar) -> CookieJar) -> Result<(), StorageError> {
        let mut jar = self
            .jar
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        *jar = change(jar.clone());
        Ok(())
    }
}

impl CookieStore for JarCookieStore {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let jar = self
            .jar
            .lock()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        let Some(cookie) = jar.get(name) else {
            return Ok(None);
        };

        let expired = cookie
            .expires_datetime()
            .is_some_and(|expires| expires.unix_timestamp() <= self.clock.now().timestamp());
        if expired {
            return Ok(None);
        }

        Ok(Some(cookie.value().to_owned()))
    }

    fn set(&self, name: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), StorageError> {
        let timestamp = expires_at.timestamp().min(LATEST_EXPIRES);
        let expires = OffsetDateTime::from_unix_timestamp(timestamp)
            .map_err(|e| StorageError::InvalidExpiry(e.to_string()))?;

        let cookie = Cookie::build((name.to_owned(), value.to_owned()))
            .path("/")
            .same_site(SameSite::Strict)
            .http_only(true)
            .secure(self.policy.secure)
            .expires(expires);

        self.update(|jar| jar.add(cookie))
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        let removal = Cookie::build((name.to_owned(), String::new())).path("/");
        self.update(|jar| jar.remove(removal))
    }
}
