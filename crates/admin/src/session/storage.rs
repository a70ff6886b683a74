//! Cookie storage port.
//!
//! The token store talks to its medium only through [`CookieStore`], so the
//! request cookie jar can be swapped for an in-memory fake in tests. Expiry is
//! the medium's concern: an entry past its deadline must read as absent.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};

use chrono::{DateTime, TimeDelta, Utc};
use thiserror::Error;

/// Errors raised by a cookie storage medium.
#[derive(Debug, Error)]
pub enum StorageError {
    /// The medium cannot be used (disabled, poisoned lock, ...).
    #[error("cookie storage unavailable: {0}")]
    Unavailable(String),

    /// The expiry instant cannot be represented by the medium.
    #[error("invalid cookie expiry: {0}")]
    InvalidExpiry(String),
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Create a clock frozen at `start`.
    #[must_use]
    pub const fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Move the clock forward.
    pub fn advance(&self, by: TimeDelta) {
        if let Ok(mut now) = self.now.lock() {
            *now += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now
            .lock()
            .map_or_else(|poisoned| *poisoned.into_inner(), |now| *now)
    }
}

/// A key/value medium with per-entry expiry.
pub trait CookieStore: Send + Sync {
    /// Read a live entry. Expired entries are `None`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be read.
    fn get(&self, name: &str) -> Result<Option<String>, StorageError>;

    /// Write an entry that expires at `expires_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be written.
    fn set(&self, name: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), StorageError>;

    /// Delete an entry. Deleting an absent entry is not an error.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the medium cannot be written.
    fn delete(&self, name: &str) -> Result<(), StorageError>;
}

impl<T: CookieStore + ?Sized> CookieStore for Arc<T> {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        (**self).get(name)
    }

    fn set(&self, name: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), StorageError> {
        (**self).set(name, value, expires_at)
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        (**self).delete(name)
    }
}

#[derive(Debug, Clone)]
struct StoredCookie {
    value: String,
    expires_at: DateTime<Utc>,
}

/// In-memory cookie medium.
///
/// Entries expire when `expires_at <= now`; expired entries are dropped on read.
pub struct MemoryCookieStore {
    entries: RwLock<HashMap<String, StoredCookie>>,
    clock: Arc<dyn Clock>,
}

impl Default for MemoryCookieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCookieStore {
    /// Create an empty store on the system clock.
    #[must_use]
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    /// Create an empty store on a custom clock.
    #[must_use]
    pub fn with_clock(clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            clock,
        }
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = self.clock.now();
        self.entries
            .read()
            .map(|entries| entries.values().filter(|c| c.expires_at > now).count())
            .unwrap_or(0)
    }

    /// Whether there are no live entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl CookieStore for MemoryCookieStore {
    fn get(&self, name: &str) -> Result<Option<String>, StorageError> {
        let now = self.clock.now();
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;

        match entries.get(name) {
            Some(cookie) if cookie.expires_at > now => Ok(Some(cookie.value.clone())),
            Some(_) => {
                entries.remove(name);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    fn set(&self, name: &str, value: &str, expires_at: DateTime<Utc>) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.insert(
            name.to_owned(),
            StoredCookie {
                value: value.to_owned(),
                expires_at,
            },
        );
        Ok(())
    }

    fn delete(&self, name: &str) -> Result<(), StorageError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|e| StorageError::Unavailable(e.to_string()))?;
        entries.remove(name);
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn start() -> DateTime<Utc> {
        DateTime::from_timestamp(1_750_000_000, 0).unwrap()
    }

    #[test]
    fn test_memory_store_set_then_get() {
        let store = MemoryCookieStore::new();
        store
            .set("adminToken", "v", Utc::now() + TimeDelta::hours(1))
            .unwrap();
        assert_eq!(store.get("adminToken").unwrap().as_deref(), Some("v"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_memory_store_expires_entries() {
        let clock = Arc::new(ManualClock::new(start()));
        let store = MemoryCookieStore::with_clock(clock.clone());
        store
            .set("adminToken", "v", start() + TimeDelta::minutes(30))
            .unwrap();

        clock.advance(TimeDelta::minutes(29));
        assert!(store.get("adminToken").unwrap().is_some());

        clock.advance(TimeDelta::minutes(1));
        assert!(store.get("adminToken").unwrap().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_memory_store_deadline_equal_to_now_is_expired() {
        let clock = Arc::new(ManualClock::new(start()));
        let store = MemoryCookieStore::with_clock(clock);
        store.set("adminToken", "v", start()).unwrap();
        assert!(store.get("adminToken").unwrap().is_none());
    }

    #[test]
    fn test_memory_store_delete_is_idempotent() {
        let store = MemoryCookieStore::new();
        store.delete("missing").unwrap();
        store
            .set("adminId", "1", Utc::now() + TimeDelta::hours(1))
            .unwrap();
        store.delete("adminId").unwrap();
        store.delete("adminId").unwrap();
        assert!(store.get("adminId").unwrap().is_none());
    }

    #[test]
    fn test_arc_store_delegates() {
        let store: Arc<dyn CookieStore> = Arc::new(MemoryCookieStore::new());
        store
            .set("adminId", "7", Utc::now() + TimeDelta::hours(1))
            .unwrap();
        assert_eq!(store.get("adminId").unwrap().as_deref(), Some("7"));
    }
}
