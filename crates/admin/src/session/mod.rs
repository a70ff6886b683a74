//! Admin session token store.
//!
//! The logged-in state of the admin lives entirely in three cookies:
//!
//! | Cookie | Value |
//! |---|---|
//! | `adminToken` | encoded bearer token |
//! | `adminFeatures` | encoded JSON feature flag set |
//! | `adminId` | encoded admin identifier |
//!
//! All are `Path=/`, `SameSite=Strict`, and expire independently.
//!
//! # Modules
//!
//! - [`codec`] - reversible value encoding (not encryption)
//! - [`storage`] - the [`CookieStore`] port, clock and in-memory medium
//! - [`jar`] - [`CookieStore`] over the request cookie jar
//! - [`token_store`] - [`TokenStore`] operations
//! - [`events`] - in-process feature flag change broadcast

pub mod codec;
pub mod events;
pub mod jar;
pub mod storage;
pub mod token_store;

pub use codec::DecodeError;
pub use events::{FeatureBus, spawn_feature_audit};
pub use jar::{CookiePolicy, JarCookieStore};
pub use storage::{Clock, CookieStore, ManualClock, MemoryCookieStore, StorageError, SystemClock};
pub use token_store::{DEFAULT_TOKEN_TTL_HOURS, SessionReadError, TokenStore};
