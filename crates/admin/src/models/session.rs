//! Session-related types for admin authentication.
//!
//! Types stored in cookies for authentication state.

use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use menuboard_core::{AdminId, FeatureFlags};

/// Admin details issued with a token.
///
/// Both parts are optional; whatever is present is stored next to the token
/// with the same expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminData {
    /// Admin identifier from the authentication API.
    #[serde(default)]
    pub id: Option<AdminId>,
    /// Feature flags granted to the admin.
    #[serde(default)]
    pub features: Option<FeatureFlags>,
}

/// Logged-in admin as seen by a guarded request.
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// Bearer token for calls back to the API.
    pub token: SecretString,
    /// Admin identifier, if one was stored.
    pub admin_id: Option<AdminId>,
    /// Feature flags (all off when unreadable).
    pub features: FeatureFlags,
}

/// Cookie names for admin authentication data.
pub mod keys {
    /// Encoded bearer token.
    pub const ADMIN_TOKEN: &str = "adminToken";

    /// Encoded JSON feature flag set.
    pub const ADMIN_FEATURES: &str = "adminFeatures";

    /// Encoded admin identifier.
    pub const ADMIN_ID: &str = "adminId";
}
