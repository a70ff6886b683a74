//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::AdminConfig;
use crate::services::AuthClient;
use crate::session::{CookiePolicy, FeatureBus};

/// Application state shared across all handlers.
///
/// Cheap to clone. No session data lives here; sessions are carried entirely
/// by the request cookies.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: AdminConfig,
    auth: AuthClient,
    features: FeatureBus,
    cookie_policy: CookiePolicy,
}

impl AppState {
    /// Build the state from loaded configuration.
    #[must_use]
    pub fn new(config: AdminConfig, auth: AuthClient, features: FeatureBus) -> Self {
        let cookie_policy = config.cookie_policy();
        Self {
            inner: Arc::new(AppStateInner {
                config,
                auth,
                features,
                cookie_policy,
            }),
        }
    }

    #[must_use]
    pub fn config(&self) -> &AdminConfig {
        &self.inner.config
    }

    /// Client for the authentication API.
    #[must_use]
    pub fn auth(&self) -> &AuthClient {
        &self.inner.auth
    }

    /// In-process feature flag change channel.
    #[must_use]
    pub fn features(&self) -> &FeatureBus {
        &self.inner.features
    }

    /// Attributes for cookies written by handlers.
    #[must_use]
    pub fn cookie_policy(&self) -> CookiePolicy {
        self.inner.cookie_policy
    }
}
