//! Feature flags gating admin capabilities.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Error returned when parsing an unknown [`FeatureFlag`] name.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown feature flag: {0}")]
pub struct FeatureFlagError(pub String);

/// A feature flag known to this build of the admin.
///
/// The string form is the camelCase key used in the serialized flag set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    /// Online orders section.
    OrdersToggle,
    /// Events section.
    EventsToggle,
    /// Daily offer section.
    DailyOfferToggle,
}

impl FeatureFlag {
    /// Every known flag, in display order.
    pub const ALL: [Self; 3] = [Self::OrdersToggle, Self::EventsToggle, Self::DailyOfferToggle];

    /// Serialized key of the flag.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::OrdersToggle => "ordersToggle",
            Self::EventsToggle => "eventsToggle",
            Self::DailyOfferToggle => "dailyOfferToggle",
        }
    }

    /// Human readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::OrdersToggle => "Orders",
            Self::EventsToggle => "Events",
            Self::DailyOfferToggle => "Daily offer",
        }
    }
}

impl std::fmt::Display for FeatureFlag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key())
    }
}

impl std::str::FromStr for FeatureFlag {
    type Err = FeatureFlagError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|flag| flag.key() == s)
            .ok_or_else(|| FeatureFlagError(s.to_owned()))
    }
}

/// The set of feature flags granted to an admin.
///
/// Known flags are typed fields; flags this build does not know about are
/// kept in `extra` so they survive a read/write cycle. The default value has
/// every flag off, which is also the fallback whenever the stored set cannot
/// be read.
///
/// ```
/// use menuboard_core::{FeatureFlag, FeatureFlags};
///
/// let flags: FeatureFlags = serde_json::from_str(r#"{"eventsToggle":true}"#).unwrap();
/// assert!(flags.is_enabled(FeatureFlag::EventsToggle));
/// assert!(!flags.is_enabled(FeatureFlag::OrdersToggle));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureFlags {
    #[serde(default)]
    pub orders_toggle: bool,
    #[serde(default)]
    pub events_toggle: bool,
    #[serde(default)]
    pub daily_offer_toggle: bool,
    /// Flags not known to this build.
    #[serde(flatten)]
    pub extra: BTreeMap<String, bool>,
}

impl FeatureFlags {
    /// Check a known flag.
    #[must_use]
    pub const fn is_enabled(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::OrdersToggle => self.orders_toggle,
            FeatureFlag::EventsToggle => self.events_toggle,
            FeatureFlag::DailyOfferToggle => self.daily_offer_toggle,
        }
    }

    /// Check a flag by its serialized name. Unknown names are off.
    #[must_use]
    pub fn is_enabled_by_name(&self, name: &str) -> bool {
        name.parse::<FeatureFlag>().map_or_else(
            |_| self.extra.get(name).copied().unwrap_or(false),
            |flag| self.is_enabled(flag),
        )
    }

    /// Set a known flag.
    pub const fn set(&mut self, flag: FeatureFlag, enabled: bool) {
        match flag {
            FeatureFlag::OrdersToggle => self.orders_toggle = enabled,
            FeatureFlag::EventsToggle => self.events_toggle = enabled,
            FeatureFlag::DailyOfferToggle => self.daily_offer_toggle = enabled,
        }
    }

    /// Builder-style variant of [`FeatureFlags::set`].
    #[must_use]
    pub fn with(mut self, flag: FeatureFlag, enabled: bool) -> Self {
        self.set(flag, enabled);
        self
    }

    /// Build a flag set from loosely typed JSON.
    ///
    /// Entries that are not booleans are skipped, and anything other than an
    /// object yields the all-off default.
    #[must_use]
    pub fn from_json_lossy(value: &serde_json::Value) -> Self {
        let mut flags = Self::default();
        let Some(entries) = value.as_object() else {
            return flags;
        };

        for (name, value) in entries {
            let Some(enabled) = value.as_bool() else {
                continue;
            };
            match name.parse::<FeatureFlag>() {
                Ok(flag) => flags.set(flag, enabled),
                Err(_) => {
                    flags.extra.insert(name.clone(), enabled);
                }
            }
        }

        flags
    }

    /// Known flags that are switched on, in display order.
    #[must_use]
    pub fn enabled(&self) -> Vec<FeatureFlag> {
        FeatureFlag::ALL
            .into_iter()
            .filter(|flag| self.is_enabled(*flag))
            .collect()
    }
}
