//! Feature flag page.
//!
//! Lets the admin switch back-office sections on and off for this browser.
//! Changes are written to the `adminFeatures` cookie and announced on the
//! in-process feature bus.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    response::{IntoResponse, Redirect},
    routing::get,
};
use axum_extra::extract::cookie::CookieJar;
use tracing::instrument;

use menuboard_core::{BreadcrumbItem, FeatureFlag, FeatureFlags};

use crate::{
    filters,
    middleware::{Breadcrumbs, DEFAULT_ADMIN_PATH, RequireAdminToken},
    state::AppState,
};

use super::{PageChrome, cookie_store};

pub const PATH: &str = "/admin/features";
pub const TITLE: &str = "Feature flags";

/// Build the feature flag router.
pub fn router() -> Router<AppState> {
    Router::new().route(PATH, get(features_page).post(update_features))
}

/// One checkbox on the page.
#[derive(Debug, Clone)]
pub struct FlagRow {
    pub key: &'static str,
    pub label: &'static str,
    pub enabled: bool,
}

/// Feature flag page template.
#[derive(Template, WebTemplate)]
#[template(path = "features.html")]
pub struct FeaturesTemplate {
    pub chrome: PageChrome,
    pub flags: Vec<FlagRow>,
}

/// Show the current flags.
#[instrument(skip_all)]
pub async fn features_page(
    RequireAdminToken(session): RequireAdminToken,
    Breadcrumbs(breadcrumbs): Breadcrumbs,
) -> FeaturesTemplate {
    breadcrumbs.update_breadcrumb(vec![
        BreadcrumbItem::link("Dashboard", DEFAULT_ADMIN_PATH),
        BreadcrumbItem::new(TITLE),
    ]);

    let flags = FeatureFlag::ALL
        .into_iter()
        .map(|flag| FlagRow {
            key: flag.key(),
            label: flag.label(),
            enabled: session.features.is_enabled(flag),
        })
        .collect();

    FeaturesTemplate {
        chrome: PageChrome::new(&session, &breadcrumbs, PATH),
        flags,
    }
}

/// Replace the flags with the submitted checkboxes.
///
/// Flags not known to this admin are carried over unchanged.
#[instrument(skip_all)]
pub async fn update_features(
    State(state): State<AppState>,
    RequireAdminToken(session): RequireAdminToken,
    jar: CookieJar,
    Form(fields): Form<Vec<(String, String)>>,
) -> impl IntoResponse {
    let features = flags_from_form(&session.features, &fields);

    let store = cookie_store(&state, jar);
    store.set_admin_features(&features);
    tracing::info!(enabled = ?features.enabled(), "feature flags updated");

    (store.into_storage().into_jar(), Redirect::to(PATH))
}

/// Checked boxes are submitted as `key=on`; unchecked boxes are absent.
fn flags_from_form(current: &FeatureFlags, fields: &[(String, String)]) -> FeatureFlags {
    let mut features = FeatureFlags {
        extra: current.extra.clone(),
        ..FeatureFlags::default()
    };

    for flag in FeatureFlag::ALL {
        let checked = fields.iter().any(|(name, _)| name == flag.key());
        features.set(flag, checked);
    }

    features
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(name: &str) -> (String, String) {
        (name.to_string(), "on".to_string())
    }

    #[test]
    fn test_checked_boxes_enable_flags() {
        let features = flags_from_form(
            &FeatureFlags::default(),
            &[field("ordersToggle"), field("dailyOfferToggle")],
        );
        assert!(features.orders_toggle);
        assert!(!features.events_toggle);
        assert!(features.daily_offer_toggle);
    }

    #[test]
    fn test_unchecked_boxes_disable_flags() {
        let current = FeatureFlags::default()
            .with(FeatureFlag::OrdersToggle, true)
            .with(FeatureFlag::EventsToggle, true);
        let features = flags_from_form(&current, &[field("eventsToggle")]);
        assert!(!features.orders_toggle);
        assert!(features.events_toggle);
    }

    #[test]
    fn test_unknown_flags_are_kept() {
        let mut current = FeatureFlags::default();
        current.extra.insert("menuEditor".to_string(), true);

        let features = flags_from_form(&current, &[field("bogus")]);
        assert_eq!(features.extra.get("menuEditor"), Some(&true));
        assert!(!features.extra.contains_key("bogus"));
        assert!(features.enabled().is_empty());
    }
}
