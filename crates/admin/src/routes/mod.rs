//! HTTP route handlers for admin.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Redirect to the dashboard
//!
//! # Auth (credentials checked by the authentication API)
//! GET  /login                  - Login page (skipped when a token is stored)
//! POST /login                  - Log in, store token cookies
//! POST /logout                 - Clear token cookies
//!
//! # Dashboard
//! GET  /admin                  - Dashboard overview
//!
//! # Sections (each behind its feature flag)
//! GET  /admin/orders           - Orders (ordersToggle)
//! GET  /admin/events           - Events (eventsToggle)
//! GET  /admin/daily-offer      - Daily offer (dailyOfferToggle)
//!
//! # Feature flags
//! GET  /admin/features         - Current flags
//! POST /admin/features         - Replace flags
//!
//! # API
//! GET  /api/session            - Session summary as JSON
//! ```

pub mod api;
pub mod auth;
pub mod dashboard;
pub mod features;
pub mod sections;

use axum::{Router, response::Redirect, routing::get};
use axum_extra::extract::cookie::CookieJar;

use menuboard_core::FeatureFlags;

use crate::components::{BreadcrumbContext, RenderedCrumb};
use crate::middleware::DEFAULT_ADMIN_PATH;
use crate::models::AdminSession;
use crate::session::{JarCookieStore, TokenStore};
use crate::state::AppState;

use self::sections::Section;

/// Build the complete page and API router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .merge(auth::router())
        .merge(dashboard::router())
        .merge(sections::router())
        .merge(features::router())
        .merge(api::router())
}

async fn index() -> Redirect {
    Redirect::to(DEFAULT_ADMIN_PATH)
}

/// Writable token store over the request's cookie jar.
///
/// Return `store.into_storage().into_jar()` from the handler so the changes
/// reach the browser.
pub(crate) fn cookie_store(state: &AppState, jar: CookieJar) -> TokenStore<JarCookieStore> {
    TokenStore::new(JarCookieStore::new(jar, state.cookie_policy()))
        .with_bus(state.features().clone())
}

/// Sidebar navigation entry.
#[derive(Debug, Clone)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
    pub active: bool,
}

/// Layout data shared by every logged-in page.
#[derive(Debug, Clone)]
pub struct PageChrome {
    pub breadcrumbs: Vec<RenderedCrumb>,
    pub nav: Vec<NavLink>,
    pub admin_id: Option<String>,
}

impl PageChrome {
    /// Collect layout data after the page has set its breadcrumb trail.
    #[must_use]
    pub fn new(session: &AdminSession, breadcrumbs: &BreadcrumbContext, current_path: &str) -> Self {
        Self {
            breadcrumbs: breadcrumbs.render(),
            nav: nav_links(&session.features, current_path),
            admin_id: session.admin_id.as_ref().map(ToString::to_string),
        }
    }
}

/// Navigation for the given flags; sections that are switched off are hidden.
fn nav_links(flags: &FeatureFlags, current_path: &str) -> Vec<NavLink> {
    let mut links = vec![NavLink {
        label: "Dashboard",
        href: DEFAULT_ADMIN_PATH,
        active: current_path == DEFAULT_ADMIN_PATH,
    }];

    links.extend(
        Section::ALL
            .into_iter()
            .filter(|section| flags.is_enabled(section.flag()))
            .map(|section| NavLink {
                label: section.title(),
                href: section.path(),
                active: current_path == section.path(),
            }),
    );

    links.push(NavLink {
        label: features::TITLE,
        href: features::PATH,
        active: current_path == features::PATH,
    });

    links
}

#[cfg(test)]
#[allow(clippy::indexing_slicing)]
mod tests {
    use menuboard_core::FeatureFlag;

    use super::*;

    fn labels(links: &[NavLink]) -> Vec<&'static str> {
        links.iter().map(|l| l.label).collect()
    }

    #[test]
    fn test_nav_hides_disabled_sections() {
        let links = nav_links(&FeatureFlags::default(), DEFAULT_ADMIN_PATH);
        assert_eq!(labels(&links), vec!["Dashboard", "Feature flags"]);
        assert!(links[0].active);
    }

    #[test]
    fn test_nav_shows_enabled_sections_in_order() {
        let flags = FeatureFlags::default()
            .with(FeatureFlag::DailyOfferToggle, true)
            .with(FeatureFlag::OrdersToggle, true);
        let links = nav_links(&flags, "/admin/daily-offer");

        assert_eq!(
            labels(&links),
            vec!["Dashboard", "Orders", "Daily offer", "Feature flags"]
        );
        assert!(links[2].active);
        assert!(!links[0].active);
    }
}
