//! Dashboard route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, routing::get};
use tracing::instrument;

use menuboard_core::BreadcrumbItem;

use crate::{
    filters,
    middleware::{Breadcrumbs, DEFAULT_ADMIN_PATH, RequireAdminToken},
    state::AppState,
};

use super::{PageChrome, sections::Section};

/// Build the dashboard router.
pub fn router() -> Router<AppState> {
    Router::new().route(DEFAULT_ADMIN_PATH, get(dashboard))
}

/// Dashboard tile for one section.
#[derive(Debug, Clone)]
pub struct SectionCard {
    pub title: &'static str,
    pub summary: &'static str,
    pub href: &'static str,
    pub enabled: bool,
}

/// Dashboard template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub chrome: PageChrome,
    pub cards: Vec<SectionCard>,
}

/// Dashboard page handler.
#[instrument(skip_all)]
pub async fn dashboard(
    RequireAdminToken(session): RequireAdminToken,
    Breadcrumbs(breadcrumbs): Breadcrumbs,
) -> DashboardTemplate {
    breadcrumbs.update_breadcrumb(vec![BreadcrumbItem::new("Dashboard")]);

    let cards = Section::ALL
        .into_iter()
        .map(|section| SectionCard {
            title: section.title(),
            summary: section.summary(),
            href: section.path(),
            enabled: session.features.is_enabled(section.flag()),
        })
        .collect();

    DashboardTemplate {
        chrome: PageChrome::new(&session, &breadcrumbs, DEFAULT_ADMIN_PATH),
        cards,
    }
}
