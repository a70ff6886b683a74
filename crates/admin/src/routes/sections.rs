//! Feature-gated back-office sections.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Router, routing::get};
use tracing::instrument;

use menuboard_core::{BreadcrumbItem, FeatureFlag};

use crate::{
    components::BreadcrumbContext,
    filters,
    middleware::{
        Breadcrumbs, DEFAULT_ADMIN_PATH, DailyOfferFeature, EventsFeature, OrdersFeature,
        RequireFeature,
    },
    models::AdminSession,
    state::AppState,
};

use super::PageChrome;

/// Build the sections router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(Section::Orders.path(), get(orders))
        .route(Section::Events.path(), get(events))
        .route(Section::DailyOffer.path(), get(daily_offer))
}

/// A back-office area switched on by one feature flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Orders,
    Events,
    DailyOffer,
}

impl Section {
    /// Navigation order.
    pub const ALL: [Self; 3] = [Self::Orders, Self::Events, Self::DailyOffer];

    #[must_use]
    pub const fn flag(self) -> FeatureFlag {
        match self {
            Self::Orders => FeatureFlag::OrdersToggle,
            Self::Events => FeatureFlag::EventsToggle,
            Self::DailyOffer => FeatureFlag::DailyOfferToggle,
        }
    }

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Orders => "Orders",
            Self::Events => "Events",
            Self::DailyOffer => "Daily offer",
        }
    }

    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Orders => "/admin/orders",
            Self::Events => "/admin/events",
            Self::DailyOffer => "/admin/daily-offer",
        }
    }

    #[must_use]
    pub const fn summary(self) -> &'static str {
        match self {
            Self::Orders => "Incoming table and takeaway orders.",
            Self::Events => "Private dining and special evenings.",
            Self::DailyOffer => "Today's set menu and specials.",
        }
    }

    /// Trail shown on the section page.
    #[must_use]
    pub fn breadcrumb_trail(self) -> Vec<BreadcrumbItem> {
        vec![
            BreadcrumbItem::link("Dashboard", DEFAULT_ADMIN_PATH),
            BreadcrumbItem::new(self.title()),
        ]
    }
}

/// Section page template.
#[derive(Template, WebTemplate)]
#[template(path = "section.html")]
pub struct SectionTemplate {
    pub chrome: PageChrome,
    pub title: &'static str,
    pub summary: &'static str,
}

fn section_page(
    section: Section,
    session: &AdminSession,
    breadcrumbs: &BreadcrumbContext,
) -> SectionTemplate {
    breadcrumbs.update_breadcrumb(section.breadcrumb_trail());

    SectionTemplate {
        chrome: PageChrome::new(session, breadcrumbs, section.path()),
        title: section.title(),
        summary: section.summary(),
    }
}

/// Orders section.
#[instrument(skip_all)]
pub async fn orders(
    RequireFeature(session, _): RequireFeature<OrdersFeature>,
    Breadcrumbs(breadcrumbs): Breadcrumbs,
) -> SectionTemplate {
    section_page(Section::Orders, &session, &breadcrumbs)
}

/// Events section.
#[instrument(skip_all)]
pub async fn events(
    RequireFeature(session, _): RequireFeature<EventsFeature>,
    Breadcrumbs(breadcrumbs): Breadcrumbs,
) -> SectionTemplate {
    section_page(Section::Events, &session, &breadcrumbs)
}

/// Daily offer section.
#[instrument(skip_all)]
pub async fn daily_offer(
    RequireFeature(session, _): RequireFeature<DailyOfferFeature>,
    Breadcrumbs(breadcrumbs): Breadcrumbs,
) -> SectionTemplate {
    section_page(Section::DailyOffer, &session, &breadcrumbs)
}
