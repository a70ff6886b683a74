//! HTTP middleware and extractors for admin.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layers (capture errors, one hub per request)
//! 2. `TraceLayer` (request tracing)
//! 3. Breadcrumbs (fresh [`BreadcrumbContext`](crate::components::BreadcrumbContext) per request)
//!
//! Authentication is enforced per handler with the extractors in [`auth`].

pub mod auth;
pub mod breadcrumb;

pub use auth::{
    AdminAuthRejection, DEFAULT_ADMIN_PATH, DailyOfferFeature, EventsFeature, FeatureGate,
    LOGIN_PATH, OptionalAdminToken, OrdersFeature, RequireAdminToken, RequireFeature,
};
pub use breadcrumb::{Breadcrumbs, provide_breadcrumbs};
