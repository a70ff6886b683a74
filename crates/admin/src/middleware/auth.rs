//! Authentication extractors for admin.
//!
//! Route guards read the session cookies of the incoming request. A failed
//! check is a navigational correction, never an error page.

use std::marker::PhantomData;

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use menuboard_core::FeatureFlag;

use crate::models::AdminSession;
use crate::session::{CookiePolicy, JarCookieStore, TokenStore};

/// Where unauthenticated visitors are sent.
pub const LOGIN_PATH: &str = "/login";

/// Where admins land after login, or when a feature is switched off.
pub const DEFAULT_ADMIN_PATH: &str = "/admin";

/// Read-only token store over the request's cookies.
fn request_store(parts: &Parts) -> TokenStore<JarCookieStore> {
    let jar = CookieJar::from_headers(&parts.headers);
    TokenStore::new(JarCookieStore::new(jar, CookiePolicy::default()))
}

fn is_api_request(parts: &Parts) -> bool {
    parts.uri.path().starts_with("/api/")
}

/// Extractor that requires a stored admin token.
///
/// Redirects to the login page for HTML requests, or returns 401 for API
/// requests.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(
///     RequireAdminToken(session): RequireAdminToken,
/// ) -> impl IntoResponse {
///     format!("Features: {:?}", session.features.enabled())
/// }
/// ```
pub struct RequireAdminToken(pub AdminSession);

/// Rejection from the admin guards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminAuthRejection {
    /// No token: go to the login page (HTML requests).
    RedirectToLogin,
    /// No token on an API request.
    Unauthorized,
    /// Token present but the page's feature is off.
    RedirectToDashboard,
}

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to(LOGIN_PATH).into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
            Self::RedirectToDashboard => Redirect::to(DEFAULT_ADMIN_PATH).into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdminToken
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        request_store(parts).session().map(Self).ok_or_else(|| {
            if is_api_request(parts) {
                AdminAuthRejection::Unauthorized
            } else {
                AdminAuthRejection::RedirectToLogin
            }
        })
    }
}

/// Extractor that reads the admin session without rejecting.
pub struct OptionalAdminToken(pub Option<AdminSession>);

impl<S> FromRequestParts<S> for OptionalAdminToken
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(request_store(parts).session()))
    }
}

/// A page that is only reachable while a feature flag is on.
pub trait FeatureGate: Send + Sync + 'static {
    /// Flag that must be enabled.
    const FLAG: FeatureFlag;
}

/// Orders section.
pub struct OrdersFeature;

impl FeatureGate for OrdersFeature {
    const FLAG: FeatureFlag = FeatureFlag::OrdersToggle;
}

/// Events section.
pub struct EventsFeature;

impl FeatureGate for EventsFeature {
    const FLAG: FeatureFlag = FeatureFlag::EventsToggle;
}

/// Daily offer section.
pub struct DailyOfferFeature;

impl FeatureGate for DailyOfferFeature {
    const FLAG: FeatureFlag = FeatureFlag::DailyOfferToggle;
}

/// Extractor that requires a token and the feature `G`.
///
/// Without a token this behaves like [`RequireAdminToken`]. With a token but
/// the flag off, it redirects to the dashboard.
///
/// ```rust,ignore
/// async fn orders(RequireFeature(session, _): RequireFeature<OrdersFeature>) { .. }
/// ```
pub struct RequireFeature<G: FeatureGate>(pub AdminSession, pub PhantomData<G>);

impl<S, G> FromRequestParts<S> for RequireFeature<G>
where
    S: Send + Sync,
    G: FeatureGate,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let RequireAdminToken(session) = RequireAdminToken::from_request_parts(parts, state).await?;

        if !session.features.is_enabled(G::FLAG) {
            tracing::debug!(feature = %G::FLAG, "feature disabled, redirecting to dashboard");
            return Err(AdminAuthRejection::RedirectToDashboard);
        }

        Ok(Self(session, PhantomData))
    }
}
