//! API route handlers for admin.
//!
//! JSON endpoints. Guards answer `401` here instead of redirecting.

pub mod session;

use axum::Router;

use crate::state::AppState;

/// Build the complete API router.
pub fn router() -> Router<AppState> {
    Router::new().merge(session::router())
}
