//! Session summary API handler.

use axum::{Json, Router, routing::get};
use serde::Serialize;

use menuboard_core::{AdminId, FeatureFlags};

use crate::{middleware::RequireAdminToken, state::AppState};

/// Build the session router.
pub fn router() -> Router<AppState> {
    Router::new().route("/api/session", get(session))
}

/// Response for the session summary.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub valid: bool,
    pub admin_id: Option<AdminId>,
    pub features: FeatureFlags,
}

/// Report the stored session. The token itself is never returned.
pub async fn session(RequireAdminToken(session): RequireAdminToken) -> Json<SessionResponse> {
    Json(SessionResponse {
        valid: true,
        admin_id: session.admin_id,
        features: session.features,
    })
}
