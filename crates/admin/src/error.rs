//! Unified error handling for admin.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use menuboard_core::AdminId;

use crate::services::AuthApiError;

/// Application-level error type for the admin panel.
#[derive(Debug, Error)]
pub enum AppError {
    /// Authentication API call failed.
    #[error("Authentication API error: {0}")]
    Auth(#[from] AuthApiError),

    /// No route matches the requested path.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let is_bad_credentials = matches!(&self, Self::Auth(e) if e.is_user_error());

        // Log server errors with Sentry
        if !is_bad_credentials && matches!(self, Self::Auth(_)) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Admin request error"
            );
        }

        let status = match &self {
            Self::Auth(_) if is_bad_credentials => StatusCode::UNAUTHORIZED,
            Self::Auth(_) => StatusCode::BAD_GATEWAY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Auth(_) if is_bad_credentials => "Invalid email or password".to_string(),
            Self::Auth(_) => "Authentication service unavailable".to_string(),
            Self::NotFound(_) => self.to_string(),
        };

        (status, message).into_response()
    }
}

/// Set the Sentry user context from the stored admin id.
pub fn set_sentry_user(admin_id: &AdminId) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(admin_id.to_string()),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}
