//! Authentication API error types.

use thiserror::Error;

/// Errors from the restaurant authentication API.
#[derive(Debug, Error)]
pub enum AuthApiError {
    /// HTTP request failed (connection, timeout, bad body).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Email or password rejected.
    #[error("invalid email or password")]
    InvalidCredentials,

    /// The API answered with a status we do not handle.
    #[error("authentication API returned HTTP {status}: {body}")]
    Unexpected {
        /// Response status code.
        status: u16,
        /// Response body, for logs only.
        body: String,
    },

    /// Successful response without a usable token.
    #[error("authentication API returned no token")]
    MissingToken,
}

impl AuthApiError {
    /// Whether the user can fix this by retyping their credentials.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(self, Self::InvalidCredentials)
    }
}
