//! Authentication route handlers.
//!
//! Handles login and logout. Credentials are verified by the authentication
//! API; the admin only keeps the returned token in cookies.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    routing::{get, post},
};
use axum_extra::extract::cookie::CookieJar;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::instrument;

use crate::{
    error::{AppError, clear_sentry_user, set_sentry_user},
    filters,
    middleware::{DEFAULT_ADMIN_PATH, LOGIN_PATH, OptionalAdminToken},
    services::AuthApiError,
    state::AppState,
};

use super::cookie_store;

/// Build the auth router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(LOGIN_PATH, get(login_page).post(login))
        .route("/logout", post(logout))
}

// =============================================================================
// Form Types
// =============================================================================

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

// =============================================================================
// Templates
// =============================================================================

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

impl LoginTemplate {
    fn failed(status: StatusCode, error: &str, email: String) -> Response {
        (
            status,
            Self {
                error: Some(error.to_string()),
                email,
            },
        )
            .into_response()
    }
}

// =============================================================================
// Routes
// =============================================================================

/// Display the login page, or skip it when a token is already stored.
pub async fn login_page(OptionalAdminToken(session): OptionalAdminToken) -> Response {
    if session.is_some() {
        return Redirect::to(DEFAULT_ADMIN_PATH).into_response();
    }

    LoginTemplate {
        error: None,
        email: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
///
/// On success the token, admin id and feature flags are written as cookies
/// and the admin lands on the dashboard.
///
/// # Errors
///
/// Returns `AppError::Auth` if the authentication API is unreachable or
/// misbehaves.
#[instrument(skip_all, fields(email = %form.email))]
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let email = form.email.trim().to_string();
    if email.is_empty() || form.password.is_empty() {
        return Ok(LoginTemplate::failed(
            StatusCode::BAD_REQUEST,
            "Enter your email and password.",
            email,
        ));
    }

    let password = SecretString::from(form.password);
    let grant = match state.auth().login(&email, &password).await {
        Ok(grant) => grant,
        Err(AuthApiError::InvalidCredentials) => {
            tracing::warn!("Login failed: invalid credentials");
            return Ok(LoginTemplate::failed(
                StatusCode::UNAUTHORIZED,
                "Invalid email or password.",
                email,
            ));
        }
        Err(e) => return Err(e.into()),
    };

    let store = cookie_store(&state, jar);
    store.set_token_with_expiry(
        grant.token.expose_secret(),
        state.config().token_ttl_hours,
        Some(&grant.admin),
    );

    if let Some(id) = &grant.admin.id {
        set_sentry_user(id);
    }
    tracing::info!(admin_id = ?grant.admin.id, "admin logged in");

    Ok((store.into_storage().into_jar(), Redirect::to(DEFAULT_ADMIN_PATH)).into_response())
}

/// Log out: remove every session cookie and go back to the login page.
///
/// Works with or without a stored token.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> impl IntoResponse {
    let store = cookie_store(&state, jar);
    let admin_id = store.get_admin_id();
    store.clear_token();

    clear_sentry_user();
    tracing::info!(admin_id = ?admin_id, "admin logged out");

    (store.into_storage().into_jar(), Redirect::to(LOGIN_PATH))
}
