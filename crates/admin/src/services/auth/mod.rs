//! Client for the restaurant authentication API.
//!
//! The admin never checks passwords itself. Credentials are posted to the
//! configured login endpoint, which answers with a bearer token and,
//! optionally, the admin's id and feature flags.

mod error;

pub use error::AuthApiError;

use std::sync::Arc;
use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;
use url::Url;

use menuboard_core::{AdminId, FeatureFlags};

use crate::models::AdminData;

/// Token and admin details issued on login.
#[derive(Debug, Clone)]
pub struct LoginGrant {
    /// Bearer token to store in the session.
    pub token: SecretString,
    /// Id and feature flags, if the API sent them.
    pub admin: AdminData,
}

/// Request body for the login endpoint.
#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Success body of the login endpoint.
#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    token: String,
    #[serde(default)]
    id: Option<AdminId>,
    #[serde(default)]
    features: Option<serde_json::Value>,
}

/// Authentication API client.
#[derive(Clone)]
pub struct AuthClient {
    inner: Arc<AuthClientInner>,
}

struct AuthClientInner {
    client: reqwest::Client,
    login_url: Url,
}

impl AuthClient {
    /// Create a client posting to `login_url`, giving up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns error if the HTTP client fails to build.
    pub fn new(login_url: Url, timeout: Duration) -> Result<Self, AuthApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            inner: Arc::new(AuthClientInner { client, login_url }),
        })
    }

    /// Exchange email and password for a token.
    ///
    /// # Errors
    ///
    /// - [`AuthApiError::InvalidCredentials`] on 401 or 403
    /// - [`AuthApiError::Unexpected`] on any other non-success status
    /// - [`AuthApiError::MissingToken`] if the response carries an empty token
    /// - [`AuthApiError::Http`] on transport or body errors
    #[instrument(skip(self, password), fields(email = %email))]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginGrant, AuthApiError> {
        let response = self
            .inner
            .client
            .post(self.inner.login_url.clone())
            .json(&LoginRequest {
                email,
                password: password.expose_secret(),
            })
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            tracing::info!(status = status.as_u16(), "login rejected");
            return Err(AuthApiError::InvalidCredentials);
        }

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(AuthApiError::Unexpected {
                status: status.as_u16(),
                body,
            });
        }

        let login: LoginResponse = response.json().await?;
        if login.token.is_empty() {
            return Err(AuthApiError::MissingToken);
        }

        Ok(LoginGrant {
            token: SecretString::from(login.token),
            admin: AdminData {
                id: login.id,
                features: login.features.as_ref().map(FeatureFlags::from_json_lossy),
            },
        })
    }
}
