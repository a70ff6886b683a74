//! Integration tests for Menuboard.
//!
//! Every test runs self-contained: [`TestContext::spawn`] starts a fake
//! authentication API and the admin app on ephemeral local ports.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p menuboard-integration-tests
//! ```
//!
//! # Fake accounts
//!
//! | Email | Password | Result |
//! |---|---|---|
//! | `chef@example.com` | `secret` | token, id `admin-1`, orders on |
//! | `down@example.com` | any | authentication API answers 503 |
//! | anything else | | 401 |

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::net::SocketAddr;
use std::time::Duration;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
use serde_json::{Value, json};

use menuboard_admin::config::AdminConfig;
use menuboard_admin::services::AuthClient;
use menuboard_admin::session::{FeatureBus, codec};
use menuboard_admin::state::AppState;

pub const CHEF_EMAIL: &str = "chef@example.com";
pub const CHEF_PASSWORD: &str = "secret";
pub const CHEF_TOKEN: &str = "tok-chef";
pub const CHEF_ID: &str = "admin-1";
pub const DOWN_EMAIL: &str = "down@example.com";

async fn fake_login(Json(body): Json<Value>) -> impl IntoResponse {
    match body["email"].as_str() {
        Some(CHEF_EMAIL) if body["password"] == CHEF_PASSWORD => (
            StatusCode::OK,
            Json(json!({
                "token": CHEF_TOKEN,
                "id": CHEF_ID,
                "features": {"ordersToggle": true, "eventsToggle": false}
            })),
        ),
        Some(DOWN_EMAIL) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({"error": "maintenance"})),
        ),
        _ => (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": "invalid credentials"})),
        ),
    }
}

async fn serve(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Start the fake authentication API; returns its login URL.
pub async fn spawn_auth_api() -> String {
    let addr = serve(Router::new().route("/auth/login", post(fake_login))).await;
    format!("http://{addr}/auth/login")
}

/// Admin state pointing at `login_url`.
pub fn test_state(login_url: &str, features: FeatureBus) -> AppState {
    let vars = [
        ("ADMIN_BASE_URL", "http://127.0.0.1"),
        ("AUTH_API_LOGIN_URL", login_url),
        ("AUTH_API_TIMEOUT_SECS", "5"),
    ];
    let config = AdminConfig::from_source(&|key| {
        vars.iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| (*value).to_string())
    })
    .unwrap();

    let auth = AuthClient::new(config.auth_api.login_url.clone(), Duration::from_secs(5)).unwrap();
    AppState::new(config, auth, features)
}

/// Running admin app plus fake authentication API.
pub struct TestContext {
    /// Client with a cookie store that does not follow redirects.
    pub client: reqwest::Client,
    pub base_url: String,
    /// Bus shared with the running app.
    pub features: FeatureBus,
}

impl TestContext {
    pub async fn spawn() -> Self {
        let login_url = spawn_auth_api().await;
        let features = FeatureBus::new();
        let app = menuboard_admin::app(test_state(&login_url, features.clone()));
        let addr = serve(app).await;

        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            client,
            base_url: format!("http://{addr}"),
            features,
        }
    }

    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn post_form(&self, path: &str, form: &[(&str, &str)]) -> reqwest::Response {
        self.client.post(self.url(path)).form(form).send().await.unwrap()
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post_form("/login", &[("email", email), ("password", password)])
            .await
    }
}

/// `Cookie` header carrying an encoded token and, optionally, feature flags JSON.
#[must_use]
pub fn session_cookie(token: &str, features: Option<&Value>) -> String {
    let mut header = format!("adminToken={}", codec::encode(token));
    if let Some(features) = features {
        header.push_str("; adminFeatures=");
        header.push_str(&codec::encode(&features.to_string()));
    }
    header
}

/// Location header of a redirect response.
#[must_use]
pub fn location(headers: &axum::http::HeaderMap) -> Option<&str> {
    headers
        .get(axum::http::header::LOCATION)
        .and_then(|v| v.to_str().ok())
}
