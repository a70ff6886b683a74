//! Route guard behaviour, driven through the router without a network.

#![allow(clippy::unwrap_used)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt;

use menuboard_admin::session::FeatureBus;
use menuboard_integration_tests::{location, session_cookie, test_state};

fn app() -> Router {
    // Guards never reach the authentication API.
    menuboard_admin::app(test_state(
        "http://127.0.0.1:9/auth/login",
        FeatureBus::new(),
    ))
}

async fn get(path: &str, cookie: Option<String>) -> axum::response::Response {
    let mut request = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        request = request.header(header::COOKIE, cookie);
    }
    app()
        .oneshot(request.body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[tokio::test]
async fn test_health() {
    let response = get("/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "ok");
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let response = get("/admin/menu-archive", None).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_text(response).await, "Not found: /admin/menu-archive");
}

#[tokio::test]
async fn test_protected_pages_redirect_to_login_without_token() {
    for path in ["/admin", "/admin/features", "/admin/orders", "/admin/events"] {
        let response = get(path, None).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(location(response.headers()), Some("/login"), "{path}");
    }
}

#[tokio::test]
async fn test_api_session_without_token_is_unauthorized() {
    let response = get("/api/session", None).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_garbled_token_counts_as_missing() {
    let response = get("/admin", Some("adminToken=***".to_string())).await;
    assert_eq!(location(response.headers()), Some("/login"));
}

#[tokio::test]
async fn test_token_without_flag_redirects_to_dashboard() {
    let cookie = session_cookie("tok", Some(&json!({"eventsToggle": true})));

    let response = get("/admin/orders", Some(cookie.clone())).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response.headers()), Some("/admin"));

    let response = get("/admin/events", Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_malformed_features_disable_every_section() {
    let mut cookie = session_cookie("tok", None);
    cookie.push_str("; adminFeatures=");
    cookie.push_str(&menuboard_admin::session::codec::encode("{not json"));

    for path in ["/admin/orders", "/admin/events", "/admin/daily-offer"] {
        let response = get(path, Some(cookie.clone())).await;
        assert_eq!(location(response.headers()), Some("/admin"), "{path}");
    }

    // The dashboard itself only needs the token.
    let response = get("/admin", Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_dashboard_renders_single_current_breadcrumb() {
    let response = get("/admin", Some(session_cookie("tok", None))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let html = body_text(response).await;
    assert!(html.contains(r#"<span aria-current="page">Dashboard</span>"#));
    assert_eq!(html.matches(r#"<span aria-current="page">"#).count(), 1);
}

#[tokio::test]
async fn test_dashboard_cards_show_flag_state() {
    let cookie = session_cookie("tok", Some(&json!({"eventsToggle": true})));
    let html = body_text(get("/admin", Some(cookie)).await).await;

    assert_eq!(html.matches(r#"<p class="state">On</p>"#).count(), 1);
    assert_eq!(html.matches(r#"<p class="state">Off</p>"#).count(), 2);
}

#[tokio::test]
async fn test_section_breadcrumb_links_back_to_dashboard() {
    let cookie = session_cookie("tok", Some(&json!({"dailyOfferToggle": true})));
    let html = body_text(get("/admin/daily-offer", Some(cookie)).await).await;

    assert!(html.contains(r#"class="breadcrumb""#));
    assert!(html.contains(r#"<span aria-current="page">Daily offer</span>"#));
    assert!(html.contains(">Dashboard</a>"));
}

#[tokio::test]
async fn test_login_page_has_no_breadcrumb() {
    let response = get("/login", None).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(!body_text(response).await.contains(r#"class="breadcrumb""#));
}

#[tokio::test]
async fn test_login_page_skipped_with_token() {
    let response = get("/login", Some(session_cookie("tok", None))).await;
    assert_eq!(location(response.headers()), Some("/admin"));
}

#[tokio::test]
async fn test_api_session_reports_stored_values() {
    let mut cookie = session_cookie("tok", Some(&json!({"ordersToggle": true})));
    cookie.push_str("; adminId=");
    cookie.push_str(&menuboard_admin::session::codec::encode("admin-42"));

    let response = get("/api/session", Some(cookie)).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(body["valid"], true);
    assert_eq!(body["adminId"], "admin-42");
    assert_eq!(body["features"]["ordersToggle"], true);
    assert_eq!(body["features"]["eventsToggle"], false);
    assert!(body.get("token").is_none());
}
