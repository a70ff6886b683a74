//! Full login, feature change and logout flow over HTTP.
//!
//! Uses a cookie-storing client against a live admin app and a fake
//! authentication API, both on ephemeral ports.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::Value;

use menuboard_core::FeatureFlag;
use menuboard_integration_tests::{
    CHEF_EMAIL, CHEF_ID, CHEF_PASSWORD, DOWN_EMAIL, TestContext, location,
};

#[tokio::test]
async fn test_login_sets_cookies_and_lands_on_dashboard() {
    let ctx = TestContext::spawn().await;

    let response = ctx.login(CHEF_EMAIL, CHEF_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response.headers()), Some("/admin"));

    let cookies: Vec<String> = response
        .headers()
        .get_all(reqwest::header::SET_COOKIE)
        .iter()
        .map(|v| v.to_str().unwrap().to_string())
        .collect();
    for name in ["adminToken=", "adminFeatures=", "adminId="] {
        let cookie = cookies.iter().find(|c| c.starts_with(name)).unwrap();
        assert!(cookie.contains("HttpOnly"), "{cookie}");
        assert!(cookie.contains("SameSite=Strict"), "{cookie}");
        assert!(cookie.contains("Path=/"), "{cookie}");
        assert!(cookie.contains("Expires="), "{cookie}");
        assert!(!cookie.contains("Secure"), "{cookie}");
    }
    // Values are encoded, never the raw token.
    assert!(cookies.iter().all(|c| !c.contains("tok-chef")));

    let response = ctx.get("/admin").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.text().await.unwrap().contains(CHEF_ID));

    let session: Value = ctx.get("/api/session").await.json().await.unwrap();
    assert_eq!(session["valid"], true);
    assert_eq!(session["adminId"], CHEF_ID);
    assert_eq!(session["features"]["ordersToggle"], true);
}

#[tokio::test]
async fn test_feature_guards_follow_granted_flags() {
    let ctx = TestContext::spawn().await;
    ctx.login(CHEF_EMAIL, CHEF_PASSWORD).await;

    assert_eq!(ctx.get("/admin/orders").await.status(), StatusCode::OK);

    let response = ctx.get("/admin/events").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response.headers()), Some("/admin"));
}

#[tokio::test]
async fn test_updating_features_changes_access_and_notifies() {
    let ctx = TestContext::spawn().await;
    let mut changes = ctx.features.subscribe();
    ctx.login(CHEF_EMAIL, CHEF_PASSWORD).await;

    let response = ctx
        .post_form("/admin/features", &[("eventsToggle", "on")])
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response.headers()), Some("/admin/features"));

    let published = changes.recv().await.unwrap();
    assert_eq!(published.enabled(), vec![FeatureFlag::EventsToggle]);

    assert_eq!(ctx.get("/admin/events").await.status(), StatusCode::OK);
    let response = ctx.get("/admin/orders").await;
    assert_eq!(location(response.headers()), Some("/admin"));

    let page = ctx.get("/admin/features").await.text().await.unwrap();
    assert!(page.contains(r#"name="eventsToggle" checked"#));
    assert!(!page.contains(r#"name="ordersToggle" checked"#));
}

#[tokio::test]
async fn test_login_page_redirects_when_logged_in() {
    let ctx = TestContext::spawn().await;
    assert_eq!(ctx.get("/login").await.status(), StatusCode::OK);

    ctx.login(CHEF_EMAIL, CHEF_PASSWORD).await;
    let response = ctx.get("/login").await;
    assert_eq!(location(response.headers()), Some("/admin"));
}

#[tokio::test]
async fn test_logout_clears_session() {
    let ctx = TestContext::spawn().await;
    ctx.login(CHEF_EMAIL, CHEF_PASSWORD).await;
    assert_eq!(ctx.get("/admin").await.status(), StatusCode::OK);

    let response = ctx.post_form("/logout", &[]).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(response.headers()), Some("/login"));

    let response = ctx.get("/admin").await;
    assert_eq!(location(response.headers()), Some("/login"));
    assert_eq!(
        ctx.get("/api/session").await.status(),
        StatusCode::UNAUTHORIZED
    );

    // Logging out twice is harmless.
    let response = ctx.post_form("/logout", &[]).await;
    assert_eq!(location(response.headers()), Some("/login"));
}

#[tokio::test]
async fn test_bad_credentials_rerender_login_form() {
    let ctx = TestContext::spawn().await;

    let response = ctx.login(CHEF_EMAIL, "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(reqwest::header::SET_COOKIE).is_none());

    let page = response.text().await.unwrap();
    assert!(page.contains("Invalid email or password."));
    assert!(page.contains(CHEF_EMAIL));

    assert_eq!(
        location(ctx.get("/admin").await.headers()),
        Some("/login")
    );
}

#[tokio::test]
async fn test_empty_credentials_are_rejected_locally() {
    let ctx = TestContext::spawn().await;
    let response = ctx.login("  ", "").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_auth_api_outage_is_bad_gateway() {
    let ctx = TestContext::spawn().await;
    let response = ctx.login(DOWN_EMAIL, "anything").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(
        response.text().await.unwrap(),
        "Authentication service unavailable"
    );
}
