//! Integration tests for authentication and account endpoints

mod common;

use axum::http::StatusCode;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_returns_tokens() {
    let app = common::TestApp::new().await;

    let body = json!({
        "username": "fresh_user",
        "email": "fresh@test.example",
        "password": "a-solid-password"
    });

    let (status, response) = app.post("/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);

    let tokens: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!tokens["access_token"].as_str().unwrap().is_empty());
    assert!(!tokens["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(tokens["token_type"], "Bearer");

    app.cleanup().await;
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_duplicate_username_conflicts() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({
        "username": user.username,
        "email": "other@test.example",
        "password": "a-solid-password"
    });

    let (status, response) = app.post("/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::CONFLICT);

    let error: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(error["error"]["code"], "CONFLICT");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_register_rejects_short_password() {
    let app = common::TestApp::new().await;

    let body = json!({
        "username": "short_pw_user",
        "email": "shortpw@test.example",
        "password": "short"
    });

    let (status, _) = app.post("/api/v1/auth/register", &body.to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password_unauthorized() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({
        "username": user.username,
        "password": "wrong-password"
    });

    let (status, _) = app.post("/api/v1/auth/login", &body.to_string()).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_me_requires_auth() {
    let app = common::TestApp::new().await;

    let (status, _) = app.get("/api/v1/auth/me").await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_me_returns_client_role() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let (status, response) = app.get_auth("/api/v1/auth/me", &user.access_token).await;

    assert_eq!(status, StatusCode::OK);

    let account: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(account["role"], "client");
    assert_eq!(account["is_active"], true);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_refresh_issues_new_tokens() {
    let app = common::TestApp::new().await;
    let user = app.create_test_user().await;

    let body = json!({ "refresh_token": user.refresh_token });
    let (status, response) = app.post("/api/v1/auth/refresh", &body.to_string()).await;

    assert_eq!(status, StatusCode::OK);

    let tokens: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert!(!tokens["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_role_change_requires_admin() {
    let app = common::TestApp::new().await;
    let client = app.create_test_user().await;
    let target = app.create_test_user().await;

    let (_, me) = app.get_auth("/api/v1/auth/me", &target.access_token).await;
    let target_id = serde_json::from_str::<serde_json::Value>(&me).unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let body = json!({ "role": "trainer" });
    let (status, _) = app
        .put_auth(
            &format!("/api/v1/accounts/{target_id}/role"),
            &body.to_string(),
            &client.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_admin_changes_role_and_deactivates() {
    let app = common::TestApp::new().await;
    let admin = app.create_user_with_role("admin").await;
    let target = app.create_test_user().await;

    let (_, me) = app.get_auth("/api/v1/auth/me", &target.access_token).await;
    let target_id = serde_json::from_str::<serde_json::Value>(&me).unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let body = json!({ "role": "trainer" });
    let (status, response) = app
        .put_auth(
            &format!("/api/v1/accounts/{target_id}/role"),
            &body.to_string(),
            &admin.access_token,
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    let account: serde_json::Value = serde_json::from_str(&response).unwrap();
    assert_eq!(account["role"], "trainer");

    // Deactivation blocks further logins
    let (status, _) = app
        .post_auth(
            &format!("/api/v1/accounts/{target_id}/deactivate"),
            "",
            &admin.access_token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let body = json!({
        "username": target.username,
        "password": "test-password-123"
    });
    let (status, _) = app.post("/api/v1/auth/login", &body.to_string()).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
