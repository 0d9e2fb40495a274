mod common;

use axum::http::StatusCode;
use common::{get, post, register, test_app};
use serde_json::json;

#[tokio::test]
async fn test_register_grants_starting_balance() {
    let app = test_app().await;
    let (token, user) = register(&app, "alice").await;

    assert_eq!(user["balance"], 100.00);
    assert_eq!(user["username"], "alice");
    assert!(user.get("passwordHash").is_none());

    let (status, me) = get(&app, "/api/users/me", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["email"], "alice@example.com");
    assert_eq!(me["balance"], 100.00);
}

#[tokio::test]
async fn test_register_rejects_duplicates() {
    let app = test_app().await;
    register(&app, "alice").await;

    let (status, body) = post(
        &app,
        "/api/auth/register",
        None,
        json!({"email": "alice@example.com", "username": "other", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email already exists");
    let (_, rankings) = get(&app, "/api/userrankings/sorted", None).await;
    assert_eq!(rankings.as_array().unwrap().len(), 1);

    let (status, body) = post(
        &app,
        "/api/auth/register",
        None,
        json!({"email": "new@example.com", "username": "alice", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Username already exists");

    let (_, rankings) = get(&app, "/api/userrankings/sorted", None).await;
    assert_eq!(rankings.as_array().unwrap().len(), 1);
    let (status, _) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "new@example.com", "password": "pw"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_register_requires_fields() {
    let app = test_app().await;

    let (status, body) = post(&app, "/api/auth/register", None, json!({"email": "a@b.co"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email, username, and password are required");
}

#[tokio::test]
async fn test_login() {
    let app = test_app().await;
    register(&app, "alice").await;

    let (status, body) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "alice@example.com", "password": "hunter22"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["user"]["username"], "alice");

    let (status, body) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "alice@example.com", "password": "wrong"}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid email or password");

    let (status, body) = post(&app, "/api/auth/login", None, json!({"email": "", "password": ""})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Email and password are required");
}

#[tokio::test]
async fn test_change_password() {
    let app = test_app().await;
    let (token, _) = register(&app, "alice").await;

    let (status, body) = post(
        &app,
        "/api/auth/change-password",
        Some(&token),
        json!({"currentPassword": "nope", "newPassword": "fresh-pass"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Current password is incorrect");

    let (status, body) = post(
        &app,
        "/api/auth/change-password",
        Some(&token),
        json!({"currentPassword": "hunter22", "newPassword": "fresh-pass"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Password changed successfully");

    let (status, _) = post(
        &app,
        "/api/auth/login",
        None,
        json!({"email": "alice@example.com", "password": "fresh-pass"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_protected_routes_require_token() {
    let app = test_app().await;

    for uri in ["/api/users/me", "/api/bets/user", "/api/transactions/user", "/api/users/favorites"] {
        let (status, body) = get(&app, uri, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED, "{}", uri);
        assert!(body["error"].is_string());
    }

    let (status, _) = get(&app, "/api/users/me", Some("not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = post(&app, "/api/auth/change-password", None, json!({})).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_json_uses_error_shape() {
    let app = test_app().await;

    let (status, body) = common::send(
        &app,
        axum::http::Method::POST,
        "/api/auth/login",
        None,
        Some(json!(["not", "an", "object"])),
    )
    .await;
    assert!(status.is_client_error());
    assert!(body["error"].is_string());
}
