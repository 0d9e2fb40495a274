#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use footballx_core::config::Config;
use footballx_core::db::seed::seed_catalog;
use footballx_core::{create_app, AppState};

pub const TEST_SECRET: &str = "integration-test-secret-0123456789abcdef";

pub fn test_config() -> Config {
    Config::from_lookup(|key: &str| match key {
        "JWT_SECRET" => Some(TEST_SECRET.to_string()),
        "BCRYPT_COST" => Some("4".to_string()),
        _ => None,
    })
    .unwrap()
}

/// Router over fresh in-memory storage with the default catalog loaded.
pub async fn test_app() -> Router {
    let config = test_config();
    let state = AppState::in_memory(&config);
    seed_catalog(state.catalog.as_ref()).await.unwrap();
    create_app(state, &config)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };

    (status, value)
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> (StatusCode, Value) {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post(app: &Router, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, token, Some(body)).await
}

/// Registers `username` and returns `(token, user)`.
pub async fn register(app: &Router, username: &str) -> (String, Value) {
    let (status, body) = post(
        app,
        "/api/auth/register",
        None,
        json!({
            "email": format!("{}@example.com", username),
            "username": username,
            "password": "hunter22"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {}", body);

    let token = body["token"].as_str().unwrap().to_string();
    (token, body["user"].clone())
}

pub fn bet_slip(stake: &str, odds: &str, is_live: bool) -> Value {
    json!({
        "matchId": "1",
        "matchName": "Manchester City vs Arsenal",
        "tournament": "Premier League",
        "selection": "team1Win",
        "odds": odds,
        "stake": stake,
        "isLive": is_live
    })
}
