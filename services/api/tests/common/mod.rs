// Shared helpers for the HTTP-level integration tests.
//
// Every test drives the real router through `tower::ServiceExt::oneshot`,
// so requests exercise routing, middleware, extraction, and handlers exactly
// as the binary would.

use api_lib::{
    adapters::{InMemoryTranscriptionStore, InMemoryUserStore},
    auth::AuthService,
    config::Config,
    web::{api_router, state::AppState},
};
use axum::{
    body::{to_bytes, Body},
    http::{Request, Response, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

/// A config for tests; nothing binds to `bind_address` under `oneshot`.
pub fn test_config() -> Arc<Config> {
    Arc::new(Config {
        bind_address: "127.0.0.1:0".parse().unwrap(),
        log_level: tracing::Level::INFO,
        frontend_origin: "http://localhost:3000".to_string(),
    })
}

/// Builds the full application over fresh in-memory stores.
pub fn test_app() -> Router {
    let users = Arc::new(InMemoryUserStore::new());
    let state = Arc::new(AppState {
        auth: Arc::new(AuthService::new(users)),
        transcriptions: Arc::new(InMemoryTranscriptionStore::new()),
        config: test_config(),
    });
    api_router(state)
}

/// Fires one request at the app and returns the raw response.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

/// Reads a response body as JSON.
pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// A request with a JSON body, optionally carrying the user id header.
pub fn json_request(method: &str, uri: &str, user_id: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// A body-less request, optionally carrying the user id header.
pub fn empty_request(method: &str, uri: &str, user_id: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id);
    }
    builder.body(Body::empty()).unwrap()
}

/// Signs a user in through the real endpoint and returns the response body.
pub async fn sign_in(app: &Router, credential: &str, email: &str, display_name: &str) -> Value {
    let request = json_request(
        "POST",
        "/api/auth/google",
        None,
        &serde_json::json!({
            "credential": credential,
            "email": email,
            "displayName": display_name,
        }),
    );
    let response = send(app, request).await;
    assert_eq!(response.status(), StatusCode::OK);
    body_json(response).await
}
