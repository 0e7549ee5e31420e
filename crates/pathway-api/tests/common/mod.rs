use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use pathway_api::state::AppState;
use pathway_storage::MemoryStore;
use serde_json::{json, Value};
use tower::ServiceExt;

pub fn app() -> Router {
    app_with_store(Arc::new(MemoryStore::new()))
}

pub fn app_with_store(store: Arc<MemoryStore>) -> Router {
    pathway_api::router(AppState::new(store))
}

pub async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string())),
        None => builder.body(Body::empty()),
    }
    .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register a user with `role` and return a session token for them.
pub async fn sign_up(app: &Router, email: &str, role: &str) -> String {
    let (status, _) = call(
        app,
        Method::POST,
        "/users",
        None,
        Some(json!({ "email": email, "password": "pw", "role": role, "name": email })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, session) = call(
        app,
        Method::POST,
        "/authenticate",
        None,
        Some(json!({ "email": email, "password": "pw" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    session["token"].as_str().unwrap().to_string()
}
