//! Test utilities for integration tests
#![allow(dead_code)]

use std::sync::{Arc, RwLock};

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use tempfile::TempDir;
use tower::util::ServiceExt;

use charchat::api::AppState;
use charchat::api::app;
use charchat::core::AppConfig;

/// An address nothing listens on
pub const UNREACHABLE_HOST: &str = "http://127.0.0.1:1";

/// Creates a test application router that stores profiles in a fresh
/// temporary directory and sends completions to `llm_host`.
///
/// Keep the returned `TempDir` alive for as long as the router is
/// used, the directory is deleted when it drops.
pub fn test_app(llm_host: &str) -> (Router, TempDir) {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let config = AppConfig {
        storage_path: dir.path().join("profiles").display().to_string(),
        openai_api_hostname: llm_host.to_string(),
        openai_api_key: String::from("test-api-key"),
        openai_model: String::from("local-model"),
        legacy_sampling: true,
    };
    let app_state = AppState::from_config(config);
    (app(Arc::new(RwLock::new(app_state))), dir)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not utf-8")
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .uri(uri)
                .method("POST")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let body = body_to_string(response.into_body()).await;
    serde_json::from_str(&body).expect("Body is not JSON")
}

/// A chat completion response body with `content` as the reply
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
