//! Test utilities for integration tests
#![allow(dead_code)]
use std::sync::{Arc, RwLock};

use axum::{Router, body::Body};

use kinetic::api::AppState;
use kinetic::api::app;
use kinetic::core::AppConfig;

/// Configuration pointing the proxy at `upstream_url` (usually a
/// mockito server) with the given credential.
pub fn test_config(api_key: Option<&str>, upstream_url: &str, static_dir: &str) -> AppConfig {
    AppConfig {
        anthropic_api_key: api_key.map(String::from),
        anthropic_api_url: format!("{}/v1/messages", upstream_url.trim_end_matches('/')),
        anthropic_version: String::from("2023-06-01"),
        static_dir: static_dir.to_string(),
    }
}

/// Creates a test application router from `config`.
pub fn test_app(config: AppConfig) -> Router {
    let app_state = AppState::new(config);
    app(Arc::new(RwLock::new(app_state)))
}

/// Serve `config` on an ephemeral local port and return the base URL.
pub async fn spawn_app(config: AppConfig) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().unwrap();
    let app = test_app(config);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}
