//! Router for the chat proxy API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, body::Bytes, extract::State, routing::post};
use serde_json::Value;

use crate::anthropic::{error_message, forward};
use crate::api::public::ProxyError;
use crate::api::state::AppState;

type SharedState = Arc<RwLock<AppState>>;

/// Forward a Messages API request upstream with the server's
/// credential and relay the reply.
///
/// The body is taken as raw bytes so a malformed request is reported
/// the same way as any other internal failure instead of as an
/// extractor rejection.
async fn chat_handler(
    State(state): State<SharedState>,
    body: Bytes,
) -> Result<Json<Value>, ProxyError> {
    let (config, http) = {
        let shared_state = state.read().expect("Unable to read share state");
        (shared_state.config.clone(), shared_state.http.clone())
    };

    let api_key = config
        .anthropic_api_key
        .as_deref()
        .ok_or(ProxyError::MissingApiKey)?;

    let payload: Value =
        serde_json::from_slice(&body).map_err(|e| ProxyError::Internal(e.into()))?;

    let upstream = forward(&http, &config, api_key, &payload)
        .await
        .map_err(ProxyError::Internal)?;

    if !upstream.status.is_success() {
        let message = error_message(&upstream.body)
            .filter(|msg| !msg.is_empty())
            .unwrap_or("API request failed")
            .to_string();
        return Err(ProxyError::Upstream {
            status: upstream.status,
            message,
        });
    }

    Ok(Json(upstream.body))
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(chat_handler))
}
