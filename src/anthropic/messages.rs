//! Anthropic Messages API wire types and the pass-through call used
//! by the proxy.

use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::AppConfig;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq)]
pub enum Role {
    #[serde(rename = "user")]
    User,
    #[serde(rename = "assistant")]
    Assistant,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct ApiMessage {
    pub role: Role,
    pub content: String,
}

impl ApiMessage {
    pub fn new(role: Role, content: &str) -> Self {
        Self {
            role,
            content: content.to_string(),
        }
    }
}

/// Request body for `POST /v1/messages`
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub system: String,
    pub messages: Vec<ApiMessage>,
}

/// Raw upstream reply. The body is kept as an untyped value so it can
/// be relayed without losing fields.
#[derive(Debug)]
pub struct UpstreamResponse {
    pub status: http::StatusCode,
    pub body: Value,
}

/// Forward `body` to the Messages API as-is, attaching the
/// credential and protocol headers.
///
/// Any non-JSON reply is an error, regardless of status.
pub async fn forward(
    client: &reqwest::Client,
    config: &AppConfig,
    api_key: &str,
    body: &Value,
) -> Result<UpstreamResponse> {
    let response = client
        .post(&config.anthropic_api_url)
        .header("Content-Type", "application/json")
        .header("x-api-key", api_key)
        .header("anthropic-version", &config.anthropic_version)
        .json(body)
        .send()
        .await?;

    let status = http::StatusCode::from_u16(response.status().as_u16())?;
    let body: Value = response.json().await?;

    Ok(UpstreamResponse { status, body })
}

/// Error message from an upstream error body, `{"error": {"message": ...}}`
pub fn error_message(body: &Value) -> Option<&str> {
    body["error"]["message"].as_str()
}

/// Join every `text` content block of a Messages API reply with
/// newlines. Returns an error if the reply has no content list.
pub fn response_text(body: &Value) -> Result<String> {
    let content = body["content"]
        .as_array()
        .ok_or(anyhow!("Response is missing content: {}", body))?;

    let text = content
        .iter()
        .filter(|block| block["type"] == "text")
        .filter_map(|block| block["text"].as_str())
        .filter(|text| !text.is_empty())
        .collect::<Vec<&str>>()
        .join("\n");

    Ok(text)
}
