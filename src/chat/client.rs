use anyhow::{Error, Result};
use async_trait::async_trait;
use serde_json::Value;

use crate::anthropic::MessagesRequest;

/// Delivers a chat request to the proxy and returns the decoded JSON
/// body. Error bodies are returned as values, only transport and
/// decoding problems are errors.
#[async_trait]
pub trait ChatClient {
    async fn complete(&self, request: &MessagesRequest) -> Result<Value, Error>;
}

/// Talks to a running `POST /api/chat` endpoint.
pub struct HttpChatClient {
    endpoint_url: String,
    client: reqwest::Client,
}

impl HttpChatClient {
    pub fn new(endpoint_url: &str) -> Self {
        Self {
            endpoint_url: endpoint_url.to_string(),
            client: reqwest::Client::new(),
        }
    }

    pub fn endpoint_url(&self) -> &str {
        &self.endpoint_url
    }
}

#[async_trait]
impl ChatClient for HttpChatClient {
    async fn complete(&self, request: &MessagesRequest) -> Result<Value, Error> {
        let body: Value = self
            .client
            .post(&self.endpoint_url)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await?
            .json()
            .await?;

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::anthropic::{ApiMessage, Role};
    use serde_json::json;

    fn request() -> MessagesRequest {
        MessagesRequest {
            model: "claude-sonnet-4-20250514".to_string(),
            max_tokens: 1500,
            system: "Be brief.".to_string(),
            messages: vec![ApiMessage::new(Role::User, "hello")],
        }
    }

    #[tokio::test]
    async fn test_posts_request_to_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/api/chat")
            .match_body(mockito::Matcher::PartialJson(json!({
                "max_tokens": 1500,
                "messages": [{"role": "user", "content": "hello"}]
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"content":[{"type":"text","text":"hi"}]}"#)
            .create_async()
            .await;

        let client = HttpChatClient::new(&format!("{}/api/chat", server.url()));
        let body = client.complete(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(body["content"][0]["text"], "hi");
    }

    #[tokio::test]
    async fn test_error_status_still_returns_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(429)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"rate limited"}"#)
            .create_async()
            .await;

        let client = HttpChatClient::new(&format!("{}/api/chat", server.url()));
        let body = client.complete(&request()).await.unwrap();
        assert_eq!(body["error"], "rate limited");
    }

    #[tokio::test]
    async fn test_non_json_body_is_an_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/api/chat")
            .with_status(502)
            .with_body("<html>Bad Gateway</html>")
            .create_async()
            .await;

        let client = HttpChatClient::new(&format!("{}/api/chat", server.url()));
        assert!(client.complete(&request()).await.is_err());
    }
}
