//! Public API types

use axum::Json;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use thiserror::Error;

use crate::api::routes::chat::public::ChatErrorResponse;

// Errors

pub struct ApiError(anyhow::Error);

/// Convert `AppError` into an Axum compatible response.
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        // Always log the error
        tracing::error!("{}", self.0);

        // Respond with an error status
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Something went wrong: {}", self.0),
        )
            .into_response()
    }
}

/// Enables using `?` on functions that return `Result<_,
/// anyhow::Error>` to turn them into `Result<_, AppError>`
impl<E> From<E> for ApiError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// Every way the chat proxy can fail. Each variant maps to a JSON
/// `{"error": ...}` body with an explicit status; internal details
/// are logged but never sent to the caller.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("API key not configured")]
    MissingApiKey,

    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    #[error("Internal server error")]
    Internal(anyhow::Error),
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingApiKey => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        match &self {
            ProxyError::MissingApiKey => tracing::error!("ANTHROPIC_API_KEY is not set"),
            ProxyError::Upstream { status, message } => {
                tracing::warn!("Upstream rejected request with {}: {}", status, message)
            }
            ProxyError::Internal(e) => {
                tracing::error!("Chat proxy failed: {}. Root cause: {}", e, e.root_cause())
            }
        }

        (self.status(), Json(ChatErrorResponse::new(&self.to_string()))).into_response()
    }
}

// Re-export public types from each route

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}

pub mod render {
    pub use crate::api::routes::render::public::*;
}
