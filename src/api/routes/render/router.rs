//! Router for the render API

use std::sync::{Arc, RwLock};

use axum::{Json, Router, extract::State, response::IntoResponse, routing::post};
use http::header;

use super::public::{RenderRequest, SVG_CONTENT_TYPE};
use crate::api::state::AppState;
use crate::render::StyleMatrix;

type SharedState = Arc<RwLock<AppState>>;

/// Render a style result as an SVG style matrix
async fn render_handler(
    State(state): State<SharedState>,
    Json(result): Json<RenderRequest>,
) -> Result<impl IntoResponse, crate::api::public::ApiError> {
    let static_dir = {
        let shared_state = state.read().expect("Unable to read share state");
        shared_state.config.static_dir.clone()
    };

    if let Err(e) = result.validate() {
        tracing::warn!("Rendering malformed style result: {}", e);
    }

    let svg = StyleMatrix::new(static_dir).render(&result).await?;

    Ok(([(header::CONTENT_TYPE, SVG_CONTENT_TYPE)], svg))
}

/// Create the render router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", post(render_handler))
}
