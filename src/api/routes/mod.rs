//! API routes module

pub mod chat;
pub mod render;

use std::sync::{Arc, RwLock};

use crate::api::state::AppState;
use axum::Router;

type SharedState = Arc<RwLock<AppState>>;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Upstream chat proxy
        .nest("/chat", chat::router())
        // Style result visualization
        .nest("/render", render::router())
}
