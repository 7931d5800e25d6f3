//! API routes module

pub mod chat;
pub mod models;
pub mod profile;
pub mod prompt;

use axum::Router;

use crate::api::state::SharedState;

/// Create the combined API router
pub fn router() -> Router<SharedState> {
    Router::new()
        // Profile form routes
        .nest("/profile", profile::router())
        // System prompt preview
        .nest("/prompt", prompt::router())
        // Model selector
        .nest("/models", models::router())
        // Chat routes
        .nest("/chat", chat::router())
}
