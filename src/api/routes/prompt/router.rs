//! Router for the system prompt preview

use std::sync::Arc;

use axum::{Json, Router, extract::State, routing::get};

use super::public;
use crate::api::state::SharedState;
use crate::profile::Profiles;

/// Render the system prompt from the currently saved profiles
async fn preview_prompt(
    State(state): State<SharedState>,
) -> Result<Json<public::PromptResponse>, crate::api::public::ApiError> {
    let store = Arc::clone(&state.read().expect("Unable to read share state").store);
    let profiles = Profiles::load(store.as_ref()).await?;
    Ok(Json(public::PromptResponse {
        system_prompt: profiles.system_prompt(),
    }))
}

/// Create the prompt router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(preview_prompt))
}
