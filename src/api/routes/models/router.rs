//! Router for the models API

use axum::{Json, Router, extract::State, routing::get};

use super::public;
use crate::api::state::SharedState;
use crate::core::AppConfig;
use crate::openai::list_models;

/// List models offered by the completion service. Always succeeds, an
/// unreachable service shows up as a single "unavailable" entry.
async fn models(State(state): State<SharedState>) -> Json<public::ModelsResponse> {
    let (api_hostname, api_key, default_model) = {
        let shared_state = state.read().expect("Unable to read share state");
        let AppConfig {
            openai_api_hostname,
            openai_api_key,
            openai_model,
            ..
        } = &shared_state.config;
        (
            openai_api_hostname.clone(),
            openai_api_key.clone(),
            openai_model.clone(),
        )
    };

    let models = list_models(&api_hostname, &api_key).await;
    Json(public::ModelsResponse {
        models,
        default_model,
    })
}

/// Create the models router
pub fn router() -> Router<SharedState> {
    Router::new().route("/", get(models))
}
