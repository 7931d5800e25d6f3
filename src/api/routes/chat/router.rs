//! Router for the chat API

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    routing::{get, post},
};
use axum_extra::extract::Query;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::SharedState;
use crate::openai::CompletionOptions;
use crate::profile::{Profiles, Settings, load};

fn session_busy(session_id: &str) -> ApiError {
    ApiError::conflict(format!("Session {} is waiting on a reply", session_id))
}

/// Compose the system prompt and completion options from the profiles
/// as they are saved right now.
async fn exchange_context(
    state: &SharedState,
    model: Option<String>,
) -> anyhow::Result<(String, CompletionOptions)> {
    let store = Arc::clone(&state.read().expect("Unable to read share state").store);
    let profiles = Profiles::load(store.as_ref()).await?;
    let settings: Settings = load(store.as_ref()).await?;
    let options = state
        .read()
        .expect("Unable to read share state")
        .completion_options(&settings, model);
    Ok((profiles.system_prompt(), options))
}

/// Send a message and wait for the reply
async fn chat_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::ChatRequest>,
) -> Result<Json<public::ChatResponse>, ApiError> {
    let public::ChatRequest {
        session_id,
        message,
        model,
    } = payload;

    let session = state
        .write()
        .expect("Unable to write share state")
        .session(&session_id);
    let Ok(mut conversation) = session.try_lock_owned() else {
        return Err(session_busy(&session_id));
    };

    let (system_prompt, options) = exchange_context(&state, model).await?;
    tracing::debug!("Session {}: submitting message", session_id);

    // Run the exchange in its own task so the transcript is still
    // updated if the client disconnects mid-request
    let (turn, transcript) = tokio::spawn(async move {
        let turn = conversation
            .submit(&system_prompt, &message, &options)
            .await
            .clone();
        (turn, conversation.transcript().turns().to_vec())
    })
    .await?;

    Ok(Json(public::ChatResponse { turn, transcript }))
}

/// Replace the last reply with a freshly generated one
async fn regenerate_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::RegenerateRequest>,
) -> Result<Json<public::TranscriptResponse>, ApiError> {
    let public::RegenerateRequest { session_id, model } = payload;

    let session = state
        .write()
        .expect("Unable to write share state")
        .session(&session_id);
    let Ok(mut conversation) = session.try_lock_owned() else {
        return Err(session_busy(&session_id));
    };

    if conversation.transcript().is_empty() {
        return Ok(Json(public::TranscriptResponse { transcript: vec![] }));
    }

    let (system_prompt, options) = exchange_context(&state, model).await?;
    tracing::debug!("Session {}: regenerating last reply", session_id);

    let transcript = tokio::spawn(async move {
        conversation.regenerate(&system_prompt, &options).await;
        conversation.transcript().turns().to_vec()
    })
    .await?;

    Ok(Json(public::TranscriptResponse { transcript }))
}

/// Start the session over
async fn clear_handler(
    State(state): State<SharedState>,
    Json(payload): Json<public::SessionRequest>,
) -> Result<Json<public::TranscriptResponse>, ApiError> {
    let session = state
        .write()
        .expect("Unable to write share state")
        .session(&payload.session_id);
    let Ok(mut conversation) = session.try_lock_owned() else {
        return Err(session_busy(&payload.session_id));
    };
    conversation.clear();
    Ok(Json(public::TranscriptResponse { transcript: vec![] }))
}

/// Get the transcript of a session, waiting for any exchange in flight.
/// Unknown sessions have an empty transcript and are not created.
async fn transcript_handler(
    State(state): State<SharedState>,
    Query(params): Query<public::SessionRequest>,
) -> Json<public::TranscriptResponse> {
    let session = state
        .read()
        .expect("Unable to read share state")
        .find_session(&params.session_id);
    let Some(session) = session else {
        return Json(public::TranscriptResponse { transcript: vec![] });
    };
    let conversation = session.lock().await;
    Json(public::TranscriptResponse {
        transcript: conversation.transcript().turns().to_vec(),
    })
}

/// Create the chat router
pub fn router() -> Router<SharedState> {
    Router::new()
        .route("/", post(chat_handler))
        .route("/regenerate", post(regenerate_handler))
        .route("/clear", post(clear_handler))
        .route("/transcript", get(transcript_handler))
}
