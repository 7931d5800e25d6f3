//! Router for the profile API. Each profile kind is one form in the UI
//! and one record in the store.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Path, State},
    routing::get,
};
use serde_json::Value;

use super::public;
use crate::api::public::ApiError;
use crate::api::state::SharedState;
use crate::profile::{ProfileKind, load_value, parse_value, save_value};

fn parse_kind(kind: &str) -> Result<ProfileKind, ApiError> {
    kind.parse::<ProfileKind>()
        .map_err(|_| ApiError::not_found(format!("Unknown profile kind: {}", kind)))
}

/// Get a profile record, defaults if it was never saved
async fn get_profile(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let kind = parse_kind(&kind)?;
    let store = Arc::clone(&state.read().expect("Unable to read share state").store);
    let record = load_value(store.as_ref(), kind).await?;
    Ok(Json(record))
}

/// Overwrite a profile record with the submitted form
async fn save_profile(
    State(state): State<SharedState>,
    Path(kind): Path<String>,
    Json(payload): Json<Value>,
) -> Result<Json<public::SaveProfileResponse>, ApiError> {
    let kind = parse_kind(&kind)?;
    let record = parse_value(kind, payload)
        .map_err(|e| ApiError::unprocessable(format!("Invalid {} profile: {}", kind, e)))?;
    let store = Arc::clone(&state.read().expect("Unable to read share state").store);
    save_value(store.as_ref(), kind, &record).await?;
    Ok(Json(public::SaveProfileResponse { success: true }))
}

/// Create the profile router
pub fn router() -> Router<SharedState> {
    Router::new().route("/{kind}", get(get_profile).post(save_profile))
}
