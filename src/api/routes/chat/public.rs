//! Public types for the chat API
use serde::{Deserialize, Serialize};

use crate::ai::chat::Turn;

pub const DEFAULT_SESSION_ID: &str = "default";

fn default_session_id() -> String {
    DEFAULT_SESSION_ID.to_string()
}

#[derive(Deserialize)]
pub struct ChatRequest {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    pub message: String,
    // Overrides the configured model for this request
    pub model: Option<String>,
}

#[derive(Deserialize)]
pub struct RegenerateRequest {
    #[serde(default = "default_session_id")]
    pub session_id: String,
    pub model: Option<String>,
}

#[derive(Deserialize)]
pub struct SessionRequest {
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

#[derive(Serialize, Deserialize)]
pub struct ChatResponse {
    pub turn: Turn,
    pub transcript: Vec<Turn>,
}

#[derive(Serialize, Deserialize)]
pub struct TranscriptResponse {
    pub transcript: Vec<Turn>,
}
