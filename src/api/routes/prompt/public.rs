//! Public types for the prompt API
use serde::Serialize;

#[derive(Serialize)]
pub struct PromptResponse {
    pub system_prompt: String,
}
