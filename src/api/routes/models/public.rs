//! Public types for the models API
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<String>,
    pub default_model: String,
}
