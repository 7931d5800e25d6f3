//! Public types for the profile API
use serde::Serialize;

#[derive(Serialize)]
pub struct SaveProfileResponse {
    pub success: bool,
}
