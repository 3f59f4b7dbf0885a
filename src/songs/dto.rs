use serde::{Deserialize, Serialize};

use super::repo::Song;

#[derive(Debug, Deserialize)]
pub struct RecommendationRequest {
    /// Missing and `null` both mean no mood was detected.
    #[serde(default)]
    pub mood: Option<String>,
    /// Which page asked (quiz, images, puzzle); echoed back untouched.
    #[serde(default)]
    pub module_type: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationResponse {
    pub success: bool,
    pub dominant_mood: String,
    pub module_type: String,
    pub songs: Vec<Song>,
}

#[derive(Debug, Serialize)]
pub struct RecommendationFailure {
    pub success: bool,
    pub error: String,
}

impl RecommendationFailure {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
        }
    }
}
