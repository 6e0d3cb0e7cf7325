use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, Suggestion};

/// Response for find matches endpoint
///
/// Viewers with interests get a scored ranking; everyone else gets a random sample.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum FindMatchesResponse {
    Scored {
        matches: Vec<MatchResult>,
        #[serde(rename = "totalCandidates")]
        total_candidates: usize,
    },
    Random {
        matches: Vec<Suggestion>,
        #[serde(rename = "totalCandidates")]
        total_candidates: usize,
    },
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(rename = "statusCode")]
    pub status_code: u16,
}
