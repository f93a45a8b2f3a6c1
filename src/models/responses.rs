use serde::{Deserialize, Serialize};
use crate::models::domain::ScoredCandidate;

/// Response for the rank endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RankResponse {
    pub run_id: uuid::Uuid,
    pub ranked_at: chrono::DateTime<chrono::Utc>,
    pub total_ranked: usize,
    pub snapshot_path: String,
    pub top_matches: Vec<ScoredCandidate>,
}

/// Response for the best match endpoint
///
/// `status` is one of `match`, `below_threshold` or `none`; the top scored
/// candidate is included for the first two.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BestMatchResponse {
    pub status: String,
    pub threshold: f64,
    pub best_match: Option<ScoredCandidate>,
}

/// Response for list endpoints (recommended, all, search)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchListResponse {
    pub matches: Vec<ScoredCandidate>,
    pub total_results: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub catalog_size: usize,
    pub last_run_id: Option<uuid::Uuid>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
