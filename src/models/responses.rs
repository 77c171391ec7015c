use crate::models::domain::{RankedMatch, ScoringMode};
use serde::{Deserialize, Serialize};

/// One ranked mentor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MentorMatch {
    pub mentor_id: String,
    pub similarity_score: f64,
}

impl From<RankedMatch> for MentorMatch {
    fn from(m: RankedMatch) -> Self {
        Self {
            mentor_id: m.candidate_id,
            similarity_score: m.similarity_score,
        }
    }
}

/// Response for the match endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub matches: Vec<MentorMatch>,
    pub scoring: ScoringMode,
    pub total_candidates: usize,
}

/// Semantic encoder status as reported by the health check
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncoderStatus {
    pub id: String,
    pub dimension: usize,
    pub available: bool,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub encoder: EncoderStatus,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
