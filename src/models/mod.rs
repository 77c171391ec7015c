// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    BlendWeights, Candidate, CandidateProfile, CorpusSnapshot, FallbackPolicy, MatchOutcome,
    ProfileText, RankedMatch, ScoreVector, ScoringMode,
};
pub use requests::{MatchRequest, ProfileMatchRequest};
pub use responses::{EncoderStatus, ErrorResponse, HealthResponse, MatchResponse, MentorMatch};
