//! Mentor Match - hybrid lexical and semantic mentor-matching service
//!
//! This library provides the ranking engine used to match students with
//! mentors. Each request blends a TF-IDF cosine score, fitted over exactly
//! the profiles being compared, with a sentence-embedding similarity from a
//! shared pretrained encoder.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{
    lexical_scores, normalize, semantic_scores, HashingEncoder, MatchError, MatchService,
    SemanticEncoder, SimilarityRanker,
};
pub use crate::models::{
    BlendWeights, CandidateProfile, FallbackPolicy, MatchOutcome, ProfileText, RankedMatch,
    ScoringMode,
};
