use crate::core::{
    error::MatchError,
    lexical::lexical_scores,
    ranker::{order, SimilarityRanker},
    semantic::{semantic_scores, SemanticEncoder},
    text::normalize,
};
use crate::models::{
    BlendWeights, Candidate, CandidateProfile, CorpusSnapshot, FallbackPolicy, MatchOutcome,
    ScoreVector, ScoringMode,
};
use std::sync::Arc;

/// Orchestrates one match request
///
/// # Pipeline Stages
/// 1. Normalize requester and candidate tags into a corpus snapshot
/// 2. Lexical scores from a TF-IDF fit over exactly that snapshot
/// 3. Semantic scores from the shared encoder
/// 4. Blend and rank
///
/// The service holds only the shared encoder and fixed settings; every call
/// builds and drops its own snapshot and lexical fit.
#[derive(Clone)]
pub struct MatchService {
    encoder: Arc<dyn SemanticEncoder>,
    ranker: SimilarityRanker,
    fallback: FallbackPolicy,
}

impl MatchService {
    pub fn new(
        encoder: Arc<dyn SemanticEncoder>,
        weights: BlendWeights,
        fallback: FallbackPolicy,
    ) -> Self {
        Self {
            encoder,
            ranker: SimilarityRanker::new(weights),
            fallback,
        }
    }

    pub fn encoder(&self) -> &Arc<dyn SemanticEncoder> {
        &self.encoder
    }

    pub fn weights(&self) -> BlendWeights {
        self.ranker.weights()
    }

    pub fn fallback(&self) -> FallbackPolicy {
        self.fallback
    }

    /// Build the snapshot for one call
    ///
    /// # Errors
    /// `NotFound` when the requester profile normalizes to nothing or the
    /// pool is empty.
    pub fn snapshot<S: AsRef<str>>(
        requester_tags: &[S],
        candidate_pool: &[CandidateProfile],
    ) -> Result<CorpusSnapshot, MatchError> {
        let requester = normalize(requester_tags);
        if requester.is_empty() {
            return Err(MatchError::NotFound(
                "requester profile has no interests to match against".to_string(),
            ));
        }
        if candidate_pool.is_empty() {
            return Err(MatchError::NotFound("no candidates to rank".to_string()));
        }

        let candidates = candidate_pool
            .iter()
            .map(|profile| Candidate {
                id: profile.id.clone(),
                profile_text: normalize(&profile.tags),
            })
            .collect();

        Ok(CorpusSnapshot {
            requester,
            candidates,
        })
    }

    /// Rank the candidate pool against the requester's tags
    ///
    /// Returns every candidate, highest similarity first.
    pub fn match_profiles<S: AsRef<str>>(
        &self,
        requester_tags: &[S],
        candidate_pool: &[CandidateProfile],
    ) -> Result<MatchOutcome, MatchError> {
        let snapshot = Self::snapshot(requester_tags, candidate_pool)?;
        self.match_snapshot(&snapshot)
    }

    pub fn match_snapshot(&self, snapshot: &CorpusSnapshot) -> Result<MatchOutcome, MatchError> {
        let (scores, mode) = self.score_snapshot(snapshot)?;
        let matches = order(scores);

        tracing::info!(
            "Ranked {} candidates ({:?} scoring)",
            matches.len(),
            mode
        );

        Ok(MatchOutcome { matches, mode })
    }

    /// Component and blended scores per candidate, in snapshot order
    pub fn score_snapshot(
        &self,
        snapshot: &CorpusSnapshot,
    ) -> Result<(Vec<ScoreVector>, ScoringMode), MatchError> {
        let corpus = snapshot.corpus();
        let ids = snapshot.candidate_ids();

        let lexical = lexical_scores(&snapshot.requester, &corpus);
        tracing::debug!(
            "Lexical scores computed for {} candidates",
            lexical.len()
        );

        match semantic_scores(self.encoder.as_ref(), &snapshot.requester, &corpus) {
            Ok(semantic) => {
                let scores = self.ranker.score_vectors(&ids, &lexical, &semantic)?;
                Ok((scores, ScoringMode::Hybrid))
            }
            Err(e) if e.is_unavailable() && self.fallback == FallbackPolicy::LexicalOnly => {
                tracing::warn!("Semantic encoder unavailable, scoring lexically: {}", e);
                let semantic = vec![0.0; lexical.len()];
                let scores = SimilarityRanker::new(BlendWeights::LEXICAL_ONLY)
                    .score_vectors(&ids, &lexical, &semantic)?;
                Ok((scores, ScoringMode::LexicalOnly))
            }
            Err(e) => {
                tracing::error!("Semantic scoring failed: {}", e);
                Err(e)
            }
        }
    }
}

impl std::fmt::Debug for MatchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchService")
            .field("encoder", &self.encoder.id())
            .field("ranker", &self.ranker)
            .field("fallback", &self.fallback)
            .finish()
    }
}
