use crate::core::error::MatchError;
use crate::models::{BlendWeights, RankedMatch, ScoreVector};
use std::cmp::Ordering;

/// Blends lexical and semantic scores and orders candidates
///
/// final = semantic_weight * semantic + lexical_weight * lexical
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimilarityRanker {
    weights: BlendWeights,
}

impl SimilarityRanker {
    pub fn new(weights: BlendWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> BlendWeights {
        self.weights
    }

    #[inline]
    pub fn blend(&self, lexical: f64, semantic: f64) -> f64 {
        self.weights.semantic * semantic + self.weights.lexical * lexical
    }

    /// Pair up the three positional sequences into score vectors
    ///
    /// # Errors
    /// `InvalidInput` when the sequences differ in length.
    pub fn score_vectors<S: AsRef<str>>(
        &self,
        candidate_ids: &[S],
        lexical: &[f64],
        semantic: &[f64],
    ) -> Result<Vec<ScoreVector>, MatchError> {
        if candidate_ids.len() != lexical.len() || candidate_ids.len() != semantic.len() {
            return Err(MatchError::InvalidInput(format!(
                "length mismatch: {} candidates, {} lexical scores, {} semantic scores",
                candidate_ids.len(),
                lexical.len(),
                semantic.len()
            )));
        }

        Ok(candidate_ids
            .iter()
            .zip(lexical.iter().zip(semantic))
            .map(|(id, (&lexical, &semantic))| ScoreVector {
                candidate_id: id.as_ref().to_string(),
                lexical,
                semantic,
                final_score: self.blend(lexical, semantic),
            })
            .collect())
    }

    /// Rank every candidate by blended score, highest first
    ///
    /// Exact ties keep their input order. The full sequence is returned;
    /// top-K selection is left to the caller.
    pub fn rank<S: AsRef<str>>(
        &self,
        candidate_ids: &[S],
        lexical: &[f64],
        semantic: &[f64],
    ) -> Result<Vec<RankedMatch>, MatchError> {
        let scores = self.score_vectors(candidate_ids, lexical, semantic)?;
        Ok(order(scores))
    }
}

impl Default for SimilarityRanker {
    fn default() -> Self {
        Self::new(BlendWeights::default())
    }
}

/// Stable descending sort of score vectors into ranked matches
pub fn order(mut scores: Vec<ScoreVector>) -> Vec<RankedMatch> {
    scores.sort_by(|a, b| compare_desc(a.final_score, b.final_score));
    scores
        .into_iter()
        .map(|s| RankedMatch {
            candidate_id: s.candidate_id,
            similarity_score: s.final_score,
        })
        .collect()
}

/// NaN sorts last; -0.0 and 0.0 compare equal so they stay a stable tie
fn compare_desc(a: f64, b: f64) -> Ordering {
    let key = |x: f64| if x.is_nan() { f64::NEG_INFINITY } else { x + 0.0 };
    key(b).total_cmp(&key(a))
}
