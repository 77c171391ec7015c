use serde::{Deserialize, Serialize};

/// Normalized profile text built from an ordered list of tags
///
/// Always lower-case and single-spaced. The empty string is valid and
/// carries no signal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ProfileText(String);

impl ProfileText {
    /// Only the normalizer constructs profile texts, so the invariant holds
    pub(crate) fn from_normalized(text: String) -> Self {
        Self(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AsRef<str> for ProfileText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ProfileText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw candidate as supplied by a collaborator: opaque id plus expertise tags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub id: String,
    #[serde(alias = "expertise", default)]
    pub tags: Vec<String>,
}

impl CandidateProfile {
    pub fn new<I, S>(id: impl Into<String>, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            id: id.into(),
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }
}

/// Candidate with its normalized profile text
///
/// The identifier is opaque to the engine and never parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub id: String,
    pub profile_text: ProfileText,
}

/// Everything one ranking call looks at
///
/// Built fresh per call and dropped when the call returns.
#[derive(Debug, Clone)]
pub struct CorpusSnapshot {
    pub requester: ProfileText,
    pub candidates: Vec<Candidate>,
}

impl CorpusSnapshot {
    pub fn candidate_ids(&self) -> Vec<&str> {
        self.candidates.iter().map(|c| c.id.as_str()).collect()
    }

    pub fn corpus(&self) -> Vec<&ProfileText> {
        self.candidates.iter().map(|c| &c.profile_text).collect()
    }
}

/// Per-candidate component scores and the blended result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreVector {
    pub candidate_id: String,
    pub lexical: f64,
    pub semantic: f64,
    pub final_score: f64,
}

/// One entry of the ranked output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub candidate_id: String,
    pub similarity_score: f64,
}

/// Blend weights for the two similarity signals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BlendWeights {
    pub semantic: f64,
    pub lexical: f64,
}

impl BlendWeights {
    /// Full weight on the lexical term, used when the encoder is unavailable
    pub const LEXICAL_ONLY: BlendWeights = BlendWeights {
        semantic: 0.0,
        lexical: 1.0,
    };

    pub fn new(semantic: f64, lexical: f64) -> Self {
        Self { semantic, lexical }
    }

    /// Both weights must be finite and non-negative with a positive sum
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("semantic", self.semantic), ("lexical", self.lexical)] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{} weight must be a non-negative number, got {}", name, value));
            }
        }
        if self.semantic + self.lexical <= 0.0 {
            return Err("blend weights must not both be zero".to_string());
        }
        Ok(())
    }
}

impl Default for BlendWeights {
    fn default() -> Self {
        Self {
            semantic: 0.6,
            lexical: 0.4,
        }
    }
}

/// What to do when the semantic encoder reports `Unavailable`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackPolicy {
    /// Fail the whole match request
    #[default]
    Abort,
    /// Score lexically with the full weight on the lexical term
    LexicalOnly,
}

/// Which numeric meaning a result's scores carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringMode {
    Hybrid,
    LexicalOnly,
}

/// Ranked output of one match call
#[derive(Debug, Clone)]
pub struct MatchOutcome {
    pub matches: Vec<RankedMatch>,
    pub mode: ScoringMode,
}
