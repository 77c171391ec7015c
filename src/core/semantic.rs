use crate::core::error::MatchError;
use crate::core::lexical::tokenize;
use crate::models::ProfileText;

/// Capability to encode text into unit-length dense vectors
///
/// Implementations are shared read-only across concurrent requests, so
/// encoding must not mutate observable state.
pub trait SemanticEncoder: Send + Sync {
    /// Model identifier, for logs and health reporting
    fn id(&self) -> &str;

    /// Length of every vector this encoder returns
    fn dimension(&self) -> usize;

    /// Encode each text independently, preserving order
    ///
    /// Vectors are unit-normalized. The empty string encodes to some fixed
    /// vector rather than failing.
    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError>;

    fn encode(&self, text: &str) -> Result<Vec<f32>, MatchError> {
        self.encode_batch(&[text])?
            .into_iter()
            .next()
            .ok_or_else(|| MatchError::Unavailable(format!("{} returned no embedding", self.id())))
    }
}

/// Scale a vector to unit length in place
///
/// Degenerate input (zero, NaN or infinite norm) becomes the zero vector.
pub fn unit_normalize(vector: &mut [f32]) {
    let norm_sq: f32 = vector.iter().map(|x| x * x).sum();
    if norm_sq.is_finite() && norm_sq > f32::EPSILON {
        let inv_norm = 1.0 / norm_sq.sqrt();
        for v in vector.iter_mut() {
            *v *= inv_norm;
        }
    } else {
        vector.fill(0.0);
    }
}

/// Dot product accumulated in f64
#[inline]
pub fn dot(a: &[f32], b: &[f32]) -> f64 {
    a.iter().zip(b).map(|(x, y)| *x as f64 * *y as f64).sum()
}

/// Embedding similarity of the query against each corpus entry
///
/// Query and candidates are encoded in one batch but independently of each
/// other. Scores line up with `corpus` positionally.
///
/// # Errors
/// `Unavailable` when the encoder cannot run or returns malformed output.
pub fn semantic_scores(
    encoder: &dyn SemanticEncoder,
    query: &ProfileText,
    corpus: &[&ProfileText],
) -> Result<Vec<f64>, MatchError> {
    if corpus.is_empty() {
        return Ok(Vec::new());
    }

    let texts: Vec<&str> = std::iter::once(query.as_str())
        .chain(corpus.iter().map(|text| text.as_str()))
        .collect();

    let embeddings = encoder.encode_batch(&texts)?;
    if embeddings.len() != texts.len() {
        return Err(MatchError::Unavailable(format!(
            "{} returned {} embeddings for {} texts",
            encoder.id(),
            embeddings.len(),
            texts.len()
        )));
    }

    let (query_vector, candidates) = embeddings.split_at(1);
    let query_vector = &query_vector[0];
    let dimension = query_vector.len();

    candidates
        .iter()
        .map(|candidate| {
            if candidate.len() != dimension {
                return Err(MatchError::Unavailable(format!(
                    "{} dimension mismatch: expected {}, got {}",
                    encoder.id(),
                    dimension,
                    candidate.len()
                )));
            }
            Ok(dot(query_vector, candidate).clamp(-1.0, 1.0))
        })
        .collect()
}

/// FNV-1a feature-hashing encoder
///
/// Deterministic and dependency-free: each token is hashed into one of
/// `dimension` buckets and counted. Only surface overlap is captured, so it
/// stands in for a pretrained model in tests and benchmarks.
#[derive(Debug, Clone)]
pub struct HashingEncoder {
    id: String,
    dimension: usize,
}

impl HashingEncoder {
    pub const DEFAULT_DIMENSION: usize = 384;

    pub fn new(dimension: usize) -> Self {
        let dimension = dimension.max(1);
        Self {
            id: format!("fnv1a-{}", dimension),
            dimension,
        }
    }

    fn bucket(token: &str, dimension: usize) -> usize {
        let mut hash: u64 = 0xcbf29ce484222325;
        for byte in token.as_bytes() {
            hash ^= *byte as u64;
            hash = hash.wrapping_mul(0x100000001b3);
        }
        (hash % dimension as u64) as usize
    }

    fn encode_one(&self, text: &str) -> Vec<f32> {
        let mut vector = vec![0.0f32; self.dimension];
        let tokens = tokenize(text);
        if tokens.is_empty() {
            // fixed vector for text with no tokens
            vector[0] = 1.0;
            return vector;
        }
        for token in tokens {
            vector[Self::bucket(token, self.dimension)] += 1.0;
        }
        unit_normalize(&mut vector);
        vector
    }
}

impl Default for HashingEncoder {
    fn default() -> Self {
        Self::new(Self::DEFAULT_DIMENSION)
    }
}

impl SemanticEncoder for HashingEncoder {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError> {
        Ok(texts.iter().map(|text| self.encode_one(text)).collect())
    }
}

/// Encoder placeholder installed when no model could be loaded
#[derive(Debug, Clone)]
pub struct UnavailableEncoder {
    id: String,
    reason: String,
}

impl UnavailableEncoder {
    pub fn new(id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            reason: reason.into(),
        }
    }

    pub fn reason(&self) -> &str {
        &self.reason
    }
}

impl SemanticEncoder for UnavailableEncoder {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimension(&self) -> usize {
        0
    }

    fn encode_batch(&self, _texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError> {
        Err(MatchError::Unavailable(format!(
            "encoder {} not loaded: {}",
            self.id, self.reason
        )))
    }
}
