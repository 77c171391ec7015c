// Core algorithm exports
pub mod error;
pub mod lexical;
pub mod matcher;
pub mod ranker;
pub mod semantic;
pub mod text;

pub use error::{MatchError, MatchErrorKind};
pub use lexical::{lexical_scores, tokenize, TfIdfFit};
pub use matcher::MatchService;
pub use ranker::SimilarityRanker;
pub use semantic::{semantic_scores, HashingEncoder, SemanticEncoder, UnavailableEncoder};
pub use text::normalize;
