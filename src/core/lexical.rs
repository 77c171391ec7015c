use crate::models::ProfileText;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

/// Tokens are runs of two or more word characters
static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is valid"));

/// Split text into lexical tokens
pub fn tokenize(text: &str) -> Vec<&str> {
    TOKEN_PATTERN.find_iter(text).map(|m| m.as_str()).collect()
}

/// L2-normalized sparse vector, entries sorted by term index
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparseVector {
    entries: Vec<(usize, f64)>,
}

impl SparseVector {
    pub fn is_zero(&self) -> bool {
        self.entries.is_empty()
    }

    /// Dot product; equals cosine similarity since both sides are unit length
    pub fn dot(&self, other: &SparseVector) -> f64 {
        let (mut i, mut j) = (0, 0);
        let mut sum = 0.0;
        while i < self.entries.len() && j < other.entries.len() {
            let (a_idx, a_val) = self.entries[i];
            let (b_idx, b_val) = other.entries[j];
            match a_idx.cmp(&b_idx) {
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
                std::cmp::Ordering::Equal => {
                    sum += a_val * b_val;
                    i += 1;
                    j += 1;
                }
            }
        }
        sum
    }
}

/// TF-IDF term space fitted over one exact document set
///
/// Vocabulary is sorted alphabetically and IDF is smoothed:
/// `idf(t) = ln((1 + n) / (1 + df(t))) + 1`. A fit belongs to the call that
/// built it; scoring a different corpus needs a new fit.
#[derive(Debug, Clone)]
pub struct TfIdfFit {
    vocabulary: HashMap<String, usize>,
    idf: Vec<f64>,
}

impl TfIdfFit {
    /// Fit over the given documents
    pub fn fit<S: AsRef<str>>(documents: &[S]) -> Self {
        let tokenized: Vec<Vec<&str>> = documents.iter().map(|d| tokenize(d.as_ref())).collect();
        Self::fit_tokenized(&tokenized)
    }

    fn fit_tokenized(documents: &[Vec<&str>]) -> Self {
        let terms: BTreeSet<&str> = documents.iter().flatten().copied().collect();
        let vocabulary: HashMap<String, usize> = terms
            .into_iter()
            .enumerate()
            .map(|(idx, term)| (term.to_string(), idx))
            .collect();

        let mut doc_freq = vec![0usize; vocabulary.len()];
        for tokens in documents {
            let unique: BTreeSet<usize> = tokens.iter().filter_map(|t| vocabulary.get(*t).copied()).collect();
            for idx in unique {
                doc_freq[idx] += 1;
            }
        }

        let n = documents.len() as f64;
        let idf = doc_freq
            .into_iter()
            .map(|df| ((1.0 + n) / (1.0 + df as f64)).ln() + 1.0)
            .collect();

        Self { vocabulary, idf }
    }

    pub fn vocabulary_size(&self) -> usize {
        self.idf.len()
    }

    /// Project text into the fitted term space
    ///
    /// Terms outside the vocabulary are ignored; text with no known terms
    /// maps to the zero vector.
    pub fn transform(&self, text: &str) -> SparseVector {
        self.transform_tokens(&tokenize(text))
    }

    fn transform_tokens(&self, tokens: &[&str]) -> SparseVector {
        let mut counts: HashMap<usize, f64> = HashMap::new();
        for token in tokens {
            if let Some(&idx) = self.vocabulary.get(*token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut entries: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| (idx, tf * self.idf[idx]))
            .collect();
        entries.sort_unstable_by_key(|(idx, _)| *idx);

        let norm = entries.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
        if norm > 0.0 && norm.is_finite() {
            for (_, w) in entries.iter_mut() {
                *w /= norm;
            }
        } else {
            entries.clear();
        }

        SparseVector { entries }
    }
}

/// Cosine similarity of the query against each corpus entry
///
/// The TF-IDF space is fitted jointly over the query and the corpus. Scores
/// line up with `corpus` positionally and lie in `[0, 1]`; any zero vector
/// scores 0.0. An empty corpus yields an empty result.
pub fn lexical_scores(query: &ProfileText, corpus: &[&ProfileText]) -> Vec<f64> {
    if corpus.is_empty() {
        return Vec::new();
    }

    let documents: Vec<Vec<&str>> = std::iter::once(query.as_str())
        .chain(corpus.iter().map(|text| text.as_str()))
        .map(tokenize)
        .collect();

    let fit = TfIdfFit::fit_tokenized(&documents);
    let query_vector = fit.transform_tokens(&documents[0]);

    if query_vector.is_zero() {
        return vec![0.0; corpus.len()];
    }

    documents[1..]
        .iter()
        .map(|tokens| query_vector.dot(&fit.transform_tokens(tokens)).clamp(0.0, 1.0))
        .collect()
}
