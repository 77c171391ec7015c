//! Pretrained sentence encoder backed by fastembed (ONNX runtime).
//!
//! Model assets are fetched into the cache directory on first load and
//! reused afterwards.

use crate::config::EncoderSettings;
use crate::core::semantic::{unit_normalize, SemanticEncoder};
use crate::core::MatchError;
use ::fastembed::{EmbeddingModel, TextEmbedding, TextInitOptions};
use std::sync::Mutex;

/// fastembed-backed semantic encoder
///
/// `TextEmbedding::embed` takes `&mut self`, so inference is serialised
/// through the mutex.
pub struct FastEmbedEncoder {
    model: Mutex<TextEmbedding>,
    id: String,
    dimension: usize,
    batch_size: Option<usize>,
}

impl FastEmbedEncoder {
    /// Resolve a model code (e.g. `intfloat/multilingual-e5-small`) to a
    /// supported model and its output dimension
    pub fn resolve_model(model_code: &str) -> Option<(EmbeddingModel, usize)> {
        TextEmbedding::list_supported_models()
            .into_iter()
            .find(|info| info.model_code.eq_ignore_ascii_case(model_code))
            .map(|info| (info.model, info.dim))
    }

    /// Load the configured model
    ///
    /// # Errors
    /// `Unavailable` when the model code is unknown or initialisation fails.
    pub fn load(settings: &EncoderSettings) -> Result<Self, MatchError> {
        let (model, dimension) = Self::resolve_model(&settings.model).ok_or_else(|| {
            MatchError::Unavailable(format!("unsupported embedding model: {}", settings.model))
        })?;

        let mut options =
            TextInitOptions::new(model).with_show_download_progress(settings.show_download_progress);
        if let Some(dir) = &settings.cache_dir {
            options = options.with_cache_dir(dir.clone());
        }

        let model = TextEmbedding::try_new(options).map_err(|e| {
            MatchError::Unavailable(format!("fastembed init failed for {}: {}", settings.model, e))
        })?;

        Ok(Self {
            model: Mutex::new(model),
            id: settings.model.clone(),
            dimension,
            batch_size: settings.batch_size,
        })
    }
}

impl SemanticEncoder for FastEmbedEncoder {
    fn id(&self) -> &str {
        &self.id
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn encode_batch(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, MatchError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let mut model = self
            .model
            .lock()
            .map_err(|_| MatchError::Unavailable("fastembed lock poisoned".to_string()))?;

        let mut embeddings = model
            .embed(texts.to_vec(), self.batch_size)
            .map_err(|e| MatchError::Unavailable(format!("fastembed embed failed: {}", e)))?;
        drop(model);

        for embedding in embeddings.iter_mut() {
            if embedding.len() != self.dimension {
                return Err(MatchError::Unavailable(format!(
                    "fastembed dimension mismatch: expected {}, got {}",
                    self.dimension,
                    embedding.len()
                )));
            }
            unit_normalize(embedding);
        }

        Ok(embeddings)
    }
}
