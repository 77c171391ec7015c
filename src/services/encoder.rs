use crate::config::EncoderSettings;
use crate::core::semantic::{SemanticEncoder, UnavailableEncoder};
use crate::models::EncoderStatus;
use std::sync::Arc;

/// Process-wide semantic encoder
///
/// Started once at process start and handed to request handlers as a shared
/// read-only `Arc`. When no model can be loaded the runtime holds an
/// [`UnavailableEncoder`], and the match service's fallback policy decides
/// what requests do.
pub struct EncoderRuntime {
    encoder: Arc<dyn SemanticEncoder>,
    available: bool,
}

impl EncoderRuntime {
    /// Initialise the configured encoder
    pub fn start(settings: &EncoderSettings) -> Self {
        if !settings.enabled {
            tracing::info!("Semantic encoder disabled by configuration");
            return Self::unavailable(&settings.model, "disabled by configuration");
        }

        Self::load(settings)
    }

    #[cfg(feature = "fastembed")]
    fn load(settings: &EncoderSettings) -> Self {
        use crate::services::fastembed_encoder::FastEmbedEncoder;

        tracing::info!("Loading semantic encoder {}", settings.model);
        match FastEmbedEncoder::load(settings) {
            Ok(encoder) => {
                tracing::info!(
                    "Semantic encoder {} loaded ({} dims)",
                    encoder.id(),
                    encoder.dimension()
                );
                Self::with_encoder(Arc::new(encoder))
            }
            Err(e) => {
                tracing::error!("Failed to load semantic encoder {}: {}", settings.model, e);
                Self::unavailable(&settings.model, e.to_string())
            }
        }
    }

    #[cfg(not(feature = "fastembed"))]
    fn load(settings: &EncoderSettings) -> Self {
        tracing::error!("Built without the fastembed feature, semantic encoder unavailable");
        Self::unavailable(&settings.model, "built without the fastembed feature")
    }

    /// Wrap an already constructed encoder
    pub fn with_encoder(encoder: Arc<dyn SemanticEncoder>) -> Self {
        Self {
            encoder,
            available: true,
        }
    }

    pub fn unavailable(model: &str, reason: impl Into<String>) -> Self {
        Self {
            encoder: Arc::new(UnavailableEncoder::new(model, reason)),
            available: false,
        }
    }

    /// Shared handle to the encoder
    pub fn encoder(&self) -> Arc<dyn SemanticEncoder> {
        Arc::clone(&self.encoder)
    }

    pub fn is_available(&self) -> bool {
        self.available
    }

    pub fn status(&self) -> EncoderStatus {
        EncoderStatus {
            id: self.encoder.id().to_string(),
            dimension: self.encoder.dimension(),
            available: self.available,
        }
    }

    /// Release the runtime's handle
    ///
    /// The model is freed once the last outstanding handle is dropped.
    pub fn shutdown(self) {
        let outstanding = Arc::strong_count(&self.encoder) - 1;
        tracing::info!(
            "Shutting down semantic encoder {} ({} outstanding handles)",
            self.encoder.id(),
            outstanding
        );
    }
}
