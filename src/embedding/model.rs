use crate::embedding::EmbeddingBackend;
use crate::error::{Error, Result};
use fastembed::{EmbeddingModel, InitOptions, TextEmbedding};
use std::sync::Mutex;

/// Local embedding model via fastembed. Uses a multilingual model so Thai
/// recipe text and queries share one vector space.
pub struct FastEmbedBackend {
    model: Mutex<TextEmbedding>,
}

impl FastEmbedBackend {
    /// Initialize the model, downloading it on first use.
    pub fn new() -> Result<Self> {
        let model = TextEmbedding::try_new(
            InitOptions::new(EmbeddingModel::MultilingualE5Small).with_show_download_progress(false),
        )
        .map_err(|e| {
            Error::Embedding(format!(
                "failed to initialize embedding model: {e}. \
                 First-time use downloads the model and needs network access"
            ))
        })?;

        Ok(Self {
            model: Mutex::new(model),
        })
    }
}

impl EmbeddingBackend for FastEmbedBackend {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        self.model
            .lock()
            .map_err(|_| Error::Embedding("embedding model lock poisoned".to_string()))?
            .embed(texts.to_vec(), None)
            .map_err(|e| Error::Embedding(format!("failed to generate embeddings: {e}")))
    }
}
