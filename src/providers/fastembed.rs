//! Local embeddings via fastembed-rs.

use std::path::PathBuf;
use std::sync::Mutex;

use tracing::debug;

use crate::classifier::l2_normalize;
use crate::config::ModelConfig;
use crate::error::{Result, SemanticError};
use crate::providers::EmbeddingProvider;
use crate::types::EmbeddingVector;

/// Supported local embedding models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocalEmbeddingModel {
    /// paraphrase-multilingual-MiniLM-L12-v2 (384 dims, zh + en, default).
    ParaphraseMultilingualMiniLmL12V2,
    /// multilingual-e5-small (384 dims).
    MultilingualE5Small,
    /// BGE-small-zh v1.5 (512 dims, Chinese only).
    BgeSmallZh,
    /// all-MiniLM-L6-v2 (384 dims, English, fast).
    AllMiniLmL6V2,
    /// all-MiniLM-L12-v2 (384 dims, English).
    AllMiniLmL12V2,
    /// BGE-small-en v1.5 (384 dims, English).
    BgeSmallEn,
    /// BGE-base-en v1.5 (768 dims, English).
    BgeBaseEn,
}

impl LocalEmbeddingModel {
    pub const ALL: [LocalEmbeddingModel; 7] = [
        Self::ParaphraseMultilingualMiniLmL12V2,
        Self::MultilingualE5Small,
        Self::BgeSmallZh,
        Self::AllMiniLmL6V2,
        Self::AllMiniLmL12V2,
        Self::BgeSmallEn,
        Self::BgeBaseEn,
    ];

    /// Get the model name for display and configuration.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ParaphraseMultilingualMiniLmL12V2 => "paraphrase-multilingual-MiniLM-L12-v2",
            Self::MultilingualE5Small => "multilingual-e5-small",
            Self::BgeSmallZh => "bge-small-zh-v1.5",
            Self::AllMiniLmL6V2 => "all-MiniLM-L6-v2",
            Self::AllMiniLmL12V2 => "all-MiniLM-L12-v2",
            Self::BgeSmallEn => "bge-small-en-v1.5",
            Self::BgeBaseEn => "bge-base-en-v1.5",
        }
    }

    /// Get the embedding dimensions.
    pub fn dimensions(&self) -> usize {
        match self {
            Self::BgeSmallZh => 512,
            Self::BgeBaseEn => 768,
            _ => 384,
        }
    }

    /// Look up a model by name.
    ///
    /// Case-insensitive; a hub-style `org/` prefix is ignored, so
    /// `sentence-transformers/all-MiniLM-L6-v2` resolves too.
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.rsplit('/').next().unwrap_or(name).trim();
        Self::ALL
            .into_iter()
            .find(|m| m.name().eq_ignore_ascii_case(short))
    }
}

impl From<LocalEmbeddingModel> for ::fastembed::EmbeddingModel {
    fn from(model: LocalEmbeddingModel) -> Self {
        match model {
            LocalEmbeddingModel::ParaphraseMultilingualMiniLmL12V2 => {
                ::fastembed::EmbeddingModel::ParaphraseMLMiniLML12V2
            }
            LocalEmbeddingModel::MultilingualE5Small => {
                ::fastembed::EmbeddingModel::MultilingualE5Small
            }
            LocalEmbeddingModel::BgeSmallZh => ::fastembed::EmbeddingModel::BGESmallZHV15,
            LocalEmbeddingModel::AllMiniLmL6V2 => ::fastembed::EmbeddingModel::AllMiniLML6V2,
            LocalEmbeddingModel::AllMiniLmL12V2 => ::fastembed::EmbeddingModel::AllMiniLML12V2,
            LocalEmbeddingModel::BgeSmallEn => ::fastembed::EmbeddingModel::BGESmallENV15,
            LocalEmbeddingModel::BgeBaseEn => ::fastembed::EmbeddingModel::BGEBaseENV15,
        }
    }
}

/// Local embedding provider using fastembed-rs.
///
/// fastembed's `embed` needs `&mut self`, so calls into the ONNX session
/// are serialized behind a mutex.
pub struct FastEmbedProvider {
    model: Mutex<::fastembed::TextEmbedding>,
    kind: LocalEmbeddingModel,
}

impl FastEmbedProvider {
    /// Create a new provider with the specified model.
    ///
    /// Downloads the model into `cache_dir` if not cached locally.
    pub fn new(
        model: LocalEmbeddingModel,
        cache_dir: PathBuf,
        show_download_progress: bool,
    ) -> Result<Self> {
        let options = ::fastembed::InitOptions::new(model.into())
            .with_show_download_progress(show_download_progress)
            .with_cache_dir(cache_dir);

        let model_instance = ::fastembed::TextEmbedding::try_new(options).map_err(|e| {
            SemanticError::ModelUnavailable(format!(
                "failed to load embedding model {}: {e}",
                model.name()
            ))
        })?;

        Ok(Self {
            model: Mutex::new(model_instance),
            kind: model,
        })
    }

    /// Create a provider from the `[model]` configuration section.
    pub fn from_config(config: &ModelConfig) -> Result<Self> {
        let model = LocalEmbeddingModel::from_name(&config.name).ok_or_else(|| {
            SemanticError::ModelUnavailable(format!(
                "unsupported embedding model '{}'",
                config.name
            ))
        })?;
        Self::new(
            model,
            config.resolved_cache_dir(),
            config.show_download_progress,
        )
    }

    pub fn model(&self) -> LocalEmbeddingModel {
        self.kind
    }

    fn run(&self, texts: Vec<String>) -> Result<Vec<EmbeddingVector>> {
        let mut model = self
            .model
            .lock()
            .map_err(|_| SemanticError::LockPoisoned("fastembed session"))?;
        model
            .embed(texts, None)
            .map_err(|e| SemanticError::Embedding(e.to_string()))
    }
}

impl EmbeddingProvider for FastEmbedProvider {
    fn name(&self) -> &str {
        self.kind.name()
    }

    fn dimensions(&self) -> Option<usize> {
        Some(self.kind.dimensions())
    }

    fn encode(&self, text: &str, normalize: bool) -> Result<EmbeddingVector> {
        let mut values = self
            .run(vec![text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| SemanticError::Embedding("no embedding returned".to_string()))?;
        if normalize {
            l2_normalize(&mut values);
        }
        Ok(values)
    }

    fn encode_batch(&self, texts: &[&str], normalize: bool) -> Result<Vec<EmbeddingVector>> {
        let texts_owned: Vec<String> = texts.iter().map(|s| s.to_string()).collect();
        let mut vectors = self.run(texts_owned)?;

        if vectors.len() != texts.len() {
            return Err(SemanticError::Embedding(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }
        if normalize {
            vectors.iter_mut().for_each(|v| l2_normalize(v));
        }
        debug!(model = self.kind.name(), count = vectors.len(), "batch embedded");
        Ok(vectors)
    }
}
