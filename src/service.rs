//! The semantic service: embedding and nearest-centroid classification.
//!
//! [`SemanticService`] is the explicit service object the boundary layer
//! holds. It is built once at startup and shared by reference (or `Arc`)
//! with every request handler. It owns:
//!
//! - a handle to the [`ModelGuard`] that constructs the embedding provider
//!   at most once;
//! - the model configuration used for that construction;
//! - the immutable [`Catalog`] of example phrases;
//! - the [`CentroidCache`] that memoizes one centroid set per taxonomy.
//!
//! All methods are synchronous and may block for tens of milliseconds
//! inside the provider. Async callers use [`SemanticService::spawn_classify`]
//! and [`SemanticService::spawn_embed`], which move the work to tokio's
//! blocking pool.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use huginn::catalog::{Catalog, TaxonomyCatalog};
//! use huginn::providers::EmbeddingProvider;
//! use huginn::{SemanticService, Taxonomy};
//!
//! struct Keyword;
//!
//! impl EmbeddingProvider for Keyword {
//!     fn name(&self) -> &str {
//!         "keyword"
//!     }
//!
//!     fn encode(&self, text: &str, _normalize: bool) -> huginn::Result<Vec<f32>> {
//!         Ok(if text.contains("yes") { vec![1.0, 0.0] } else { vec![0.0, 1.0] })
//!     }
//! }
//!
//! # fn main() -> huginn::Result<()> {
//! let catalog = Catalog::new(
//!     TaxonomyCatalog::from_pairs(Taxonomy::Intent, [("other", &["x"][..])])?,
//!     TaxonomyCatalog::from_pairs(Taxonomy::Action, [("confirm", &["yes"][..])])?,
//! )?;
//! let service = SemanticService::with_provider(Arc::new(Keyword), catalog);
//!
//! let result = service.classify_action("yes please")?;
//! assert_eq!(result.label(), "confirm");
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::cache::{CentroidCache, CentroidSet};
use crate::catalog::Catalog;
use crate::classifier::{decide, nearest};
use crate::config::ModelConfig;
use crate::error::{Result, SemanticError};
use crate::model::ModelGuard;
use crate::providers::EmbeddingProvider;
use crate::telemetry;
use crate::types::{
    ACTION_THRESHOLD, Classification, EmbeddingVector, INTENT_THRESHOLD, Taxonomy,
};

/// Embedding and classification over one provider and one catalog.
pub struct SemanticService {
    guard: Arc<ModelGuard>,
    model_config: ModelConfig,
    catalog: Catalog,
    centroids: CentroidCache,
}

impl SemanticService {
    /// Create a service that loads its provider lazily through `guard`.
    pub fn new(guard: Arc<ModelGuard>, model_config: ModelConfig, catalog: Catalog) -> Self {
        Self {
            guard,
            model_config,
            catalog,
            centroids: CentroidCache::new(),
        }
    }

    /// Create a service around an already constructed provider.
    pub fn with_provider(provider: Arc<dyn EmbeddingProvider>, catalog: Catalog) -> Self {
        Self::new(
            Arc::new(ModelGuard::with_provider(provider)),
            ModelConfig::default(),
            catalog,
        )
    }

    /// Startup path: process-wide fastembed guard, built-in catalog, and an
    /// eager model load.
    ///
    /// A load failure is returned here and the caller should refuse to
    /// serve; the guard will not retry it.
    #[cfg(feature = "local-inference")]
    pub fn start(model_config: ModelConfig) -> Result<Self> {
        let service = Self::new(ModelGuard::global(), model_config, Catalog::builtin());
        service.preload()?;
        Ok(service)
    }

    /// Load the embedding provider now instead of on first request.
    pub fn preload(&self) -> Result<()> {
        self.guard.preload(&self.model_config)
    }

    /// Load the provider and build the centroids of every taxonomy.
    pub fn warm_up(&self) -> Result<()> {
        self.preload()?;
        for taxonomy in Taxonomy::ALL {
            self.centroids_for(taxonomy)?;
        }
        Ok(())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn model_config(&self) -> &ModelConfig {
        &self.model_config
    }

    /// Whether the embedding provider has been constructed.
    pub fn is_loaded(&self) -> bool {
        self.guard.is_loaded()
    }

    fn provider(&self) -> Result<Arc<dyn EmbeddingProvider>> {
        self.guard.provider(&self.model_config)
    }

    /// Normalized embedding of `text`; empty text yields an empty vector.
    pub fn embed(&self, text: &str) -> Result<EmbeddingVector> {
        self.embed_with(text, true)
    }

    /// Embedding of `text`, normalized or raw as the provider returns it.
    ///
    /// Empty text yields an empty vector without touching the provider.
    pub fn embed_with(&self, text: &str, normalize: bool) -> Result<EmbeddingVector> {
        if text.is_empty() {
            return Ok(Vec::new());
        }
        let provider = self.provider()?;
        let start = Instant::now();
        let result = provider.encode(text, normalize);
        metrics::histogram!(telemetry::EMBED_DURATION_SECONDS, "operation" => "embed")
            .record(start.elapsed().as_secs_f64());
        result
    }

    /// Normalized embeddings of `texts`, in input order.
    ///
    /// Empty strings map to empty vectors. Only the non-empty texts are
    /// forwarded, in a single provider call; a batch with nothing to embed
    /// never touches the provider.
    pub fn embed_batch(&self, texts: &[&str]) -> Result<Vec<EmbeddingVector>> {
        let pending: Vec<&str> = texts.iter().copied().filter(|t| !t.is_empty()).collect();
        if pending.is_empty() {
            return Ok(vec![Vec::new(); texts.len()]);
        }

        let provider = self.provider()?;
        let start = Instant::now();
        let result = provider.encode_batch(&pending, true);
        metrics::histogram!(telemetry::EMBED_DURATION_SECONDS, "operation" => "embed_batch")
            .record(start.elapsed().as_secs_f64());
        let embedded = result?;

        if embedded.len() != pending.len() {
            return Err(SemanticError::Embedding(format!(
                "expected {} embeddings, got {}",
                pending.len(),
                embedded.len()
            )));
        }

        // Reassemble in original order
        let mut embedded = embedded.into_iter();
        Ok(texts
            .iter()
            .map(|t| {
                if t.is_empty() {
                    Vec::new()
                } else {
                    embedded.next().unwrap_or_default()
                }
            })
            .collect())
    }

    /// Centroids for `taxonomy`, built on first use and then memoized.
    pub fn centroids_for(&self, taxonomy: Taxonomy) -> Result<Arc<CentroidSet>> {
        self.centroids.get_or_build(taxonomy, || {
            let provider = self.provider()?;
            CentroidSet::build(self.catalog.get(taxonomy), provider.as_ref())
        })
    }

    /// Classify `text` against `taxonomy` with an explicit threshold.
    ///
    /// Below-threshold and empty input are ordinary outcomes, not errors.
    pub fn classify(&self, text: &str, taxonomy: Taxonomy, threshold: f32) -> Result<Classification> {
        if text.is_empty() {
            record_outcome(taxonomy, "empty");
            return Ok(Classification::EmptyInput { taxonomy });
        }

        let query = self.embed(text)?;
        let centroids = self.centroids_for(taxonomy)?;
        if !centroids.is_empty() && query.len() != centroids.dimensions() {
            return Err(SemanticError::DimensionMismatch {
                expected: centroids.dimensions(),
                actual: query.len(),
            });
        }

        let result = decide(taxonomy, threshold, nearest(&query, centroids.iter()));
        match &result {
            Classification::Matched { label, score } => {
                info!(%taxonomy, label = %label, score = *score, "classified");
                record_outcome(taxonomy, "matched");
            }
            Classification::BelowThreshold {
                best_label,
                best_score,
                ..
            } => {
                debug!(
                    %taxonomy,
                    best_label = best_label.as_deref().unwrap_or("-"),
                    best_score = *best_score,
                    threshold,
                    "below threshold"
                );
                record_outcome(taxonomy, "below_threshold");
            }
            Classification::EmptyInput { .. } => record_outcome(taxonomy, "empty"),
        }
        Ok(result)
    }

    /// Classify against the intent taxonomy (threshold 0.60, sentinel "unknown").
    pub fn classify_intent(&self, text: &str) -> Result<Classification> {
        self.classify(text, Taxonomy::Intent, INTENT_THRESHOLD)
    }

    /// Classify against the action taxonomy (threshold 0.75, sentinel "none").
    pub fn classify_action(&self, text: &str) -> Result<Classification> {
        self.classify(text, Taxonomy::Action, ACTION_THRESHOLD)
    }

    /// [`classify`](Self::classify) with the taxonomy's own threshold, on
    /// tokio's blocking pool.
    pub async fn spawn_classify(
        self: &Arc<Self>,
        text: impl Into<String>,
        taxonomy: Taxonomy,
    ) -> Result<Classification> {
        let service = Arc::clone(self);
        let text = text.into();
        tokio::task::spawn_blocking(move || {
            service.classify(&text, taxonomy, taxonomy.threshold())
        })
        .await
        .map_err(|e| SemanticError::Worker(e.to_string()))?
    }

    /// [`embed`](Self::embed) on tokio's blocking pool.
    pub async fn spawn_embed(self: &Arc<Self>, text: impl Into<String>) -> Result<EmbeddingVector> {
        let service = Arc::clone(self);
        let text = text.into();
        tokio::task::spawn_blocking(move || service.embed(&text))
            .await
            .map_err(|e| SemanticError::Worker(e.to_string()))?
    }
}

fn record_outcome(taxonomy: Taxonomy, outcome: &'static str) {
    metrics::counter!(
        telemetry::CLASSIFICATIONS_TOTAL,
        "taxonomy" => taxonomy.as_str(),
        "outcome" => outcome
    )
    .increment(1);
}
