//! Embedding provider trait.
//!
//! The provider is the opaque text-to-vector capability the classifier is
//! built on. Calls are synchronous and may take tens of milliseconds; async
//! callers should go through
//! [`SemanticService::spawn_classify`](crate::SemanticService::spawn_classify)
//! or their own blocking pool.
//!
//! # Example
//!
//! ```
//! use huginn::providers::EmbeddingProvider;
//! use huginn::Result;
//!
//! struct Constant;
//!
//! impl EmbeddingProvider for Constant {
//!     fn name(&self) -> &str {
//!         "constant"
//!     }
//!
//!     fn encode(&self, _text: &str, _normalize: bool) -> Result<Vec<f32>> {
//!         Ok(vec![1.0, 0.0])
//!     }
//! }
//!
//! let v = Constant.encode_batch(&["a", "b"], true).unwrap();
//! assert_eq!(v.len(), 2);
//! ```

use crate::Result;
use crate::types::EmbeddingVector;

/// Provider for text embeddings.
pub trait EmbeddingProvider: Send + Sync {
    /// Provider name for logging/debugging.
    fn name(&self) -> &str;

    /// Output dimensionality, when known up front.
    fn dimensions(&self) -> Option<usize> {
        None
    }

    /// Embed a single text.
    ///
    /// With `normalize` set the result has unit L2 length.
    fn encode(&self, text: &str, normalize: bool) -> Result<EmbeddingVector>;

    /// Embed several texts, preserving input order.
    ///
    /// Default implementation calls `encode` sequentially.
    fn encode_batch(&self, texts: &[&str], normalize: bool) -> Result<Vec<EmbeddingVector>> {
        let mut results = Vec::with_capacity(texts.len());
        for text in texts {
            results.push(self.encode(text, normalize)?);
        }
        Ok(results)
    }
}
