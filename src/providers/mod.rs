//! Embedding providers.
//!
//! [`EmbeddingProvider`] is the seam between the classifier and whatever
//! turns text into vectors. The crate ships one implementation,
//! [`FastEmbedProvider`], behind the `local-inference` feature.

#[cfg(feature = "local-inference")]
pub mod fastembed;
pub mod traits;

#[cfg(feature = "local-inference")]
pub use self::fastembed::{FastEmbedProvider, LocalEmbeddingModel};
pub use traits::EmbeddingProvider;
