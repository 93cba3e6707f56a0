//! Huginn - nearest-centroid intent and action classification
//!
//! This crate classifies short utterances into a fixed set of *intents*
//! (what the user wants to do) and *actions* (how they answer a pending
//! dialog turn). Each category is described by a handful of example
//! phrases; their sentence embeddings are averaged into a centroid, and an
//! utterance is assigned to the nearest centroid by cosine similarity, or
//! to a sentinel label when nothing is close enough.
//!
//! The embedding model is loaded at most once, through a [`ModelGuard`],
//! and centroids are built lazily per [`Taxonomy`] and then memoized.
//!
//! # Example
//!
//! ```rust,no_run
//! # #[cfg(feature = "local-inference")]
//! # fn main() -> huginn::Result<()> {
//! use huginn::{Config, SemanticService};
//!
//! let config = Config::load_or_default(None)?;
//! let service = SemanticService::start(config.model)?;
//!
//! let intent = service.classify_intent("remind me to buy milk tomorrow")?;
//! let (label, score) = intent.into_pair();
//! println!("{label} ({score:.3})");
//!
//! let action = service.classify_action("yes, go ahead")?;
//! println!("{}", action.label());
//! #     Ok(())
//! # }
//! # #[cfg(not(feature = "local-inference"))]
//! # fn main() {}
//! ```

pub mod cache;
pub mod catalog;
pub mod classifier;
pub mod config;
pub mod error;
pub mod i18n;
pub mod model;
pub mod providers;
pub mod service;
pub mod telemetry;
pub mod types;
mod version;

// Re-export main types at crate root
pub use cache::{CentroidCache, CentroidSet};
pub use catalog::{Catalog, Category, TaxonomyCatalog};
pub use config::{Config, I18nConfig, ModelConfig};
pub use error::{Result, SemanticError};
pub use i18n::{LocaleCatalog, Translator};
pub use model::ModelGuard;
pub use providers::EmbeddingProvider;
pub use service::SemanticService;
pub use version::{GIT_BRANCH, GIT_SHA, PKG_VERSION, git_dirty, version_string};

#[cfg(feature = "local-inference")]
pub use providers::{FastEmbedProvider, LocalEmbeddingModel};

pub use types::{
    ACTION_SENTINEL, ACTION_THRESHOLD, Classification, EmbeddingVector, INTENT_SENTINEL,
    INTENT_THRESHOLD, IntentCandidate, Priority, Slots, Taxonomy,
};
