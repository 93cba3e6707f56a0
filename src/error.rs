//! Huginn error types

use std::sync::Arc;

/// Huginn error types
#[derive(Debug, thiserror::Error)]
pub enum SemanticError {
    // Provider errors
    /// The embedding provider could not be constructed.
    ///
    /// Fatal: the guard remembers the failure and never retries the load.
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("embedding failed: {0}")]
    Embedding(String),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    // Data errors
    #[error("invalid category catalog: {0}")]
    InvalidCatalog(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),

    // Runtime errors
    #[error("lock poisoned: {0}")]
    LockPoisoned(&'static str),

    #[error("worker failed: {0}")]
    Worker(String),
}

impl SemanticError {
    /// Whether the process should stop serving until the cause is resolved.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::ModelUnavailable(_))
    }

    /// Recover an owned error from one shared between coalesced callers.
    pub(crate) fn from_shared(err: Arc<SemanticError>) -> Self {
        Arc::try_unwrap(err).unwrap_or_else(|shared| match &*shared {
            Self::ModelUnavailable(m) => Self::ModelUnavailable(m.clone()),
            Self::Embedding(m) => Self::Embedding(m.clone()),
            Self::DimensionMismatch { expected, actual } => Self::DimensionMismatch {
                expected: *expected,
                actual: *actual,
            },
            Self::InvalidCatalog(m) => Self::InvalidCatalog(m.clone()),
            Self::Configuration(m) => Self::Configuration(m.clone()),
            Self::LockPoisoned(what) => Self::LockPoisoned(what),
            Self::Worker(m) => Self::Worker(m.clone()),
            Self::Json(e) => Self::Configuration(e.to_string()),
        })
    }
}

/// Result type alias for Huginn operations
pub type Result<T> = std::result::Result<T, SemanticError>;
