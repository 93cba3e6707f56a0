//! Model access guard for lazy, at-most-once provider construction.
//!
//! Loading an embedding model takes seconds, so it happens once per guard,
//! on first use or on an explicit [`ModelGuard::preload`]. Construction uses
//! double-checked locking: a read-lock fast path, then a write lock with a
//! re-check before the expensive load. Concurrent first callers block on the
//! write lock and all receive the same instance.
//!
//! A failed load is remembered. Every later call fails with the same
//! message instead of repeating an expensive load that already failed.
//! A loader that panics counts as a failed load.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, RwLock};
use std::time::Instant;

use tracing::{error, info};

use crate::config::ModelConfig;
use crate::error::{Result, SemanticError};
use crate::providers::EmbeddingProvider;
use crate::telemetry;

/// Constructs the provider from the model configuration.
pub type ProviderLoader =
    dyn Fn(&ModelConfig) -> Result<Arc<dyn EmbeddingProvider>> + Send + Sync;

enum Slot {
    Empty,
    Ready(Arc<dyn EmbeddingProvider>),
    Failed(String),
}

/// Owner of the single embedding provider instance.
pub struct ModelGuard {
    slot: RwLock<Slot>,
    loader: Box<ProviderLoader>,
}

impl ModelGuard {
    /// Create a guard that builds its provider with `loader` on first use.
    pub fn with_loader<F>(loader: F) -> Self
    where
        F: Fn(&ModelConfig) -> Result<Arc<dyn EmbeddingProvider>> + Send + Sync + 'static,
    {
        Self {
            slot: RwLock::new(Slot::Empty),
            loader: Box::new(loader),
        }
    }

    /// Create a guard around an already constructed provider.
    pub fn with_provider(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            slot: RwLock::new(Slot::Ready(provider)),
            loader: Box::new(|_| {
                Err(SemanticError::ModelUnavailable(
                    "provider was injected; nothing to load".to_string(),
                ))
            }),
        }
    }

    /// Create a guard that loads a [`FastEmbedProvider`](crate::providers::FastEmbedProvider).
    #[cfg(feature = "local-inference")]
    pub fn fastembed() -> Self {
        Self::with_loader(|config| {
            let provider = crate::providers::FastEmbedProvider::from_config(config)?;
            Ok(Arc::new(provider) as Arc<dyn EmbeddingProvider>)
        })
    }

    /// The process-wide fastembed guard.
    #[cfg(feature = "local-inference")]
    pub fn global() -> Arc<ModelGuard> {
        static GLOBAL: std::sync::OnceLock<Arc<ModelGuard>> = std::sync::OnceLock::new();
        Arc::clone(GLOBAL.get_or_init(|| Arc::new(Self::fastembed())))
    }

    /// Get the provider, constructing it on first call.
    ///
    /// `config` only matters for the call that performs the construction;
    /// afterwards it is ignored.
    pub fn provider(&self, config: &ModelConfig) -> Result<Arc<dyn EmbeddingProvider>> {
        // Fast path: already decided (read lock)
        {
            let slot = self
                .slot
                .read()
                .map_err(|_| SemanticError::LockPoisoned("model guard"))?;
            match &*slot {
                Slot::Ready(provider) => return Ok(Arc::clone(provider)),
                Slot::Failed(message) => {
                    return Err(SemanticError::ModelUnavailable(message.clone()));
                }
                Slot::Empty => {}
            }
        }

        // Slow path: need to load (write lock)
        let mut slot = self
            .slot
            .write()
            .map_err(|_| SemanticError::LockPoisoned("model guard"))?;

        // Double-check after acquiring write lock
        match &*slot {
            Slot::Ready(provider) => return Ok(Arc::clone(provider)),
            Slot::Failed(message) => return Err(SemanticError::ModelUnavailable(message.clone())),
            Slot::Empty => {}
        }

        info!(
            model = %config.name,
            version = %crate::version_string(),
            "loading embedding model"
        );
        let start = Instant::now();

        let outcome = panic::catch_unwind(AssertUnwindSafe(|| (self.loader)(config)))
            .unwrap_or_else(|payload| {
                Err(SemanticError::ModelUnavailable(format!(
                    "model loader panicked: {}",
                    panic_message(payload.as_ref())
                )))
            });

        match outcome {
            Ok(provider) => {
                info!(
                    model = provider.name(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "embedding model loaded"
                );
                metrics::counter!(telemetry::MODEL_LOADS_TOTAL, "status" => "ok").increment(1);
                *slot = Slot::Ready(Arc::clone(&provider));
                Ok(provider)
            }
            Err(e) => {
                let message = match e {
                    SemanticError::ModelUnavailable(message) => message,
                    other => other.to_string(),
                };
                error!(model = %config.name, error = %message, "embedding model failed to load");
                metrics::counter!(telemetry::MODEL_LOADS_TOTAL, "status" => "error").increment(1);
                *slot = Slot::Failed(message.clone());
                Err(SemanticError::ModelUnavailable(message))
            }
        }
    }

    /// Explicitly load the provider ahead of the first request.
    pub fn preload(&self, config: &ModelConfig) -> Result<()> {
        let _ = self.provider(config)?;
        Ok(())
    }

    /// Whether a provider has been constructed successfully.
    pub fn is_loaded(&self) -> bool {
        self.slot
            .read()
            .map(|slot| matches!(&*slot, Slot::Ready(_)))
            .unwrap_or(false)
    }

    /// Name of the loaded provider, if any.
    pub fn loaded_model(&self) -> Option<String> {
        self.slot.read().ok().and_then(|slot| match &*slot {
            Slot::Ready(provider) => Some(provider.name().to_string()),
            _ => None,
        })
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
