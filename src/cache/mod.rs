//! Per-taxonomy centroid cache.
//!
//! Centroid sets are computed lazily on first use and kept for the life of
//! the cache: no TTL, and a capacity above the number of taxonomies so
//! nothing is ever evicted. There is no invalidation path; a different
//! model or catalog means a new [`SemanticService`](crate::SemanticService).
//!
//! Concurrent first requests for the same taxonomy are coalesced by moka:
//! exactly one caller runs the build while the others wait for its result.
//! A failed build is not cached, so the next caller tries again.

mod centroid;

pub use centroid::CentroidSet;

use std::sync::Arc;

use moka::sync::Cache;

use crate::error::{Result, SemanticError};
use crate::telemetry;
use crate::types::Taxonomy;

/// Capacity headroom over [`Taxonomy::ALL`]; entries are never evicted.
const CENTROID_CACHE_CAPACITY: u64 = 8;

/// Thread-safe memo of centroid sets keyed on [`Taxonomy`].
pub struct CentroidCache {
    entries: Cache<Taxonomy, Arc<CentroidSet>>,
}

impl CentroidCache {
    pub fn new() -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(CENTROID_CACHE_CAPACITY)
                .build(),
        }
    }

    /// Cached centroids for `taxonomy`, if already built.
    pub fn get(&self, taxonomy: Taxonomy) -> Option<Arc<CentroidSet>> {
        self.entries.get(&taxonomy)
    }

    /// Return the cached set or run `build` exactly once to create it.
    pub fn get_or_build<F>(&self, taxonomy: Taxonomy, build: F) -> Result<Arc<CentroidSet>>
    where
        F: FnOnce() -> Result<CentroidSet>,
    {
        self.entries
            .try_get_with(taxonomy, || {
                metrics::counter!(telemetry::CENTROID_BUILDS_TOTAL, "taxonomy" => taxonomy.as_str())
                    .increment(1);
                build().map(Arc::new)
            })
            .map_err(SemanticError::from_shared)
    }

    /// Whether centroids for `taxonomy` are already built.
    pub fn contains(&self, taxonomy: Taxonomy) -> bool {
        self.entries.contains_key(&taxonomy)
    }

    /// Number of built taxonomies.
    pub fn len(&self) -> usize {
        Taxonomy::ALL.iter().filter(|t| self.contains(**t)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CentroidCache {
    fn default() -> Self {
        Self::new()
    }
}
