//! Centroid computation.

use std::time::Instant;

use tracing::{debug, info};

use crate::catalog::TaxonomyCatalog;
use crate::classifier::mean;
use crate::error::{Result, SemanticError};
use crate::providers::EmbeddingProvider;
use crate::types::{EmbeddingVector, Taxonomy};

/// One centroid per category of a taxonomy, in declaration order.
///
/// Each centroid is the element-wise mean of the category's normalized
/// example embeddings. The mean is left un-normalized: a
/// tight example set yields a longer centroid than a loose one.
#[derive(Debug, Clone, PartialEq)]
pub struct CentroidSet {
    taxonomy: Taxonomy,
    dimensions: usize,
    entries: Vec<(String, EmbeddingVector)>,
}

impl CentroidSet {
    /// Embed every example of every category and average per category.
    ///
    /// One `encode_batch` call per category, with normalization enabled.
    pub fn build(catalog: &TaxonomyCatalog, provider: &dyn EmbeddingProvider) -> Result<Self> {
        let start = Instant::now();
        let mut entries = Vec::with_capacity(catalog.len());
        let mut dimensions: Option<usize> = None;

        for category in catalog.categories() {
            let examples: Vec<&str> = category.examples().iter().map(String::as_str).collect();
            let vectors = provider.encode_batch(&examples, true)?;
            if vectors.len() != examples.len() {
                return Err(SemanticError::Embedding(format!(
                    "category '{}': expected {} embeddings, got {}",
                    category.name(),
                    examples.len(),
                    vectors.len()
                )));
            }

            for v in &vectors {
                let expected = *dimensions.get_or_insert(v.len());
                if v.len() != expected {
                    return Err(SemanticError::DimensionMismatch {
                        expected,
                        actual: v.len(),
                    });
                }
            }

            let centroid = mean(&vectors).ok_or_else(|| {
                SemanticError::Embedding(format!("category '{}' produced no vectors", category.name()))
            })?;
            debug!(
                taxonomy = %catalog.taxonomy(),
                category = category.name(),
                examples = examples.len(),
                "centroid computed"
            );
            entries.push((category.name().to_string(), centroid));
        }

        let dimensions = dimensions.unwrap_or(0);
        if dimensions == 0 && !entries.is_empty() {
            return Err(SemanticError::Embedding(format!(
                "provider {} returned empty embeddings",
                provider.name()
            )));
        }

        info!(
            taxonomy = %catalog.taxonomy(),
            categories = entries.len(),
            dimensions,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "centroids built"
        );

        Ok(Self {
            taxonomy: catalog.taxonomy(),
            dimensions,
            entries,
        })
    }

    /// Assemble a set from precomputed centroids.
    ///
    /// Names must be unique and all vectors must share one non-zero length.
    pub fn from_entries(taxonomy: Taxonomy, entries: Vec<(String, EmbeddingVector)>) -> Result<Self> {
        let dimensions = entries.first().map(|(_, v)| v.len()).unwrap_or(0);
        for (i, (name, v)) in entries.iter().enumerate() {
            if v.len() != dimensions || v.is_empty() {
                return Err(SemanticError::DimensionMismatch {
                    expected: dimensions,
                    actual: v.len(),
                });
            }
            if entries[..i].iter().any(|(n, _)| n == name) {
                return Err(SemanticError::InvalidCatalog(format!(
                    "duplicate {taxonomy} centroid '{name}'"
                )));
            }
        }
        Ok(Self {
            taxonomy,
            dimensions,
            entries,
        })
    }

    pub fn taxonomy(&self) -> Taxonomy {
        self.taxonomy
    }

    /// Shared dimensionality; `0` for an empty set.
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    pub fn get(&self, name: &str) -> Option<&[f32]> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_slice())
    }

    /// `(name, centroid)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f32])> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_entries_rejects_mixed_dimensions() {
        let result = CentroidSet::from_entries(
            Taxonomy::Intent,
            vec![("a".into(), vec![1.0, 0.0]), ("b".into(), vec![1.0])],
        );
        assert!(matches!(
            result,
            Err(SemanticError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }

    #[test]
    fn from_entries_rejects_duplicates() {
        let result = CentroidSet::from_entries(
            Taxonomy::Action,
            vec![("a".into(), vec![1.0]), ("a".into(), vec![0.5])],
        );
        assert!(matches!(result, Err(SemanticError::InvalidCatalog(_))));
    }

    #[test]
    fn iter_keeps_order() {
        let set = CentroidSet::from_entries(
            Taxonomy::Action,
            vec![("z".into(), vec![1.0]), ("a".into(), vec![0.5])],
        )
        .unwrap();
        let names: Vec<_> = set.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a"]);
        assert_eq!(set.get("a"), Some(&[0.5][..]));
        assert_eq!(set.dimensions(), 1);
    }
}
