//! Classification outcomes.

use serde::{Deserialize, Serialize};

use super::taxonomy::Taxonomy;

/// Outcome of classifying one utterance against one taxonomy.
///
/// A sub-threshold result is an expected outcome, not an error: callers
/// branch on it (e.g. ask a clarifying question) and can still observe the
/// rejected best score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum Classification {
    /// The nearest category cleared the threshold.
    Matched { label: String, score: f32 },

    /// Nothing cleared the threshold.
    ///
    /// `best_label` is `None` only when the taxonomy has no categories, in
    /// which case `best_score` is `-1.0`.
    BelowThreshold {
        taxonomy: Taxonomy,
        best_label: Option<String>,
        best_score: f32,
    },

    /// The input text was empty; no embedding was computed.
    EmptyInput { taxonomy: Taxonomy },
}

impl Classification {
    /// Matched label, or the taxonomy's sentinel.
    pub fn label(&self) -> &str {
        match self {
            Self::Matched { label, .. } => label,
            Self::BelowThreshold { taxonomy, .. } | Self::EmptyInput { taxonomy } => {
                taxonomy.sentinel()
            }
        }
    }

    /// Similarity of the (possibly rejected) best category; `0.0` for empty input.
    pub fn score(&self) -> f32 {
        match self {
            Self::Matched { score, .. } => *score,
            Self::BelowThreshold { best_score, .. } => *best_score,
            Self::EmptyInput { .. } => 0.0,
        }
    }

    pub fn is_match(&self) -> bool {
        matches!(self, Self::Matched { .. })
    }

    /// `(label, score)` as exposed to the HTTP boundary.
    pub fn into_pair(self) -> (String, f32) {
        let score = self.score();
        match self {
            Self::Matched { label, .. } => (label, score),
            other => (other.label().to_string(), score),
        }
    }
}
