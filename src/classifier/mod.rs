//! Nearest-centroid decision rule.
//!
//! The classifier compares a unit-length query embedding with every
//! category centroid of a taxonomy, keeps the strictly best cosine
//! similarity (the earlier-declared category wins a tie), and accepts it
//! only at or above the taxonomy's threshold.
//!
//! The full pipeline (embed, fetch centroids, decide) lives on
//! [`SemanticService::classify`](crate::SemanticService::classify); the
//! functions here are the pure pieces and work on any vectors.

mod similarity;

pub use similarity::{cosine_similarity, l2_normalize, magnitude, mean};

use crate::types::{Classification, Taxonomy};

/// Score reported when there is nothing to compare against.
pub const NO_MATCH_SCORE: f32 = -1.0;

/// Find the centroid with the highest cosine similarity to `query`.
///
/// Iteration order is the declaration order; only a strictly greater score
/// replaces the current best, so ties resolve to the first-seen label.
/// Returns `None` when there are no centroids.
pub fn nearest<'a, I>(query: &[f32], centroids: I) -> Option<(&'a str, f32)>
where
    I: IntoIterator<Item = (&'a str, &'a [f32])>,
{
    let mut best: Option<(&'a str, f32)> = None;
    for (label, centroid) in centroids {
        let sim = cosine_similarity(query, centroid);
        match best {
            Some((_, best_sim)) if sim <= best_sim => {}
            _ => best = Some((label, sim)),
        }
    }
    best
}

/// Apply the acceptance threshold to a [`nearest`] result.
///
/// A score exactly equal to `threshold` is accepted.
pub fn decide(taxonomy: Taxonomy, threshold: f32, best: Option<(&str, f32)>) -> Classification {
    match best {
        Some((label, score)) if score >= threshold => Classification::Matched {
            label: label.to_string(),
            score,
        },
        Some((label, score)) => Classification::BelowThreshold {
            taxonomy,
            best_label: Some(label.to_string()),
            best_score: score,
        },
        None => Classification::BelowThreshold {
            taxonomy,
            best_label: None,
            best_score: NO_MATCH_SCORE,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn centroids<'a>(items: &'a [(&'a str, Vec<f32>)]) -> Vec<(&'a str, &'a [f32])> {
        items.iter().map(|(l, v)| (*l, v.as_slice())).collect()
    }

    #[test]
    fn nearest_picks_highest_similarity() {
        let items = vec![("a", vec![1.0, 0.0]), ("b", vec![0.0, 1.0])];
        let (label, score) = nearest(&[0.1, 0.9], centroids(&items)).unwrap();
        assert_eq!(label, "b");
        assert!(score > 0.9);
    }

    #[test]
    fn nearest_tie_keeps_first_declared() {
        let items = vec![("first", vec![1.0, 0.0]), ("second", vec![2.0, 0.0])];
        let (label, _) = nearest(&[1.0, 0.0], centroids(&items)).unwrap();
        assert_eq!(label, "first");

        let reversed = vec![("second", vec![2.0, 0.0]), ("first", vec![1.0, 0.0])];
        let (label, _) = nearest(&[1.0, 0.0], centroids(&reversed)).unwrap();
        assert_eq!(label, "second");
    }

    #[test]
    fn nearest_accepts_negative_scores() {
        let items = vec![("only", vec![-1.0, 0.0])];
        let (label, score) = nearest(&[1.0, 0.0], centroids(&items)).unwrap();
        assert_eq!(label, "only");
        assert!((score + 1.0).abs() < 1e-6);
    }

    #[test]
    fn nearest_of_nothing_is_none() {
        assert!(nearest(&[1.0], Vec::<(&str, &[f32])>::new()).is_none());
    }

    #[test]
    fn decide_threshold_is_inclusive() {
        let c = decide(Taxonomy::Intent, 0.6, Some(("summary", 0.6)));
        assert!(c.is_match());

        let c = decide(Taxonomy::Intent, 0.6, Some(("summary", 0.599)));
        assert_eq!(
            c,
            Classification::BelowThreshold {
                taxonomy: Taxonomy::Intent,
                best_label: Some("summary".into()),
                best_score: 0.599,
            }
        );
    }

    #[test]
    fn decide_without_candidates() {
        let c = decide(Taxonomy::Action, 0.75, None);
        assert_eq!(c.label(), "none");
        assert_eq!(c.score(), NO_MATCH_SCORE);
    }
}
