//! Public types for the Huginn API.

mod classification;
mod slots;
mod taxonomy;

pub use classification::Classification;
pub use slots::{IntentCandidate, Priority, Slots};
pub use taxonomy::{
    ACTION_SENTINEL, ACTION_THRESHOLD, INTENT_SENTINEL, INTENT_THRESHOLD, Taxonomy,
};

/// A fixed-length embedding produced by one provider instance.
pub type EmbeddingVector = Vec<f32>;
