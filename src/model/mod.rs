//! Embedding model ownership.

pub mod guard;

pub use guard::{ModelGuard, ProviderLoader};
