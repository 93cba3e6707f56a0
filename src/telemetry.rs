//! Telemetry metric name constants.
//!
//! Centralised metric names for huginn operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `huginn_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `taxonomy`: "intent" or "action"
//! - `outcome`: "matched", "below_threshold" or "empty"
//! - `operation`: "embed" or "embed_batch"
//! - `status`: "ok" or "error"

/// Total classification calls.
///
/// Labels: `taxonomy`, `outcome`.
pub const CLASSIFICATIONS_TOTAL: &str = "huginn_classifications_total";

/// Time spent inside the embedding provider, in seconds.
///
/// Labels: `operation`.
pub const EMBED_DURATION_SECONDS: &str = "huginn_embed_duration_seconds";

/// Embedding model construction attempts.
///
/// Labels: `status` ("ok" | "error").
pub const MODEL_LOADS_TOTAL: &str = "huginn_model_loads_total";

/// Centroid set builds. Expected to stay at one per taxonomy.
///
/// Labels: `taxonomy`.
pub const CENTROID_BUILDS_TOTAL: &str = "huginn_centroid_builds_total";
