//! Telemetry metric name constants.
//!
//! Centralised metric names for larder operations. Consumers install
//! their own `metrics` recorder (e.g. prometheus, statsd); without a
//! recorder installed, all metric calls are no-ops.
//!
//! # Metric naming conventions
//!
//! All metrics are prefixed with `larder_`. Counters end in `_total`,
//! histograms use meaningful units (e.g. `_seconds`).
//!
//! # Common labels
//!
//! - `endpoint` — provider endpoint invoked ("search", "search_by_ingredients", "information")
//! - `status` — outcome: "ok" or "error"
//! - `cache` — which store was consulted: "list" or "detail"
//! - `tier` — degraded-result tier served: "stale" or "offline"

/// Total provider requests (one per logical call, after rotation).
///
/// Labels: `endpoint`, `status` ("ok" | "error").
pub const PROVIDER_REQUESTS_TOTAL: &str = "larder_provider_requests_total";

/// Provider request duration in seconds.
///
/// Labels: `endpoint`.
pub const PROVIDER_REQUEST_DURATION_SECONDS: &str = "larder_provider_request_duration_seconds";

/// Total credential rotations (one per advanced pool index).
///
/// Labels: `endpoint`.
pub const KEY_ROTATIONS_TOTAL: &str = "larder_key_rotations_total";

/// Total cache hits.
///
/// Labels: `cache` ("list" | "detail").
pub const CACHE_HITS_TOTAL: &str = "larder_cache_hits_total";

/// Total cache misses.
///
/// Labels: `cache` ("list" | "detail").
pub const CACHE_MISSES_TOTAL: &str = "larder_cache_misses_total";

/// Total unreadable/corrupt store reads (degraded to miss).
///
/// Labels: `cache`.
pub const CACHE_CORRUPT_TOTAL: &str = "larder_cache_corrupt_total";

/// Total searches served from a degraded tier.
///
/// Labels: `tier` ("stale" | "offline").
pub const FALLBACK_TOTAL: &str = "larder_fallback_total";
