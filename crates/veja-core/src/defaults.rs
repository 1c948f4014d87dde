//! Centralized default constants for the MiraVeja metadata pipeline.
//!
//! **This module is the single source of truth** for shared default values.
//! Crates reference these constants instead of defining their own magic
//! numbers.

// =============================================================================
// REGISTRY
// =============================================================================

/// Default base URL for the auxiliary-model registry (Civitai public API).
pub const REGISTRY_URL: &str = "https://civitai.com/api/v1";

/// Timeout for a single registry lookup (seconds). Kept in single digits so
/// one unresponsive lookup cannot stall metadata extraction for an upload.
pub const REGISTRY_TIMEOUT_SECS: u64 = 5;

/// Preferred hash algorithm requested from the registry. AutoV2 is the short
/// hash Civitai displays next to model files.
pub const HASH_ALGORITHM: &str = "AutoV2";

/// Fallback hash algorithm when the preferred one is absent from a response.
pub const FALLBACK_HASH_ALGORITHM: &str = "SHA256";

// =============================================================================
// JPEG TEXT HEURISTIC
// =============================================================================

/// Minimum printable-ASCII character ratio for a decoded JPEG segment to be
/// kept as candidate text when no known metadata marker is present.
pub const PRINTABLE_RATIO_THRESHOLD: f64 = 0.6;
