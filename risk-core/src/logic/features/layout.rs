//! Feature Layout - Centralized Feature Definition
//!
//! Order here must match the column order used by the training job.
//! Changing it invalidates every bundle on disk.

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
pub const FEATURE_LAYOUT: &[&str] = &[
    "attendance",       // 0: attended / held * 100
    "no_of_backlogs",   // 1: carried-forward failed requirements
    "fee_encoded",      // 2: fee encoder index
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 3;
