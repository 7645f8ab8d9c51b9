//! Features Module - Student Observation & Feature Layout
//!
//! Turns untyped request/CSV input into the 3-feature vector the
//! classifier was trained on.

pub mod fee;
pub mod layout;
pub mod observation;

#[cfg(test)]
mod tests;

// Re-export common types
pub use fee::{title_case, FeeStatus};
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT};
pub use observation::StudentObservation;
