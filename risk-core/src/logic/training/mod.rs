//! Training Module - offline pipeline
//!
//! CSV -> normalized records -> encoders -> stratified split -> forest ->
//! evaluation -> bundle on disk.

pub mod split;
pub mod metrics;
pub mod pipeline;

pub use metrics::{ClassMetrics, ClassificationReport};
pub use pipeline::{fit_bundle, run, FitOutcome, TrainError, TrainOptions, TrainingReport};
pub use split::{stratified_split, SplitError};
