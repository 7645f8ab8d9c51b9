//! Model Module - Classifier, Encoders & Bundle
//!
//! The classifier itself is delegated to `linfa-trees`; this module owns
//! the categorical encoders, the on-disk bundle and the request-time
//! prediction glue.

pub mod encoder;
pub mod forest;
pub mod bundle;
pub mod inference;

// Re-export common types
pub use encoder::LabelEncoder;
pub use forest::{ForestClassifier, ForestError, ForestParams};
pub use bundle::{BundleError, ModelBundle};
pub use inference::{InferenceError, PredictionResult, Predictor, RiskClassifier, RiskLevel};
