//! Dropout Risk Core
//!
//! Shared building blocks for the training job and the prediction service.
//!
//! ## Layout
//! - `logic/features` - StudentObservation + fee status vocabulary
//! - `logic/model` - label encoders, forest classifier, bundle I/O, predictor
//! - `logic/dataset` - CSV loading and preprocessing
//! - `logic/training` - split, fit, evaluate, persist
//! - `logic/recommend` - rule engine, Gemini source, fallback orchestration

pub mod constants;
pub mod logic;

pub use logic::features::{FeeStatus, StudentObservation};
pub use logic::model::{
    BundleError, ForestClassifier, InferenceError, LabelEncoder, ModelBundle, PredictionResult,
    Predictor, RiskClassifier, RiskLevel,
};
pub use logic::recommend::{
    GeminiClient, GeminiConfig, RecommendError, RecommendationSource, Recommender,
};
