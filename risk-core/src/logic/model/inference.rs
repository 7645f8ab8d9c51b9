//! Inference - request-time prediction glue
//!
//! Encodes the observation, asks the classifier for class probabilities,
//! picks the arg-max and decodes it back to a risk label.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::encoder::LabelEncoder;
use crate::logic::features::{StudentObservation, FEATURE_COUNT};

// ============================================================================
// DATA STRUCTURES
// ============================================================================

/// Dropout risk levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Prediction output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub risk_level: String,
    /// Probability of the chosen class
    pub confidence: f64,
    /// Full vector, aligned to the target encoder's classes
    pub proba: Vec<f64>,
}

// ============================================================================
// ERROR HANDLING
// ============================================================================

#[derive(Debug, Error)]
pub enum InferenceError {
    #[error("classifier returned {got} probabilities, target encoder has {expected} classes")]
    ClassMismatch { expected: usize, got: usize },

    #[error("classifier returned no probabilities")]
    Empty,

    #[error("classifier failed: {0}")]
    Classifier(String),
}

// ============================================================================
// CLASSIFIER TRAIT
// ============================================================================

/// Anything that can turn a feature vector into class probabilities.
///
/// The returned vector is indexed by target-encoder class.
pub trait RiskClassifier: Send + Sync {
    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> Result<Vec<f64>, InferenceError>;
}

// ============================================================================
// PREDICTOR
// ============================================================================

/// Classifier + encoders, shared read-only across requests
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn RiskClassifier>,
    le_fee: LabelEncoder,
    le_target: LabelEncoder,
}

impl Predictor {
    pub fn new(
        classifier: Arc<dyn RiskClassifier>,
        le_fee: LabelEncoder,
        le_target: LabelEncoder,
    ) -> Self {
        Self {
            classifier,
            le_fee,
            le_target,
        }
    }

    pub fn fee_classes(&self) -> &[String] {
        self.le_fee.classes()
    }

    pub fn risk_classes(&self) -> &[String] {
        self.le_target.classes()
    }

    /// Feature vector in training column order
    pub fn features(&self, obs: &StudentObservation) -> [f64; FEATURE_COUNT] {
        let fee_encoded = self.le_fee.transform_or_first(&obs.fee_status);
        [obs.attendance, obs.backlogs as f64, fee_encoded as f64]
    }

    pub fn predict(&self, obs: &StudentObservation) -> Result<PredictionResult, InferenceError> {
        let features = self.features(obs);
        let proba = self.classifier.predict_proba(&features)?;

        if proba.len() != self.le_target.len() {
            return Err(InferenceError::ClassMismatch {
                expected: self.le_target.len(),
                got: proba.len(),
            });
        }

        let idx = argmax(&proba).ok_or(InferenceError::Empty)?;
        let risk_level = self
            .le_target
            .inverse_transform(idx)
            .ok_or(InferenceError::Empty)?
            .to_string();

        Ok(PredictionResult {
            risk_level,
            confidence: proba[idx],
            proba,
        })
    }
}

/// Index of the largest value; first wins on ties
pub fn argmax(values: &[f64]) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &v) in values.iter().enumerate() {
        match best {
            Some((_, b)) if v <= b => {}
            _ => best = Some((i, v)),
        }
    }
    best.map(|(i, _)| i)
}
