//! Request parsing and response payloads for the student routes

use dropout_core::{PredictionResult, StudentObservation};
use serde::Serialize;
use serde_json::Value;

const UNKNOWN_RISK: &str = "Unknown";

/// `/recommend` input: the observation plus an optional risk label
#[derive(Debug, Clone)]
pub struct RecommendRequest {
    pub student: StudentObservation,
    pub risk_label: String,
}

impl RecommendRequest {
    pub fn from_json(body: &Value) -> Self {
        let risk_label = body
            .get("risk_label")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| UNKNOWN_RISK.to_string());

        Self {
            student: StudentObservation::from_json(body),
            risk_label,
        }
    }
}

/// Echo of the normalized inputs
#[derive(Debug, Serialize)]
pub struct Explanation {
    pub attendance: f64,
    pub backlogs: u32,
    pub fee_status: String,
}

impl From<&StudentObservation> for Explanation {
    fn from(obs: &StudentObservation) -> Self {
        Self {
            attendance: obs.attendance,
            backlogs: obs.backlogs,
            fee_status: obs.fee_status.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct PredictData {
    pub prediction: PredictionResult,
    pub recommendations: Vec<String>,
    pub explanation: Explanation,
}

#[derive(Debug, Serialize)]
pub struct RecommendData {
    pub recommendations: Vec<String>,
}
