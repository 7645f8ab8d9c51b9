//! Student Observation - per-request input
//!
//! Built from untyped JSON. Missing, null or unparseable fields fall back
//! to defaults instead of rejecting the request.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fee::{title_case, FeeStatus};

/// Normalized student input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StudentObservation {
    /// Attendance percentage (0-100 expected, not clamped)
    pub attendance: f64,
    /// Backlog count
    pub backlogs: u32,
    /// Title-cased fee status; may be outside the known vocabulary
    pub fee_status: String,
}

impl Default for StudentObservation {
    fn default() -> Self {
        Self {
            attendance: 0.0,
            backlogs: 0,
            fee_status: FeeStatus::Paid.as_str().to_string(),
        }
    }
}

impl StudentObservation {
    pub fn new(attendance: f64, backlogs: u32, fee_status: &str) -> Self {
        Self {
            attendance,
            backlogs,
            fee_status: normalize_fee(fee_status),
        }
    }

    /// Build from a JSON body, defaulting whatever is missing
    pub fn from_json(body: &Value) -> Self {
        let attendance = body
            .get("attendance")
            .and_then(number_like)
            .unwrap_or(0.0);

        let backlogs = body
            .get("backlogs")
            .and_then(number_like)
            .map(|b| b.trunc().max(0.0) as u32)
            .unwrap_or(0);

        let fee_status = match body.get("fee_status") {
            None | Some(Value::Null) => FeeStatus::Paid.as_str().to_string(),
            Some(Value::String(s)) => normalize_fee(s),
            Some(other) => normalize_fee(&other.to_string()),
        };

        Self {
            attendance,
            backlogs,
            fee_status,
        }
    }

    /// Known fee status, if the raw value is in the vocabulary
    pub fn fee(&self) -> Option<FeeStatus> {
        FeeStatus::parse(&self.fee_status)
    }
}

/// Trim + title-case; blank input means `Paid`
fn normalize_fee(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        FeeStatus::Paid.as_str().to_string()
    } else {
        title_case(trimmed)
    }
}

/// Accept JSON numbers and numeric strings
fn number_like(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    n.is_finite().then_some(n)
}
