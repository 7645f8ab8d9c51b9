//! Risk Label Synthesis
//!
//! Point-scoring heuristic used when the CSV has no `risk_level` column.

use crate::logic::features::FeeStatus;
use crate::logic::model::RiskLevel;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// At or above this score = High
pub const HIGH_RISK_SCORE: u32 = 60;

/// At or above this score = Medium
pub const MEDIUM_RISK_SCORE: u32 = 30;

// ============================================================================
// SCORING
// ============================================================================

/// 0-100 points: attendance (max 40) + backlogs (max 30) + fees (max 30)
pub fn risk_score(attendance: f64, backlogs: u32, fee: FeeStatus) -> u32 {
    let attendance_points = if attendance < 60.0 {
        40
    } else if attendance < 70.0 {
        25
    } else if attendance < 80.0 {
        10
    } else {
        0
    };

    let backlog_points = match backlogs {
        0 => 0,
        1 => 10,
        2 => 20,
        _ => 30,
    };

    let fee_points = match fee {
        FeeStatus::Overdue => 30,
        FeeStatus::Pending => 10,
        FeeStatus::Paid | FeeStatus::Partial => 0,
    };

    attendance_points + backlog_points + fee_points
}

pub fn risk_from_score(score: u32) -> RiskLevel {
    if score >= HIGH_RISK_SCORE {
        RiskLevel::High
    } else if score >= MEDIUM_RISK_SCORE {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

pub fn synthesize_risk(attendance: f64, backlogs: u32, fee: FeeStatus) -> RiskLevel {
    risk_from_score(risk_score(attendance, backlogs, fee))
}
