//! Rule Engine - deterministic recommendations
//!
//! Thresholds are checked per factor (attendance, backlogs, fee); each
//! factor contributes at most a couple of messages, then the list is
//! padded, deduplicated and capped.

use super::dedupe;
use crate::constants::MAX_RULE_RECOMMENDATIONS;
use crate::logic::features::{FeeStatus, StudentObservation};

// ============================================================================
// MESSAGES
// ============================================================================

pub const MSG_MENTORING: &str = "Immediate one-on-one mentoring: arrange weekly meetings with mentor to address attendance barriers.";
pub const MSG_ATTENDANCE_RECOVERY: &str = "Make attendance recovery plan: mandatory remedial classes and a daily roll-call for 2 weeks.";
pub const MSG_PARTICIPATION: &str = "Encourage class participation and set a short-term attendance target (e.g., +10% in 1 month).";
pub const MSG_MAINTAIN_ATTENDANCE: &str = "Maintain consistent attendance and encourage peer-study groups.";

pub const MSG_BACKLOG_CLEARANCE: &str = "Prioritise backlog clearance: enroll in targeted remedial courses and set exam plan to clear backlogs.";
pub const MSG_EXTRA_PRACTICE: &str = "Book extra practice sessions and pair with a high-performing peer for problem solving.";
pub const MSG_REVISION: &str = "Provide revision materials and short quizzes to quickly close the backlog.";

pub const MSG_FEE_COUNSELING: &str = "Financial counseling and fee installment plan: connect student with accounts to discuss options.";
pub const MSG_FEE_REMINDER: &str = "Send reminders and offer short grace period or instalment options to reduce stress.";

pub const MSG_MONITOR: &str = "Monitor progress weekly and engage parents/guardians if required.";

/// Lists shorter than this get the generic monitoring message
const MIN_BEFORE_PADDING: usize = 3;

// ============================================================================
// THRESHOLDS
// ============================================================================

const LOW_ATTENDANCE: f64 = 60.0;
const TARGET_ATTENDANCE: f64 = 75.0;
const HEAVY_BACKLOGS: u32 = 3;

/// Rule-based recommendations for an observation, at most 5
pub fn generate(obs: &StudentObservation) -> Vec<String> {
    let mut recs: Vec<&'static str> = Vec::with_capacity(MAX_RULE_RECOMMENDATIONS);

    if obs.attendance < LOW_ATTENDANCE {
        recs.push(MSG_MENTORING);
        recs.push(MSG_ATTENDANCE_RECOVERY);
    } else if obs.attendance < TARGET_ATTENDANCE {
        recs.push(MSG_PARTICIPATION);
    } else {
        recs.push(MSG_MAINTAIN_ATTENDANCE);
    }

    match obs.backlogs {
        b if b >= HEAVY_BACKLOGS => recs.push(MSG_BACKLOG_CLEARANCE),
        2 => recs.push(MSG_EXTRA_PRACTICE),
        1 => recs.push(MSG_REVISION),
        _ => {}
    }

    match obs.fee() {
        Some(FeeStatus::Overdue) => recs.push(MSG_FEE_COUNSELING),
        Some(FeeStatus::Pending) => recs.push(MSG_FEE_REMINDER),
        _ => {}
    }

    if recs.len() < MIN_BEFORE_PADDING {
        recs.push(MSG_MONITOR);
    }

    let mut out = dedupe(recs.into_iter().map(String::from));
    out.truncate(MAX_RULE_RECOMMENDATIONS);
    out
}
