use serde::{Deserialize, Serialize};

use crate::logic::features::FeeStatus;

/// One normalized training row
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrainingRecord {
    pub attendance: f64,
    pub no_of_backlogs: u32,
    pub fee_status: FeeStatus,
    /// Supplied or synthesized label
    pub risk_level: String,
}
