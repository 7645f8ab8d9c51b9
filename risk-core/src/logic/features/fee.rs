//! Fee status vocabulary

use serde::{Deserialize, Serialize};

/// Payment state of a student's fees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FeeStatus {
    Paid,
    Pending,
    Partial,
    Overdue,
}

impl FeeStatus {
    /// Every known status, in declaration order
    pub const ALL: [FeeStatus; 4] = [
        FeeStatus::Paid,
        FeeStatus::Pending,
        FeeStatus::Partial,
        FeeStatus::Overdue,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FeeStatus::Paid => "Paid",
            FeeStatus::Pending => "Pending",
            FeeStatus::Partial => "Partial",
            FeeStatus::Overdue => "Overdue",
        }
    }

    /// Exact match against the title-cased vocabulary
    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.as_str() == value)
    }

    /// Training-side normalization: trim, title-case, collapse unknowns to `Paid`
    pub fn normalize(raw: &str) -> Self {
        Self::parse(&title_case(raw.trim())).unwrap_or(FeeStatus::Paid)
    }
}

impl Default for FeeStatus {
    fn default() -> Self {
        FeeStatus::Paid
    }
}

impl std::fmt::Display for FeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Title-case a string: first letter of every alphabetic run upper,
/// the rest lower ("overdue" -> "Overdue", "PART-paid" -> "Part-Paid").
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_is_letter = false;

    for ch in value.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }

    out
}
