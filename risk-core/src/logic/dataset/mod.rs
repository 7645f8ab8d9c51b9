//! Dataset Module - Training Data Preparation
//!
//! Reads the student CSV, normalizes columns and values, and labels rows
//! with a synthesized risk level when the file carries none.

pub mod record;
pub mod loader;
pub mod synth;


pub use loader::{load_csv, normalize_column, read_records, REQUIRED_COLUMNS};
pub use record::TrainingRecord;
pub use synth::{risk_from_score, risk_score, synthesize_risk};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Missing columns in CSV: {0:?}")]
    MissingColumns(Vec<String>),

    #[error("CSV contains no data rows")]
    Empty,
}
