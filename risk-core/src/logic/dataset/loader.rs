//! CSV Loader
//!
//! Column names are normalized (trim, lowercase, `-`/space -> `_`) before
//! lookup. Attendance is derived from `total_attend` / `total_held` when
//! both exist, otherwise read from an `attendance` column.

use std::collections::HashMap;
use std::io;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use super::record::TrainingRecord;
use super::synth::synthesize_risk;
use super::DatasetError;
use crate::logic::features::{title_case, FeeStatus};

/// Columns that must exist after derivation
pub const REQUIRED_COLUMNS: [&str; 3] = ["attendance", "no_of_backlogs", "fee_status"];

const TOTAL_ATTEND: &str = "total_attend";
const TOTAL_HELD: &str = "total_held";
const RISK_LEVEL: &str = "risk_level";

/// Where the attendance value comes from
#[derive(Clone, Copy)]
enum AttendanceSource {
    Derived { attend: usize, held: usize },
    Direct(usize),
}

pub fn normalize_column(name: &str) -> String {
    name.trim().to_lowercase().replace(['-', ' '], "_")
}

pub fn load_csv(path: impl AsRef<Path>) -> Result<Vec<TrainingRecord>, DatasetError> {
    let path = path.as_ref();
    log::info!("Reading dataset from {}", path.display());

    let reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_path(path)?;
    read_from(reader)
}

/// Same as [`load_csv`] over any reader
pub fn read_records<R: io::Read>(input: R) -> Result<Vec<TrainingRecord>, DatasetError> {
    let reader = ReaderBuilder::new()
        .flexible(true)
        .trim(Trim::All)
        .from_reader(input);
    read_from(reader)
}

fn read_from<R: io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<TrainingRecord>, DatasetError> {
    let mut columns: HashMap<String, usize> = HashMap::new();
    for (idx, name) in reader.headers()?.iter().enumerate() {
        columns.entry(normalize_column(name)).or_insert(idx);
    }

    let attendance_src = match (columns.get(TOTAL_ATTEND), columns.get(TOTAL_HELD)) {
        (Some(&attend), Some(&held)) => Some(AttendanceSource::Derived { attend, held }),
        _ => columns.get("attendance").copied().map(AttendanceSource::Direct),
    };
    let backlogs = columns.get("no_of_backlogs").copied();
    let fee = columns.get("fee_status").copied();
    let risk = columns.get(RISK_LEVEL).copied();

    let mut missing = Vec::new();
    if attendance_src.is_none() {
        missing.push(REQUIRED_COLUMNS[0].to_string());
    }
    if backlogs.is_none() {
        missing.push(REQUIRED_COLUMNS[1].to_string());
    }
    if fee.is_none() {
        missing.push(REQUIRED_COLUMNS[2].to_string());
    }

    let (Some(attendance_src), Some(backlogs), Some(fee)) = (attendance_src, backlogs, fee) else {
        return Err(DatasetError::MissingColumns(missing));
    };

    if risk.is_none() {
        log::info!("No '{}' column, synthesizing labels from heuristic", RISK_LEVEL);
    }

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row?;

        let attendance = match attendance_src {
            AttendanceSource::Derived { attend, held } => {
                derive_attendance(field(&row, attend), field(&row, held))
            }
            AttendanceSource::Direct(idx) => parse_number(field(&row, idx)).unwrap_or(0.0),
        };

        let no_of_backlogs = parse_number(field(&row, backlogs))
            .map(|b| b.trunc().max(0.0) as u32)
            .unwrap_or(0);

        let fee_status = FeeStatus::normalize(field(&row, fee));

        let risk_level = match risk {
            Some(idx) => title_case(field(&row, idx)),
            None => synthesize_risk(attendance, no_of_backlogs, fee_status)
                .as_str()
                .to_string(),
        };

        records.push(TrainingRecord {
            attendance,
            no_of_backlogs,
            fee_status,
            risk_level,
        });
    }

    if records.is_empty() {
        return Err(DatasetError::Empty);
    }

    log::info!("Loaded {} rows", records.len());
    Ok(records)
}

fn field(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// attended / held * 100; undefined ratios become 0
fn derive_attendance(attend: &str, held: &str) -> f64 {
    match (parse_number(attend), parse_number(held)) {
        (Some(a), Some(h)) if h != 0.0 => {
            let pct = a / h * 100.0;
            if pct.is_finite() { pct } else { 0.0 }
        }
        _ => 0.0,
    }
}
