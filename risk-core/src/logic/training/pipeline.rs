//! Training pipeline

use std::path::PathBuf;

use ndarray::{Array1, Array2};
use thiserror::Error;

use super::metrics::ClassificationReport;
use super::split::{stratified_split, SplitError};
use crate::constants::{DEFAULT_MODEL_PATH, DEFAULT_TEST_SIZE};
use crate::logic::dataset::{load_csv, DatasetError, TrainingRecord};
use crate::logic::features::{FEATURE_COUNT, FEATURE_LAYOUT};
use crate::logic::model::{
    BundleError, ForestClassifier, ForestError, ForestParams, LabelEncoder, ModelBundle,
};

#[derive(Debug, Error)]
pub enum TrainError {
    #[error(transparent)]
    Dataset(#[from] DatasetError),

    #[error("cannot split dataset: {0}")]
    Split(#[from] SplitError),

    #[error(transparent)]
    Forest(#[from] ForestError),

    #[error(transparent)]
    Bundle(#[from] BundleError),

    #[error("need at least two risk classes, found {0:?}")]
    SingleClass(Vec<String>),
}

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub csv: PathBuf,
    pub out: PathBuf,
    pub forest: ForestParams,
    pub test_size: f64,
}

impl TrainOptions {
    pub fn new(csv: impl Into<PathBuf>) -> Self {
        Self {
            csv: csv.into(),
            out: PathBuf::from(DEFAULT_MODEL_PATH),
            forest: ForestParams::default(),
            test_size: DEFAULT_TEST_SIZE,
        }
    }
}

/// Bundle plus what the held-out split said about it
pub struct FitOutcome {
    pub bundle: ModelBundle,
    pub evaluation: ClassificationReport,
    pub train_rows: usize,
    pub test_rows: usize,
}

/// Summary handed back to the operator
#[derive(Debug, Clone)]
pub struct TrainingReport {
    pub rows: usize,
    pub train_rows: usize,
    pub test_rows: usize,
    pub fee_classes: Vec<String>,
    pub risk_classes: Vec<String>,
    pub evaluation: ClassificationReport,
    pub out: PathBuf,
}

/// Load, fit, evaluate and persist. Overwrites `opts.out`.
pub fn run(opts: &TrainOptions) -> Result<TrainingReport, TrainError> {
    let records = load_csv(&opts.csv)?;
    let outcome = fit_bundle(&records, &opts.forest, opts.test_size)?;

    outcome.bundle.save(&opts.out)?;

    Ok(TrainingReport {
        rows: records.len(),
        train_rows: outcome.train_rows,
        test_rows: outcome.test_rows,
        fee_classes: outcome.bundle.le_fee.classes().to_vec(),
        risk_classes: outcome.bundle.le_target.classes().to_vec(),
        evaluation: outcome.evaluation,
        out: opts.out.clone(),
    })
}

/// Fit encoders and forest on `records`, evaluate on a stratified hold-out
pub fn fit_bundle(
    records: &[TrainingRecord],
    params: &ForestParams,
    test_size: f64,
) -> Result<FitOutcome, TrainError> {
    if records.is_empty() {
        return Err(DatasetError::Empty.into());
    }

    let le_fee = LabelEncoder::fit(records.iter().map(|r| r.fee_status.as_str()));
    let le_target = LabelEncoder::fit(records.iter().map(|r| r.risk_level.as_str()));
    if le_target.len() < 2 {
        return Err(TrainError::SingleClass(le_target.classes().to_vec()));
    }

    let y: Vec<usize> = records
        .iter()
        .map(|r| le_target.transform_or_first(&r.risk_level))
        .collect();
    let x = feature_matrix(records, &le_fee);

    let (train_idx, test_idx) = stratified_split(&y, test_size, params.seed)?;
    log::info!(
        "Split {} rows: {} train / {} test",
        records.len(),
        train_idx.len(),
        test_idx.len()
    );

    let x_train = x.select(ndarray::Axis(0), &train_idx);
    let y_train: Array1<usize> = train_idx.iter().map(|&i| y[i]).collect();
    let x_test = x.select(ndarray::Axis(0), &test_idx);
    let y_test: Vec<usize> = test_idx.iter().map(|&i| y[i]).collect();

    log::info!(
        "Fitting forest on {:?}: {} trees, seed {}",
        FEATURE_LAYOUT,
        params.n_trees,
        params.seed
    );
    let model = ForestClassifier::fit(x_train, y_train, le_target.len(), params)?;

    let y_pred = model.predict_classes(&x_test);
    let evaluation = ClassificationReport::compute(&y_test, &y_pred, le_target.classes());
    log::info!("Hold-out accuracy: {:.4}", evaluation.accuracy);

    Ok(FitOutcome {
        bundle: ModelBundle::new(model, le_fee, le_target),
        evaluation,
        train_rows: train_idx.len(),
        test_rows: test_idx.len(),
    })
}

/// Rows of `[attendance, no_of_backlogs, fee_encoded]`
fn feature_matrix(records: &[TrainingRecord], le_fee: &LabelEncoder) -> Array2<f64> {
    let mut flat = Vec::with_capacity(records.len() * FEATURE_COUNT);
    for r in records {
        flat.push(r.attendance);
        flat.push(r.no_of_backlogs as f64);
        flat.push(le_fee.transform_or_first(r.fee_status.as_str()) as f64);
    }

    Array2::from_shape_vec((records.len(), FEATURE_COUNT), flat)
        .unwrap_or_else(|_| Array2::zeros((0, FEATURE_COUNT)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::synthesize_risk;
    use crate::logic::features::{FeeStatus, StudentObservation};
    use std::fmt::Write as _;
    use std::fs;
    use tempfile::tempdir;

    /// Grid over the three inputs, labelled by the synthesis heuristic
    fn grid_records() -> Vec<TrainingRecord> {
        let mut records = Vec::new();
        for attendance in (30..=100).step_by(5) {
            for backlogs in 0..=4u32 {
                for fee in FeeStatus::ALL {
                    let attendance = attendance as f64;
                    records.push(TrainingRecord {
                        attendance,
                        no_of_backlogs: backlogs,
                        fee_status: fee,
                        risk_level: synthesize_risk(attendance, backlogs, fee).to_string(),
                    });
                }
            }
        }
        records
    }

    fn quick_params() -> ForestParams {
        ForestParams {
            n_trees: 25,
            ..ForestParams::default()
        }
    }

    #[test]
    fn test_fit_bundle_on_grid() {
        let records = grid_records();
        let outcome = fit_bundle(&records, &quick_params(), 0.15).unwrap();

        assert_eq!(outcome.train_rows + outcome.test_rows, records.len());
        assert_eq!(outcome.bundle.le_target.classes(), &["High", "Low", "Medium"]);
        assert_eq!(
            outcome.bundle.le_fee.classes(),
            &["Overdue", "Paid", "Partial", "Pending"]
        );
        assert!(outcome.evaluation.accuracy > 0.7, "accuracy {}", outcome.evaluation.accuracy);
    }

    #[test]
    fn test_predictions_are_well_formed() {
        let outcome = fit_bundle(&grid_records(), &quick_params(), 0.15).unwrap();
        let predictor = outcome.bundle.into_predictor();

        for fee in ["Paid", "Pending", "Partial", "Overdue", "Waived"] {
            let result = predictor
                .predict(&StudentObservation::new(55.0, 3, fee))
                .unwrap();
            assert!(["Low", "Medium", "High"].contains(&result.risk_level.as_str()));
            assert!((result.proba.iter().sum::<f64>() - 1.0).abs() < 1e-9);
            let max = result.proba.iter().cloned().fold(f64::MIN, f64::max);
            assert_eq!(result.confidence, max);
        }
    }

    #[test]
    fn test_single_class_rejected() {
        let records: Vec<TrainingRecord> = grid_records()
            .into_iter()
            .map(|r| TrainingRecord {
                risk_level: "Low".into(),
                ..r
            })
            .collect();
        assert!(matches!(
            fit_bundle(&records, &quick_params(), 0.15),
            Err(TrainError::SingleClass(_))
        ));
    }

    #[test]
    fn test_run_writes_loadable_bundle() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("students.csv");
        let out_path = dir.path().join("model.bundle");

        let mut csv = String::from("Total Attend,Total Held,No of Backlogs,Fee Status\n");
        for r in grid_records() {
            writeln!(csv, "{},100,{},{}", r.attendance, r.no_of_backlogs, r.fee_status).unwrap();
        }
        fs::write(&csv_path, csv).unwrap();

        let opts = TrainOptions {
            out: out_path.clone(),
            forest: quick_params(),
            ..TrainOptions::new(&csv_path)
        };
        let report = run(&opts).unwrap();

        assert_eq!(report.rows, grid_records().len());
        assert_eq!(report.out, out_path);
        assert!(ModelBundle::load(&out_path).is_ok());
    }

    #[test]
    fn test_run_missing_columns() {
        let dir = tempdir().unwrap();
        let csv_path = dir.path().join("students.csv");
        fs::write(&csv_path, "total_attend,total_held\n1,2\n").unwrap();

        let err = run(&TrainOptions::new(&csv_path)).unwrap_err();
        assert!(err.to_string().contains("no_of_backlogs"));
        assert!(err.to_string().contains("fee_status"));
    }
}
