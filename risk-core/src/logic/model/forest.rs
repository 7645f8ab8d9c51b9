//! Forest Classifier - bagged decision trees
//!
//! Tree induction and bootstrap resampling come from `linfa` /
//! `linfa-trees`. Class probabilities are the share of trees voting for
//! each class.

use std::fmt;

use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::{Array1, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::inference::{InferenceError, RiskClassifier};
use crate::constants::{DEFAULT_SEED, DEFAULT_TREES};
use crate::logic::features::FEATURE_COUNT;

#[derive(Debug, Error)]
pub enum ForestError {
    #[error("cannot fit a forest with zero trees")]
    NoTrees,

    #[error("cannot fit on an empty training set")]
    EmptyTrainingSet,

    #[error("targets ({targets}) do not match records ({records})")]
    ShapeMismatch { records: usize, targets: usize },

    #[error("tree fit failed: {0}")]
    Fit(String),
}

/// Ensemble hyper-parameters
#[derive(Debug, Clone, Copy)]
pub struct ForestParams {
    pub n_trees: usize,
    pub seed: u64,
    pub max_depth: Option<usize>,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: DEFAULT_TREES,
            seed: DEFAULT_SEED,
            max_depth: None,
        }
    }
}

#[derive(Serialize, Deserialize)]
pub struct ForestClassifier {
    trees: Vec<DecisionTree<f64, usize>>,
    n_classes: usize,
}

impl fmt::Debug for ForestClassifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForestClassifier")
            .field("n_trees", &self.trees.len())
            .field("n_classes", &self.n_classes)
            .finish()
    }
}

impl ForestClassifier {
    /// Fit `params.n_trees` trees, each on a bootstrap sample the size of
    /// the training set. `targets` are target-encoder indices.
    pub fn fit(
        records: Array2<f64>,
        targets: Array1<usize>,
        n_classes: usize,
        params: &ForestParams,
    ) -> Result<Self, ForestError> {
        if params.n_trees == 0 {
            return Err(ForestError::NoTrees);
        }
        if records.nrows() == 0 {
            return Err(ForestError::EmptyTrainingSet);
        }
        if records.nrows() != targets.len() {
            return Err(ForestError::ShapeMismatch {
                records: records.nrows(),
                targets: targets.len(),
            });
        }

        let n_samples = records.nrows();
        let dataset = Dataset::new(records, targets);
        let tree_params = DecisionTree::<f64, usize>::params().max_depth(params.max_depth);
        let mut rng = StdRng::seed_from_u64(params.seed);

        let mut trees = Vec::with_capacity(params.n_trees);
        for sample in dataset.bootstrap_samples(n_samples, &mut rng).take(params.n_trees) {
            let tree = tree_params
                .fit(&sample)
                .map_err(|e| ForestError::Fit(e.to_string()))?;
            trees.push(tree);
        }

        log::debug!("Fitted {} trees on {} samples", trees.len(), n_samples);

        Ok(Self { trees, n_classes })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Vote-share probabilities, one row per input row
    pub fn predict_proba_batch(&self, records: &Array2<f64>) -> Array2<f64> {
        let mut votes = Array2::<f64>::zeros((records.nrows(), self.n_classes));

        for tree in &self.trees {
            let predicted: Array1<usize> = tree.predict(records);
            for (row, &class) in predicted.iter().enumerate() {
                if class < self.n_classes {
                    votes[[row, class]] += 1.0;
                }
            }
        }

        let n_trees = self.trees.len().max(1) as f64;
        votes.mapv_inplace(|v| v / n_trees);
        votes
    }

    /// Arg-max class per row
    pub fn predict_classes(&self, records: &Array2<f64>) -> Vec<usize> {
        let proba = self.predict_proba_batch(records);
        proba
            .rows()
            .into_iter()
            .map(|row| {
                let row = row.to_vec();
                super::inference::argmax(&row).unwrap_or(0)
            })
            .collect()
    }
}

impl RiskClassifier for ForestClassifier {
    fn predict_proba(&self, features: &[f64; FEATURE_COUNT]) -> Result<Vec<f64>, InferenceError> {
        let records = Array2::from_shape_vec((1, FEATURE_COUNT), features.to_vec())
            .map_err(|e| InferenceError::Classifier(e.to_string()))?;

        Ok(self.predict_proba_batch(&records).row(0).to_vec())
    }
}
