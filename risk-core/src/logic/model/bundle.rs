//! Model Bundle - the single artifact shared by trainer and server
//!
//! Holds exactly four fields: `model`, `le_fee`, `le_target`, `label_map`.
//! Encoded with `bincode`; written by `train`, loaded once at server
//! startup and never mutated afterwards.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::encoder::LabelEncoder;
use super::forest::ForestClassifier;
use super::inference::Predictor;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("Model file not found at {0}")]
    NotFound(PathBuf),

    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to encode bundle: {0}")]
    Encode(String),

    #[error("failed to decode bundle: {0}")]
    Decode(String),

    #[error("inconsistent bundle: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ModelBundle {
    pub model: ForestClassifier,
    pub le_fee: LabelEncoder,
    pub le_target: LabelEncoder,
    /// Target index -> label, mirrors `le_target`
    pub label_map: BTreeMap<usize, String>,
}

impl ModelBundle {
    pub fn new(model: ForestClassifier, le_fee: LabelEncoder, le_target: LabelEncoder) -> Self {
        let label_map = le_target
            .classes()
            .iter()
            .enumerate()
            .map(|(i, label)| (i, label.clone()))
            .collect();

        Self {
            model,
            le_fee,
            le_target,
            label_map,
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, BundleError> {
        bincode::serialize(self).map_err(|e| BundleError::Encode(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, BundleError> {
        let bundle: Self =
            bincode::deserialize(bytes).map_err(|e| BundleError::Decode(e.to_string()))?;
        bundle.validate()?;
        Ok(bundle)
    }

    /// Write to `path`, replacing whatever is there
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), BundleError> {
        let path = path.as_ref();
        let bytes = self.to_bytes()?;

        fs::write(path, &bytes).map_err(|source| BundleError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        log::info!("Saved model bundle to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, BundleError> {
        let path = path.as_ref();
        log::info!("Loading model bundle from {}", path.display());

        let bytes = fs::read(path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => BundleError::NotFound(path.to_path_buf()),
            _ => BundleError::Io {
                path: path.to_path_buf(),
                source,
            },
        })?;

        Self::from_bytes(&bytes)
    }

    /// Trainer and server must agree on class counts
    fn validate(&self) -> Result<(), BundleError> {
        if self.le_target.is_empty() {
            return Err(BundleError::Inconsistent("target encoder has no classes".into()));
        }
        if self.model.n_classes() != self.le_target.len() {
            return Err(BundleError::Inconsistent(format!(
                "model has {} classes, target encoder has {}",
                self.model.n_classes(),
                self.le_target.len()
            )));
        }

        let mismatched = self
            .label_map
            .iter()
            .any(|(i, label)| self.le_target.inverse_transform(*i) != Some(label.as_str()));
        if mismatched {
            log::warn!("label_map disagrees with target encoder; target encoder wins");
        }

        Ok(())
    }

    pub fn into_predictor(self) -> Predictor {
        Predictor::new(Arc::new(self.model), self.le_fee, self.le_target)
    }
}
