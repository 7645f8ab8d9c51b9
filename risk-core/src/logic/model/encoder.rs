//! Label Encoder - string <-> integer mapping for categorical columns
//!
//! Classes are kept sorted, so index `i` is the i-th distinct value in
//! lexicographic order of everything the encoder was fitted on.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on a column of values
    pub fn fit<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<String> = values
            .into_iter()
            .map(|v| v.as_ref().to_string())
            .collect();

        Self {
            classes: classes.into_iter().collect(),
        }
    }

    /// Known classes in index order
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    /// Index of a known value
    pub fn transform(&self, value: &str) -> Option<usize> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
    }

    /// Index of `value`, or the first class when `value` was never seen.
    ///
    /// Unseen categories silently take index 0. This keeps requests from
    /// failing but means a novel category is predicted as whichever value
    /// sorts first at training time.
    pub fn transform_or_first(&self, value: &str) -> usize {
        match self.transform(value) {
            Some(idx) => idx,
            None => {
                log::debug!(
                    "Unseen category '{}', falling back to '{}'",
                    value,
                    self.classes.first().map(String::as_str).unwrap_or("<empty>")
                );
                0
            }
        }
    }

    /// Label for an index
    pub fn inverse_transform(&self, index: usize) -> Option<&str> {
        self.classes.get(index).map(String::as_str)
    }
}
