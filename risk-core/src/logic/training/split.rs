//! Stratified train/test split
//!
//! Every class keeps (roughly) its share on both sides. Deterministic for
//! a given seed.

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SplitError {
    #[error("test_size must be in (0, 1), got {0}")]
    InvalidTestSize(f64),

    #[error("split of {total} rows leaves {test} test rows")]
    Degenerate { total: usize, test: usize },

    #[error("class '{0}' has only 1 member, need at least 2 to stratify")]
    ClassTooSmall(usize),

    #[error("{side} split of {size} rows is smaller than the {classes} classes")]
    TooFewForClasses {
        side: &'static str,
        size: usize,
        classes: usize,
    },
}

/// Returns `(train_indices, test_indices)` into `labels`
pub fn stratified_split(
    labels: &[usize],
    test_size: f64,
    seed: u64,
) -> Result<(Vec<usize>, Vec<usize>), SplitError> {
    if !(test_size > 0.0 && test_size < 1.0) {
        return Err(SplitError::InvalidTestSize(test_size));
    }

    let total = labels.len();
    let n_test = (test_size * total as f64).ceil() as usize;
    if n_test == 0 || n_test >= total {
        return Err(SplitError::Degenerate { total, test: n_test });
    }

    let mut by_class: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(idx);
    }

    if let Some((&class, _)) = by_class.iter().find(|(_, members)| members.len() < 2) {
        return Err(SplitError::ClassTooSmall(class));
    }

    let n_classes = by_class.len();
    if n_test < n_classes {
        return Err(SplitError::TooFewForClasses {
            side: "test",
            size: n_test,
            classes: n_classes,
        });
    }
    if total - n_test < n_classes {
        return Err(SplitError::TooFewForClasses {
            side: "train",
            size: total - n_test,
            classes: n_classes,
        });
    }

    let allocation = allocate(&by_class, total, n_test);
    let mut rng = StdRng::seed_from_u64(seed);

    let mut train = Vec::with_capacity(total - n_test);
    let mut test = Vec::with_capacity(n_test);
    for ((_, members), take) in by_class.into_iter().zip(allocation) {
        let mut members = members;
        members.shuffle(&mut rng);
        test.extend_from_slice(&members[..take]);
        train.extend_from_slice(&members[take..]);
    }

    train.shuffle(&mut rng);
    test.shuffle(&mut rng);

    Ok((train, test))
}

/// Test rows per class: floor of the proportional share, then the
/// leftover rows go to the largest remainders. A class never gives away
/// all of its members.
fn allocate(by_class: &BTreeMap<usize, Vec<usize>>, total: usize, n_test: usize) -> Vec<usize> {
    let mut take = Vec::with_capacity(by_class.len());
    let mut remainders = Vec::with_capacity(by_class.len());

    for (pos, members) in by_class.values().enumerate() {
        let exact = members.len() as f64 * n_test as f64 / total as f64;
        let floor = (exact.floor() as usize).min(members.len() - 1);
        take.push(floor);
        remainders.push((pos, exact - floor as f64));
    }

    remainders.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let mut left = n_test.saturating_sub(take.iter().sum());
    let sizes: Vec<usize> = by_class.values().map(Vec::len).collect();
    while left > 0 {
        let before = left;
        for &(pos, _) in &remainders {
            if left == 0 {
                break;
            }
            if take[pos] + 1 < sizes[pos] {
                take[pos] += 1;
                left -= 1;
            }
        }
        if left == before {
            break;
        }
    }

    take
}
