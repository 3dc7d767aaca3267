//! Random forest classifier over dense `f64` feature rows.
//!
//! Trees are grown in parallel on bootstrap samples with ⌊√n⌋ feature
//! subsampling per split. Probabilities are the mean of the per-tree leaf
//! distributions, so the whole ensemble is deterministic for a fixed seed.

mod tree;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use self::tree::DecisionTree;

#[derive(Debug, Error)]
pub enum ForestError {
    #[error("training set is empty")]
    EmptyTrainingSet,
    #[error("{features} feature rows but {labels} labels")]
    LengthMismatch { features: usize, labels: usize },
    #[error("feature row {row} has {got} values, expected {expected}")]
    RaggedRow {
        row: usize,
        got: usize,
        expected: usize,
    },
    #[error("label {label} out of range for {n_classes} classes")]
    LabelOutOfRange { label: usize, n_classes: usize },
    #[error("n_trees must be at least 1")]
    NoTrees,
    #[error("input row has {got} values, expected {expected}")]
    DimensionMismatch { got: usize, expected: usize },
}

/// Hyper-parameters for [`RandomForest::fit`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForestParams {
    pub n_trees: usize,
    pub max_depth: usize,
    pub min_samples_split: usize,
    /// Features considered per split; `None` means ⌊√n_features⌋, at least 1.
    pub max_features: Option<usize>,
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: 10,
            min_samples_split: 2,
            max_features: None,
            seed: 42,
        }
    }
}

impl ForestParams {
    fn feature_subset_size(&self, n_features: usize) -> usize {
        let k = match self.max_features {
            Some(k) => k,
            None => (n_features as f64).sqrt().floor() as usize,
        };
        k.clamp(1, n_features.max(1))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomForest {
    trees: Vec<DecisionTree>,
    n_features: usize,
    n_classes: usize,
}

impl RandomForest {
    /// Fits the ensemble. `labels` are class indices in `0..n_classes`.
    pub fn fit(
        features: &[Vec<f64>],
        labels: &[usize],
        n_classes: usize,
        params: &ForestParams,
    ) -> Result<Self, ForestError> {
        let n = features.len();
        if n == 0 {
            return Err(ForestError::EmptyTrainingSet);
        }
        if labels.len() != n {
            return Err(ForestError::LengthMismatch {
                features: n,
                labels: labels.len(),
            });
        }
        if params.n_trees == 0 {
            return Err(ForestError::NoTrees);
        }
        let n_features = features[0].len();
        for (row, values) in features.iter().enumerate() {
            if values.len() != n_features {
                return Err(ForestError::RaggedRow {
                    row,
                    got: values.len(),
                    expected: n_features,
                });
            }
        }
        for &label in labels {
            if label >= n_classes {
                return Err(ForestError::LabelOutOfRange { label, n_classes });
            }
        }

        let trees = (0..params.n_trees)
            .into_par_iter()
            .map(|tree_idx| {
                let mut rng = StdRng::seed_from_u64(tree_seed(params.seed, tree_idx));
                let indices: Vec<usize> = (0..n).map(|_| rng.gen_range(0..n)).collect();
                DecisionTree::fit(features, labels, indices, n_classes, params, &mut rng)
            })
            .collect();

        Ok(Self {
            trees,
            n_features,
            n_classes,
        })
    }

    pub fn n_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn n_features(&self) -> usize {
        self.n_features
    }

    pub fn n_classes(&self) -> usize {
        self.n_classes
    }

    /// Mean leaf distribution over all trees. Sums to 1.
    pub fn predict_proba(&self, row: &[f64]) -> Result<Vec<f64>, ForestError> {
        if row.len() != self.n_features {
            return Err(ForestError::DimensionMismatch {
                got: row.len(),
                expected: self.n_features,
            });
        }
        let mut mean = vec![0.0; self.n_classes];
        for tree in &self.trees {
            for (m, p) in mean.iter_mut().zip(tree.predict_proba(row)) {
                *m += p;
            }
        }
        let k = self.trees.len() as f64;
        for m in &mut mean {
            *m /= k;
        }
        Ok(mean)
    }

    /// Class index with the highest probability; ties go to the lowest index.
    pub fn predict(&self, row: &[f64]) -> Result<usize, ForestError> {
        Ok(argmax(&self.predict_proba(row)?))
    }

    /// Mean decrease in impurity per feature, normalized to sum to 1.
    /// All zeros when no tree ever split.
    pub fn feature_importances(&self) -> Vec<f64> {
        let mut mean = vec![0.0; self.n_features];
        for tree in &self.trees {
            let importances = tree.importances();
            let total: f64 = importances.iter().sum();
            if total <= 0.0 {
                continue;
            }
            for (m, v) in mean.iter_mut().zip(importances) {
                *m += v / total;
            }
        }
        let total: f64 = mean.iter().sum();
        if total > 0.0 {
            for m in &mut mean {
                *m /= total;
            }
        }
        mean
    }
}

/// Per-tree seed derived from the master seed; the stride keeps the
/// per-tree RNG streams apart.
fn tree_seed(master: u64, tree_idx: usize) -> u64 {
    master.wrapping_add((tree_idx as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15))
}

fn argmax(values: &[f64]) -> usize {
    let mut best = 0;
    for (i, v) in values.iter().enumerate().skip(1) {
        if *v > values[best] {
            best = i;
        }
    }
    best
}
