//! Single CART tree grown on a bootstrap sample.
//!
//! Splits minimize Gini impurity over a random feature subset per node;
//! thresholds sit at the midpoint between consecutive distinct sorted
//! values. Leaves store the normalized class distribution of the samples
//! that reached them.

use std::cmp::Ordering;

use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use super::ForestParams;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) enum Node {
    Leaf {
        distribution: Vec<f64>,
    },
    /// Rows with `row[feature] <= threshold` go left.
    Split {
        feature: usize,
        threshold: f64,
        left: Box<Node>,
        right: Box<Node>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct DecisionTree {
    root: Node,
    /// Unnormalized impurity decrease per feature, accumulated while fitting.
    importances: Vec<f64>,
}

impl DecisionTree {
    /// Grows a tree on the given bootstrap `indices` (repeats allowed).
    pub(crate) fn fit(
        features: &[Vec<f64>],
        labels: &[usize],
        indices: Vec<usize>,
        n_classes: usize,
        params: &ForestParams,
        rng: &mut StdRng,
    ) -> Self {
        let n_features = features.first().map_or(0, Vec::len);
        let mut builder = TreeBuilder {
            features,
            labels,
            n_classes,
            max_depth: params.max_depth,
            min_samples_split: params.min_samples_split,
            subset_size: params.feature_subset_size(n_features),
            n_root: indices.len().max(1),
            importances: vec![0.0; n_features],
        };
        let root = builder.grow(indices, 0, rng);
        DecisionTree {
            root,
            importances: builder.importances,
        }
    }

    /// Class distribution at the leaf this row lands in.
    pub(crate) fn predict_proba(&self, row: &[f64]) -> &[f64] {
        let mut node = &self.root;
        loop {
            match node {
                Node::Leaf { distribution } => return distribution,
                Node::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    node = if row[*feature] <= *threshold {
                        left
                    } else {
                        right
                    };
                }
            }
        }
    }

    pub(crate) fn importances(&self) -> &[f64] {
        &self.importances
    }
}

struct TreeBuilder<'a> {
    features: &'a [Vec<f64>],
    labels: &'a [usize],
    n_classes: usize,
    max_depth: usize,
    min_samples_split: usize,
    subset_size: usize,
    n_root: usize,
    importances: Vec<f64>,
}

struct BestSplit {
    feature: usize,
    threshold: f64,
    weighted_impurity: f64,
    impurity_left: f64,
    impurity_right: f64,
    n_left: usize,
}

impl TreeBuilder<'_> {
    fn grow(&mut self, indices: Vec<usize>, depth: usize, rng: &mut StdRng) -> Node {
        let counts = self.class_counts(&indices);
        let impurity = gini(&counts, indices.len());

        if depth >= self.max_depth || indices.len() < self.min_samples_split || impurity == 0.0 {
            return leaf(counts, indices.len());
        }

        let Some(best) = self.best_split(&indices, impurity, rng) else {
            return leaf(counts, indices.len());
        };

        let n = indices.len() as f64;
        let n_left = best.n_left as f64;
        let n_right = n - n_left;
        let decrease = (n / self.n_root as f64)
            * (impurity
                - (n_left / n) * best.impurity_left
                - (n_right / n) * best.impurity_right);
        self.importances[best.feature] += decrease;

        let (left_idx, right_idx): (Vec<usize>, Vec<usize>) = indices
            .into_iter()
            .partition(|&i| self.features[i][best.feature] <= best.threshold);

        let left = self.grow(left_idx, depth + 1, rng);
        let right = self.grow(right_idx, depth + 1, rng);
        Node::Split {
            feature: best.feature,
            threshold: best.threshold,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Best Gini split over a random feature subset, or `None` when no
    /// candidate strictly improves on the parent impurity.
    fn best_split(
        &self,
        indices: &[usize],
        parent_impurity: f64,
        rng: &mut StdRng,
    ) -> Option<BestSplit> {
        let n_features = self.features.first().map_or(0, Vec::len);
        if n_features == 0 {
            return None;
        }

        let mut best: Option<BestSplit> = None;
        for feature in rand::seq::index::sample(rng, n_features, self.subset_size) {
            let Some(candidate) = self.best_threshold(indices, feature) else {
                continue;
            };
            if candidate.weighted_impurity + IMPROVEMENT_EPSILON >= parent_impurity {
                continue;
            }
            match &best {
                Some(current) if current.weighted_impurity <= candidate.weighted_impurity => {}
                _ => best = Some(candidate),
            }
        }
        best
    }

    /// Sweeps sorted values of one feature, tracking class counts on each
    /// side, and returns the threshold with the lowest weighted impurity.
    fn best_threshold(&self, indices: &[usize], feature: usize) -> Option<BestSplit> {
        let mut order = indices.to_vec();
        order.sort_by(|&a, &b| {
            self.features[a][feature]
                .partial_cmp(&self.features[b][feature])
                .unwrap_or(Ordering::Equal)
        });

        let n = order.len();
        let mut left_counts = vec![0usize; self.n_classes];
        let mut right_counts = self.class_counts(indices);
        let mut best: Option<BestSplit> = None;

        for i in 1..n {
            let moved = order[i - 1];
            left_counts[self.labels[moved]] += 1;
            right_counts[self.labels[moved]] -= 1;

            let v_prev = self.features[moved][feature];
            let v_curr = self.features[order[i]][feature];
            if v_curr <= v_prev {
                continue;
            }
            let threshold = (v_prev + v_curr) / 2.0;
            // Midpoints of adjacent floats can collapse onto an endpoint,
            // which would desynchronize the sweep counts from the partition.
            if threshold <= v_prev || threshold >= v_curr {
                continue;
            }

            let impurity_left = gini(&left_counts, i);
            let impurity_right = gini(&right_counts, n - i);
            let weighted =
                ((i as f64) * impurity_left + ((n - i) as f64) * impurity_right) / n as f64;

            let better = best
                .as_ref()
                .map_or(true, |b| weighted < b.weighted_impurity);
            if better {
                best = Some(BestSplit {
                    feature,
                    threshold,
                    weighted_impurity: weighted,
                    impurity_left,
                    impurity_right,
                    n_left: i,
                });
            }
        }
        best
    }

    fn class_counts(&self, indices: &[usize]) -> Vec<usize> {
        let mut counts = vec![0usize; self.n_classes];
        for &i in indices {
            counts[self.labels[i]] += 1;
        }
        counts
    }
}

const IMPROVEMENT_EPSILON: f64 = 1e-12;

fn gini(counts: &[usize], total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    let t = total as f64;
    1.0 - counts
        .iter()
        .map(|&c| {
            let p = c as f64 / t;
            p * p
        })
        .sum::<f64>()
}

fn leaf(counts: Vec<usize>, total: usize) -> Node {
    let t = total.max(1) as f64;
    Node::Leaf {
        distribution: counts.into_iter().map(|c| c as f64 / t).collect(),
    }
}
