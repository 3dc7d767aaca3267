//! Prediction service shared by the HTTP handlers and the CLI. Wraps a
//! [`Classifier`] and turns raw probabilities into a ranked career list.

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::domain::TraitScores;
use crate::forest::ForestError;
use crate::model::CareerModel;

/// Number of ranked candidates returned alongside the best match.
pub const TOP_CAREERS: usize = 3;

/// Seam between the prediction service and the fitted model, so handlers
/// can be exercised against stub classifiers.
pub trait Classifier: Send + Sync {
    fn labels(&self) -> &[String];
    fn predict(&self, scores: &TraitScores) -> Result<String, ForestError>;
    fn predict_probabilities(&self, scores: &TraitScores) -> Result<Vec<f64>, ForestError>;
}

impl Classifier for CareerModel {
    fn labels(&self) -> &[String] {
        CareerModel::labels(self)
    }

    fn predict(&self, scores: &TraitScores) -> Result<String, ForestError> {
        CareerModel::predict(self, scores).map(str::to_owned)
    }

    fn predict_probabilities(&self, scores: &TraitScores) -> Result<Vec<f64>, ForestError> {
        CareerModel::predict_probabilities(self, scores)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerScore {
    pub career: String,
    pub probability: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Prediction {
    pub career: String,
    pub top_careers: Vec<CareerScore>,
}

/// Immutable service object handed to every request handler.
#[derive(Clone)]
pub struct Predictor {
    classifier: Arc<dyn Classifier>,
}

impl Predictor {
    pub fn new(classifier: Arc<dyn Classifier>) -> Self {
        Self { classifier }
    }

    /// Best-match career plus up to [`TOP_CAREERS`] candidates ranked by
    /// descending probability. The sort is stable, so equal probabilities
    /// keep the classifier's label order.
    pub fn predict(&self, scores: &TraitScores) -> Result<Prediction, ForestError> {
        let career = self.classifier.predict(scores)?;
        let probabilities = self.classifier.predict_probabilities(scores)?;

        let mut ranked: Vec<CareerScore> = self
            .classifier
            .labels()
            .iter()
            .zip(&probabilities)
            .map(|(career, &probability)| CareerScore {
                career: career.clone(),
                probability,
            })
            .collect();
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(Ordering::Equal)
        });
        ranked.truncate(TOP_CAREERS);

        Ok(Prediction {
            career,
            top_careers: ranked,
        })
    }
}
