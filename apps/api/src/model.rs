//! Trained career model: a fitted forest plus its label vocabulary and
//! training metadata, persisted as a single bincode file on disk.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::TrainingSample;
use crate::domain::TraitScores;
use crate::forest::{ForestError, ForestParams, RandomForest};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write model file {path}: {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("model file {path} is not a valid model: {source}")]
    Decode {
        path: String,
        source: bincode::Error,
    },
    #[error("failed to encode model: {0}")]
    Encode(bincode::Error),
    #[error(transparent)]
    Train(#[from] ForestError),
    #[error("training sample carries career {0} missing from the vocabulary")]
    UnknownCareer(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelMeta {
    pub trained_at: DateTime<Utc>,
    pub n_samples: usize,
    pub seed: u64,
    pub holdout_accuracy: Option<f64>,
}

/// Career classifier over [`TraitScores`]. Labels are the lexicographically
/// sorted distinct careers seen at training time, and every probability
/// vector is aligned with that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareerModel {
    labels: Vec<String>,
    forest: RandomForest,
    pub meta: ModelMeta,
}

impl CareerModel {
    pub fn train(samples: &[TrainingSample], params: &ForestParams) -> Result<Self, ModelError> {
        let labels: Vec<String> = samples
            .iter()
            .map(|s| s.career.to_owned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let features: Vec<Vec<f64>> = samples
            .iter()
            .map(|s| s.scores.to_array().to_vec())
            .collect();
        let classes = samples
            .iter()
            .map(|s| {
                labels
                    .binary_search_by(|l| l.as_str().cmp(s.career))
                    .map_err(|_| ModelError::UnknownCareer(s.career.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let forest = RandomForest::fit(&features, &classes, labels.len(), params)?;
        Ok(Self {
            labels,
            forest,
            meta: ModelMeta {
                trained_at: Utc::now(),
                n_samples: samples.len(),
                seed: params.seed,
                holdout_accuracy: None,
            },
        })
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Probability per career, aligned with [`labels`](Self::labels).
    pub fn predict_probabilities(&self, scores: &TraitScores) -> Result<Vec<f64>, ForestError> {
        self.forest.predict_proba(&scores.to_array())
    }

    pub fn predict(&self, scores: &TraitScores) -> Result<&str, ForestError> {
        let idx = self.forest.predict(&scores.to_array())?;
        Ok(&self.labels[idx])
    }

    /// Importance per trait in canonical trait order, summing to 1.
    pub fn feature_importances(&self) -> Vec<f64> {
        self.forest.feature_importances()
    }

    /// Serializes the model to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ModelError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|source| ModelError::Write {
                    path: path.display().to_string(),
                    source,
                })?;
            }
        }
        let bytes = bincode::serialize(self).map_err(ModelError::Encode)?;
        fs::write(path, bytes).map_err(|source| ModelError::Write {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let bytes = fs::read(path).map_err(|source| ModelError::Read {
            path: path.display().to_string(),
            source,
        })?;
        bincode::deserialize(&bytes).map_err(|source| ModelError::Decode {
            path: path.display().to_string(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset;

    fn trained(n_samples: usize) -> CareerModel {
        let samples = dataset::generate(n_samples, 42);
        let params = ForestParams {
            n_trees: 30,
            ..ForestParams::default()
        };
        CareerModel::train(&samples, &params).unwrap()
    }

    #[test]
    fn test_labels_are_sorted_and_distinct() {
        let model = trained(400);
        let labels = model.labels();
        assert!(labels.windows(2).all(|w| w[0] < w[1]));
        assert!(labels.iter().any(|l| l == "Research Scientist"));
    }

    #[test]
    fn test_predicts_a_clear_cut_profile() {
        let model = trained(400);
        let scores = TraitScores {
            openness: 9.0,
            conscientiousness: 9.0,
            extraversion: 2.0,
            agreeableness: 5.0,
            neuroticism: 5.0,
        };
        assert_eq!(model.predict(&scores).unwrap(), "Research Scientist");
    }

    #[test]
    fn test_probabilities_align_with_labels() {
        let model = trained(400);
        let scores = TraitScores {
            openness: 9.0,
            conscientiousness: 9.0,
            extraversion: 2.0,
            agreeableness: 5.0,
            neuroticism: 5.0,
        };
        let proba = model.predict_probabilities(&scores).unwrap();
        assert_eq!(proba.len(), model.labels().len());
        let sum: f64 = proba.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);

        let best = proba
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.partial_cmp(b.1).unwrap())
            .map(|(i, _)| i)
            .unwrap();
        assert_eq!(model.labels()[best], "Research Scientist");
    }

    #[test]
    fn test_meta_records_training_setup() {
        let model = trained(300);
        assert_eq!(model.meta.n_samples, 300);
        assert_eq!(model.meta.seed, 42);
        assert_eq!(model.meta.holdout_accuracy, None);
    }

    #[test]
    fn test_importances_cover_every_trait() {
        let model = trained(400);
        let importances = model.feature_importances();
        assert_eq!(importances.len(), 5);
        let sum: f64 = importances.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("model.bin");

        let model = trained(200);
        model.save(&path).unwrap();
        let loaded = CareerModel::load(&path).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_load_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = CareerModel::load(dir.path().join("absent.bin")).unwrap_err();
        assert!(matches!(err, ModelError::Read { .. }));
    }

    #[test]
    fn test_load_rejects_garbage_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("junk.bin");
        std::fs::write(&path, b"definitely not a model").unwrap();
        let err = CareerModel::load(&path).unwrap_err();
        assert!(matches!(err, ModelError::Decode { .. }));
    }

    #[test]
    fn test_train_rejects_empty_input() {
        let err = CareerModel::train(&[], &ForestParams::default()).unwrap_err();
        assert!(matches!(err, ModelError::Train(_)));
    }
}
