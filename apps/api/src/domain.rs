//! Core domain types: the Big Five trait vector and its identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The five Big Five personality dimensions, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TraitKind {
    Openness,
    Conscientiousness,
    Extraversion,
    Agreeableness,
    Neuroticism,
}

impl TraitKind {
    /// Canonical trait order: the order scores appear on the wire, in prompts,
    /// and as classifier features.
    pub const ALL: [TraitKind; 5] = [
        TraitKind::Openness,
        TraitKind::Conscientiousness,
        TraitKind::Extraversion,
        TraitKind::Agreeableness,
        TraitKind::Neuroticism,
    ];

    /// Display name, e.g. "Openness".
    pub fn name(self) -> &'static str {
        match self {
            TraitKind::Openness => "Openness",
            TraitKind::Conscientiousness => "Conscientiousness",
            TraitKind::Extraversion => "Extraversion",
            TraitKind::Agreeableness => "Agreeableness",
            TraitKind::Neuroticism => "Neuroticism",
        }
    }
}

impl fmt::Display for TraitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A five-trait score vector. Scores are meaningful inside [`MIN`, `MAX`];
/// the request and CLI boundaries reject anything outside that interval
/// before the vector reaches the predictor or the explainer.
///
/// [`MIN`]: TraitScores::MIN
/// [`MAX`]: TraitScores::MAX
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    pub openness: f64,
    pub conscientiousness: f64,
    pub extraversion: f64,
    pub agreeableness: f64,
    pub neuroticism: f64,
}

impl TraitScores {
    /// Lowest valid score.
    pub const MIN: f64 = 1.0;
    /// Highest valid score.
    pub const MAX: f64 = 10.0;

    /// Builds a vector from scores given in canonical trait order.
    pub fn from_array(values: [f64; 5]) -> Self {
        Self {
            openness: values[0],
            conscientiousness: values[1],
            extraversion: values[2],
            agreeableness: values[3],
            neuroticism: values[4],
        }
    }

    /// Scores in canonical trait order.
    pub fn to_array(self) -> [f64; 5] {
        [
            self.openness,
            self.conscientiousness,
            self.extraversion,
            self.agreeableness,
            self.neuroticism,
        ]
    }

    pub fn get(self, kind: TraitKind) -> f64 {
        match kind {
            TraitKind::Openness => self.openness,
            TraitKind::Conscientiousness => self.conscientiousness,
            TraitKind::Extraversion => self.extraversion,
            TraitKind::Agreeableness => self.agreeableness,
            TraitKind::Neuroticism => self.neuroticism,
        }
    }

    /// First trait (in canonical order) whose score falls outside
    /// [`MIN`, `MAX`], or `None` when the whole vector is in range.
    ///
    /// [`MIN`]: TraitScores::MIN
    /// [`MAX`]: TraitScores::MAX
    pub fn out_of_range(self) -> Option<TraitKind> {
        TraitKind::ALL
            .into_iter()
            .find(|kind| !(Self::MIN..=Self::MAX).contains(&self.get(*kind)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_order_matches_names() {
        let names: Vec<&str> = TraitKind::ALL.iter().map(|k| k.name()).collect();
        assert_eq!(
            names,
            vec![
                "Openness",
                "Conscientiousness",
                "Extraversion",
                "Agreeableness",
                "Neuroticism"
            ]
        );
    }

    #[test]
    fn test_array_round_trip() {
        let values = [8.5, 8.2, 4.5, 6.2, 5.0];
        assert_eq!(TraitScores::from_array(values).to_array(), values);
    }

    #[test]
    fn test_get_follows_canonical_order() {
        let scores = TraitScores::from_array([1.0, 2.0, 3.0, 4.0, 5.0]);
        for (i, kind) in TraitKind::ALL.into_iter().enumerate() {
            assert_eq!(scores.get(kind), (i + 1) as f64);
        }
    }

    #[test]
    fn test_boundary_scores_are_in_range() {
        let scores = TraitScores::from_array([1.0, 10.0, 1.0, 10.0, 5.5]);
        assert_eq!(scores.out_of_range(), None);
    }

    #[test]
    fn test_out_of_range_reports_first_offender() {
        // Both Openness and Neuroticism are invalid; canonical order wins.
        let scores = TraitScores::from_array([11.0, 5.0, 5.0, 5.0, 0.5]);
        assert_eq!(scores.out_of_range(), Some(TraitKind::Openness));
    }

    #[test]
    fn test_out_of_range_cites_extraversion_for_third_score() {
        let scores = TraitScores::from_array([5.0, 5.0, 99.0, 5.0, 5.0]);
        assert_eq!(scores.out_of_range(), Some(TraitKind::Extraversion));
    }

    #[test]
    fn test_just_outside_bounds_is_rejected() {
        let low = TraitScores::from_array([0.99, 5.0, 5.0, 5.0, 5.0]);
        assert_eq!(low.out_of_range(), Some(TraitKind::Openness));
        let high = TraitScores::from_array([5.0, 5.0, 5.0, 5.0, 10.01]);
        assert_eq!(high.out_of_range(), Some(TraitKind::Neuroticism));
    }
}
