//! High/low trait categorization and the fixed explanation sentences
//! printed by the interactive predictor.

use serde::{Deserialize, Serialize};

use crate::domain::{TraitKind, TraitScores};

/// Scores strictly above this read as high; exactly 5.5 reads as low.
pub const LEVEL_THRESHOLD: f64 = 5.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraitLevel {
    High,
    Low,
}

impl TraitLevel {
    pub fn of(score: f64) -> Self {
        if score > LEVEL_THRESHOLD {
            Self::High
        } else {
            Self::Low
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Low => "low",
        }
    }
}

/// Category per trait, serialized in canonical trait order with lowercase
/// keys and values ("openness": "high").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraitLevels {
    pub openness: TraitLevel,
    pub conscientiousness: TraitLevel,
    pub extraversion: TraitLevel,
    pub agreeableness: TraitLevel,
    pub neuroticism: TraitLevel,
}

impl TraitLevels {
    pub fn of(scores: &TraitScores) -> Self {
        Self {
            openness: TraitLevel::of(scores.openness),
            conscientiousness: TraitLevel::of(scores.conscientiousness),
            extraversion: TraitLevel::of(scores.extraversion),
            agreeableness: TraitLevel::of(scores.agreeableness),
            neuroticism: TraitLevel::of(scores.neuroticism),
        }
    }

    pub fn get(&self, kind: TraitKind) -> TraitLevel {
        match kind {
            TraitKind::Openness => self.openness,
            TraitKind::Conscientiousness => self.conscientiousness,
            TraitKind::Extraversion => self.extraversion,
            TraitKind::Agreeableness => self.agreeableness,
            TraitKind::Neuroticism => self.neuroticism,
        }
    }
}

/// Fixed sentence for a (trait, level) pair.
pub fn explanation(kind: TraitKind, level: TraitLevel) -> &'static str {
    use TraitKind::*;
    use TraitLevel::*;
    match (kind, level) {
        (Openness, High) => {
            "high openness indicates creativity and curiosity, suitable for research, arts, and innovation-focused roles."
        }
        (Openness, Low) => {
            "lower openness often indicates preference for structure and routine, suitable for operational and practical roles."
        }
        (Conscientiousness, High) => {
            "high conscientiousness indicates organization and reliability, suitable for management, finance, and detail-oriented work."
        }
        (Conscientiousness, Low) => {
            "lower conscientiousness may indicate flexibility and spontaneity, suitable for creative or adaptive roles."
        }
        (Extraversion, High) => {
            "high extraversion indicates sociability and assertiveness, suitable for sales, leadership, and public-facing roles."
        }
        (Extraversion, Low) => {
            "lower extraversion (introversion) indicates thoughtfulness and independence, suitable for analytical, technical, or creative individual work."
        }
        (Agreeableness, High) => {
            "high agreeableness indicates cooperation and empathy, suitable for healthcare, education, and supportive roles."
        }
        (Agreeableness, Low) => {
            "lower agreeableness may indicate competitiveness and critical thinking, suitable for executive, legal, or analytical roles."
        }
        (Neuroticism, High) => {
            "higher neuroticism indicates sensitivity and awareness of risks, which can be valuable in certain analytical or artistic contexts."
        }
        (Neuroticism, Low) => {
            "lower neuroticism indicates emotional stability and stress tolerance, suitable for high-pressure environments like management or emergency services."
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_level_threshold_is_exclusive() {
        assert_eq!(TraitLevel::of(5.5), TraitLevel::Low);
        assert_eq!(TraitLevel::of(5.500001), TraitLevel::High);
        assert_eq!(TraitLevel::of(1.0), TraitLevel::Low);
        assert_eq!(TraitLevel::of(10.0), TraitLevel::High);
    }

    #[test]
    fn test_levels_for_a_mixed_profile() {
        let scores = TraitScores::from_array([8.5, 8.2, 4.5, 6.2, 5.0]);
        let levels = TraitLevels::of(&scores);
        assert_eq!(levels.openness, TraitLevel::High);
        assert_eq!(levels.conscientiousness, TraitLevel::High);
        assert_eq!(levels.extraversion, TraitLevel::Low);
        assert_eq!(levels.agreeableness, TraitLevel::High);
        assert_eq!(levels.neuroticism, TraitLevel::Low);
    }

    #[test]
    fn test_levels_serialize_with_lowercase_keys_and_values() {
        let scores = TraitScores::from_array([8.5, 8.2, 4.5, 6.2, 5.0]);
        let value = serde_json::to_value(TraitLevels::of(&scores)).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "openness": "high",
                "conscientiousness": "high",
                "extraversion": "low",
                "agreeableness": "high",
                "neuroticism": "low",
            })
        );
    }

    #[test]
    fn test_get_matches_fields() {
        let scores = TraitScores::from_array([9.0, 1.0, 9.0, 1.0, 9.0]);
        let levels = TraitLevels::of(&scores);
        assert_eq!(levels.get(TraitKind::Openness), TraitLevel::High);
        assert_eq!(levels.get(TraitKind::Conscientiousness), TraitLevel::Low);
        assert_eq!(levels.get(TraitKind::Neuroticism), TraitLevel::High);
    }

    #[test]
    fn test_every_pair_has_a_distinct_sentence() {
        let mut seen = HashSet::new();
        for kind in TraitKind::ALL {
            for level in [TraitLevel::High, TraitLevel::Low] {
                let sentence = explanation(kind, level);
                assert!(!sentence.is_empty());
                assert!(seen.insert(sentence), "duplicate sentence for {kind:?}");
            }
        }
        assert_eq!(seen.len(), 10);
    }
}
