//! Synthetic training data: seeded uniform trait draws labeled by the
//! priority-ordered career rule.
//!
//! The rule is data, not control flow: an ordered table of (career,
//! predicate) pairs evaluated top to bottom, first match wins. Samples that
//! match no rule fall through to a uniformly random catch-all career.

use anyhow::{bail, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::domain::TraitScores;

/// One labeled training sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingSample {
    pub scores: TraitScores,
    pub career: &'static str,
}

/// A career paired with the predicate that selects it.
#[derive(Debug, Clone, Copy)]
pub struct LabelRule {
    pub career: &'static str,
    pub matches: fn(&TraitScores) -> bool,
}

/// The career rule, in priority order. Earlier rows take precedence.
pub const LABEL_RULES: &[LabelRule] = &[
    LabelRule {
        career: "Research Scientist",
        matches: |t| t.openness > 7.0 && t.conscientiousness > 7.0,
    },
    LabelRule {
        career: "Marketing Creative",
        matches: |t| t.openness > 7.0 && t.extraversion > 7.0,
    },
    LabelRule {
        career: "Healthcare Professional",
        matches: |t| t.conscientiousness > 7.0 && t.agreeableness > 7.0,
    },
    LabelRule {
        career: "Sales Representative",
        matches: |t| t.extraversion > 7.0 && t.agreeableness > 7.0,
    },
    LabelRule {
        career: "Financial Analyst",
        matches: |t| t.conscientiousness > 7.0 && t.neuroticism < 4.0,
    },
    LabelRule {
        career: "Software Developer",
        matches: |t| t.openness > 7.0 && t.neuroticism < 4.0,
    },
    LabelRule {
        career: "Entrepreneur",
        matches: |t| t.extraversion > 7.0 && t.neuroticism < 4.0,
    },
];

/// Careers assigned uniformly at random when no rule matches.
/// The catch-all is deliberately trait-independent.
pub const FALLBACK_CAREERS: [&str; 4] =
    ["Project Manager", "Teacher", "HR Professional", "Designer"];

/// Applies the rule table; falls back to a uniform draw when nothing matches.
pub fn assign_career(scores: &TraitScores, rng: &mut StdRng) -> &'static str {
    for rule in LABEL_RULES {
        if (rule.matches)(scores) {
            return rule.career;
        }
    }
    FALLBACK_CAREERS[rng.gen_range(0..FALLBACK_CAREERS.len())]
}

/// Every career the rule can emit: the 7 priority careers plus the 4
/// fallback careers, deduplicated in rule order.
pub fn career_vocabulary() -> Vec<&'static str> {
    let mut vocab: Vec<&'static str> = LABEL_RULES.iter().map(|r| r.career).collect();
    for career in FALLBACK_CAREERS {
        if !vocab.contains(&career) {
            vocab.push(career);
        }
    }
    vocab
}

/// Generates `n_samples` labeled samples. Scores are drawn uniformly from
/// [`TraitScores::MIN`, `TraitScores::MAX`], so generation cannot fail; the
/// same seed always produces the same dataset.
pub fn generate(n_samples: usize, seed: u64) -> Vec<TrainingSample> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut samples = Vec::with_capacity(n_samples);

    for _ in 0..n_samples {
        // Field order is draw order; keep it canonical for reproducibility.
        let scores = TraitScores {
            openness: uniform_score(&mut rng),
            conscientiousness: uniform_score(&mut rng),
            extraversion: uniform_score(&mut rng),
            agreeableness: uniform_score(&mut rng),
            neuroticism: uniform_score(&mut rng),
        };
        let career = assign_career(&scores, &mut rng);
        samples.push(TrainingSample { scores, career });
    }

    samples
}

/// Seeded shuffle followed by a tail split. The holdout size is
/// `ceil(len * test_fraction)`; both sides must end up non-empty.
pub fn split(
    samples: &[TrainingSample],
    test_fraction: f64,
    seed: u64,
) -> Result<(Vec<TrainingSample>, Vec<TrainingSample>)> {
    if !(0.0..1.0).contains(&test_fraction) || test_fraction == 0.0 {
        bail!("test fraction must be inside (0, 1), got {test_fraction}");
    }

    let n_test = ((samples.len() as f64) * test_fraction).ceil() as usize;
    if n_test == 0 || n_test >= samples.len() {
        bail!(
            "test fraction {test_fraction} leaves an empty split for {} samples",
            samples.len()
        );
    }

    let mut shuffled = samples.to_vec();
    shuffled.shuffle(&mut StdRng::seed_from_u64(seed));
    let test = shuffled.split_off(shuffled.len() - n_test);
    Ok((shuffled, test))
}

fn uniform_score(rng: &mut StdRng) -> f64 {
    rng.gen_range(TraitScores::MIN..=TraitScores::MAX)
}
