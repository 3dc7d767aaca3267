//! Trains the career model on synthetic data, prints an evaluation report
//! and saves the artifact.

use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use career_api::dataset::{self, TrainingSample};
use career_api::domain::TraitKind;
use career_api::forest::ForestParams;
use career_api::metrics::{accuracy, classification_report, confusion_matrix};
use career_api::model::CareerModel;

#[derive(Parser, Debug)]
#[command(about = "Train the career prediction model on synthetic data")]
struct Args {
    /// Number of synthetic samples to generate
    #[arg(long, default_value_t = 1000)]
    samples: usize,

    /// Master random seed for data generation and training
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Number of trees in the forest
    #[arg(long, default_value_t = 100)]
    trees: usize,

    /// Maximum tree depth
    #[arg(long, default_value_t = 10)]
    max_depth: usize,

    /// Fraction of samples held out for evaluation
    #[arg(long, default_value_t = 0.2)]
    test_fraction: f64,

    /// Output path for the model artifact
    #[arg(long, default_value = "models/career_model.bin")]
    out: PathBuf,

    /// Exit without training when the artifact already exists
    #[arg(long)]
    if_missing: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.if_missing && args.out.exists() {
        println!("Model found at {}", args.out.display());
        return Ok(());
    }

    println!(
        "Generating {} samples of personality traits data (seed {})...",
        args.samples, args.seed
    );
    let samples = dataset::generate(args.samples, args.seed);
    print_overview(&samples);

    let (train, test) = dataset::split(&samples, args.test_fraction, args.seed)?;
    println!("\nTraining set size: {}", train.len());
    println!("Testing set size: {}", test.len());

    println!("\nTraining random forest ({} trees, depth {})...", args.trees, args.max_depth);
    let params = ForestParams {
        n_trees: args.trees,
        max_depth: args.max_depth,
        seed: args.seed,
        ..ForestParams::default()
    };
    let mut model = CareerModel::train(&train, &params)?;

    let actual: Vec<&str> = test.iter().map(|s| s.career).collect();
    let predicted = test
        .iter()
        .map(|s| model.predict(&s.scores).map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()?;

    let holdout = accuracy(&actual, &predicted);
    model.meta.holdout_accuracy = Some(holdout);
    println!("\nAccuracy: {holdout:.4}");

    println!("\nClassification Report:");
    println!("{}", classification_report(&actual, &predicted));

    println!("\nConfusion Matrix:");
    println!("{}", confusion_matrix(&actual, &predicted));

    println!("\nFeature Importance:");
    let mut ranked: Vec<(TraitKind, f64)> = TraitKind::ALL
        .into_iter()
        .zip(model.feature_importances())
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(Ordering::Equal));
    for (kind, importance) in ranked {
        println!("  {:<18} {importance:.4}", kind.name());
    }

    model
        .save(&args.out)
        .with_context(|| format!("saving model to {}", args.out.display()))?;
    println!("\nModel saved to {}", args.out.display());

    Ok(())
}

fn print_overview(samples: &[TrainingSample]) {
    println!("\nSample data:");
    println!(
        "{:>9} {:>18} {:>13} {:>14} {:>12}  Career",
        "Openness", "Conscientiousness", "Extraversion", "Agreeableness", "Neuroticism"
    );
    for sample in samples.iter().take(5) {
        let t = &sample.scores;
        println!(
            "{:>9.2} {:>18.2} {:>13.2} {:>14.2} {:>12.2}  {}",
            t.openness, t.conscientiousness, t.extraversion, t.agreeableness, t.neuroticism,
            sample.career
        );
    }

    println!("\nCareer distribution:");
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for sample in samples {
        *counts.entry(sample.career).or_default() += 1;
    }
    let mut ordered: Vec<(&str, usize)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    for (career, count) in ordered {
        println!("  {career:<24} {count}");
    }
}
