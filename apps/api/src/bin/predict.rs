//! Interactive career predictor: prompts for the five trait scores on
//! stdin and prints the prediction with per-trait explanations.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use career_api::domain::{TraitKind, TraitScores};
use career_api::explain::{explanation, TraitLevels};
use career_api::model::CareerModel;
use career_api::predictor::Predictor;

#[derive(Parser, Debug)]
#[command(about = "Interactive career prediction from Big Five scores")]
struct Args {
    /// Path of the trained model artifact
    #[arg(long, default_value = "models/career_model.bin")]
    model: PathBuf,
}

fn main() {
    let args = Args::parse();

    println!("Career Prediction Tool");
    println!("=====================");
    println!("Please rate your personality traits on a scale of 1-10:");

    let scores = match read_scores() {
        Ok(scores) => scores,
        Err(message) => {
            println!("{message}");
            return;
        }
    };

    let model = match CareerModel::load(&args.model) {
        Ok(model) => model,
        Err(err) => {
            println!("{err}");
            println!("Run the train binary first.");
            return;
        }
    };
    let predictor = Predictor::new(Arc::new(model));

    let prediction = match predictor.predict(&scores) {
        Ok(prediction) => prediction,
        Err(err) => {
            println!("An error occurred: {err}");
            return;
        }
    };

    println!("\nResults:");
    println!("Best career match: {}", prediction.career);

    println!("\nTop 3 career matches:");
    for candidate in &prediction.top_careers {
        println!("- {}: {:.2}", candidate.career, candidate.probability);
    }

    println!("\nPersonality traits explanation:");
    let levels = TraitLevels::of(&scores);
    for kind in TraitKind::ALL {
        let level = levels.get(kind);
        println!(
            "- Your {} score ({:.1}) is {}: {}",
            kind.name(),
            scores.get(kind),
            level.name(),
            explanation(kind, level)
        );
    }
}

/// Reads all five scores, then validates ranges in canonical order.
fn read_scores() -> Result<TraitScores, String> {
    let mut values = [0.0; 5];
    for (slot, kind) in values.iter_mut().zip(TraitKind::ALL) {
        *slot = read_score(kind)?;
    }

    let scores = TraitScores::from_array(values);
    if let Some(kind) = scores.out_of_range() {
        return Err(format!("Error: {} must be between 1 and 10.", kind.name()));
    }
    Ok(scores)
}

fn read_score(kind: TraitKind) -> Result<f64, String> {
    print!("{}: ", prompt(kind));
    io::stdout()
        .flush()
        .map_err(|e| format!("An error occurred: {e}"))?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .map_err(|e| format!("An error occurred: {e}"))?;
    line.trim()
        .parse::<f64>()
        .map_err(|_| "Error: All inputs must be numerical values.".to_string())
}

fn prompt(kind: TraitKind) -> &'static str {
    match kind {
        TraitKind::Openness => "Openness to experience",
        other => other.name(),
    }
}
