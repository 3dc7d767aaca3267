//! Exercises a running server: health check, then a prediction for each
//! of four fixed sample profiles.

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use career_api::domain::TraitKind;
use career_api::routes::predict::PredictResponse;

#[derive(Parser, Debug)]
#[command(about = "Smoke-test a running career prediction server")]
struct Args {
    /// Base URL of the server
    #[arg(long, default_value = "http://localhost:5000")]
    base_url: String,
}

const SAMPLE_PROFILES: [(&str, [f64; 5]); 4] = [
    ("Research-oriented person", [8.5, 8.2, 4.5, 6.2, 5.0]),
    ("Sales-oriented person", [5.5, 5.0, 9.2, 8.5, 3.0]),
    ("Creative marketer", [8.0, 5.5, 8.0, 6.5, 4.0]),
    ("Finance-oriented person", [5.0, 9.0, 5.5, 5.0, 3.0]),
];

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let client = reqwest::Client::new();

    let health = client
        .get(format!("{}/health", args.base_url))
        .send()
        .await
        .context("health request failed; is the server running?")?;
    println!("Health check status: {}", health.status());
    let body: serde_json::Value = health.json().await?;
    println!("{}", serde_json::to_string_pretty(&body)?);

    for (name, traits) in SAMPLE_PROFILES {
        println!("\n{}", "-".repeat(50));
        println!("Testing with profile: {name}");
        println!("Personality traits: {traits:?}");

        let response = client
            .post(format!("{}/predict", args.base_url))
            .json(&json!({ "personality_traits": traits }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            println!("Error: {status}");
            println!("{}", response.text().await?);
            continue;
        }

        let result: PredictResponse = response.json().await?;
        println!("Predicted Career: {}", result.prediction);

        println!("\nTop Career Matches:");
        for candidate in &result.top_careers {
            println!("  - {}: {:.2}", candidate.career, candidate.probability);
        }

        println!("\nTrait Levels:");
        for kind in TraitKind::ALL {
            println!(
                "  - {}: {}",
                kind.name(),
                result.trait_levels.get(kind).name()
            );
        }
    }

    Ok(())
}
