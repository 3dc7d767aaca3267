use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a development default, so a bare `cargo run` works.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_path: PathBuf,
    pub port: u16,
    pub rust_log: String,
    /// Explicit CORS origin list; `None` keeps the permissive development
    /// default.
    pub allowed_origins: Option<Vec<String>>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            model_path: std::env::var("MODEL_PATH")
                .unwrap_or_else(|_| "models/career_model.bin".to_string())
                .into(),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "5000".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            allowed_origins: std::env::var("ALLOWED_ORIGINS")
                .ok()
                .and_then(|raw| parse_origins(&raw)),
        })
    }
}

/// Splits a comma-separated origin list; a blank value reads as unset.
fn parse_origins(raw: &str) -> Option<Vec<String>> {
    let origins: Vec<String> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    (!origins.is_empty()).then_some(origins)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_origins_splits_and_trims() {
        assert_eq!(
            parse_origins("http://localhost:3000, http://127.0.0.1:3000"),
            Some(vec![
                "http://localhost:3000".to_string(),
                "http://127.0.0.1:3000".to_string(),
            ])
        );
    }

    #[test]
    fn test_parse_origins_blank_reads_as_unset() {
        assert_eq!(parse_origins(""), None);
        assert_eq!(parse_origins(" , "), None);
    }
}
