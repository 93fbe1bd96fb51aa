use std::path::PathBuf;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Everything has a default; the tool must work with a bare environment.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the JSON collection files.
    pub data_dir: PathBuf,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let data_dir = match std::env::var("PREP_DATA_DIR") {
            Ok(dir) => PathBuf::from(dir),
            Err(_) => default_data_dir()?,
        };

        Ok(Config {
            data_dir,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn default_data_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set and PREP_DATA_DIR not provided")?;
    Ok(PathBuf::from(home).join(".placement-prep"))
}
