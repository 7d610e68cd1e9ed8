use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Runtime configuration, built once at process start and passed by
/// reference into the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Path to the SQLite database holding sensor readings.
    pub db_path: PathBuf,

    /// Directory rendered artifacts (chart, index page) are written to.
    pub output_dir: PathBuf,

    /// Directory of static assets published alongside the report.
    pub static_dir: PathBuf,

    /// Root of the hosting destination for the directory publisher.
    pub publish_root: PathBuf,

    /// Raw status string that marks a reading as a "full" event.
    pub full_indicator: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from("sensorboard.sqlite3"),
            output_dir: PathBuf::from("out"),
            static_dir: PathBuf::from("static"),
            publish_root: PathBuf::from("published"),
            full_indicator: "full".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file, falling back to defaults when
    /// the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("invalid config file {}", path.display()))
    }
}
