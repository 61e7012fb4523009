use serde::Deserialize;
use std::fs;
use std::path::Path;
use tracing::info;

#[derive(Debug, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_initial_price")]
    pub initial_price: f64,
    #[serde(default = "default_seed")]
    pub seed: u64,
}

#[derive(Debug, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default = "default_anomaly_threshold")]
    pub anomaly_threshold: f64,
    /// 0 runs a single pass; anything greater enables the watch loop.
    #[serde(default)]
    pub check_interval_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            initial_price: default_initial_price(),
            seed: default_seed(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            source: SourceConfig::default(),
            anomaly_threshold: default_anomaly_threshold(),
            check_interval_seconds: 0,
        }
    }
}

fn default_data_dir() -> String {
    "data".to_string()
}

fn default_initial_price() -> f64 {
    100.0
}

fn default_seed() -> u64 {
    42
}

fn default_anomaly_threshold() -> f64 {
    2.0
}

/// Loads the app configuration. A missing file falls back to defaults;
/// a malformed file is an error.
pub fn load_config(path: &str) -> Result<AppConfig, Box<dyn std::error::Error>> {
    if !Path::new(path).exists() {
        info!("No config file at {path}, using defaults");
        return Ok(AppConfig::default());
    }
    let content = fs::read_to_string(path)?;
    let config: AppConfig = serde_json::from_str(&content)?;
    Ok(config)
}
