// Core structs: PricePoint, Trend, TrendAnalysis, WorkflowOutcome
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A single recorded price observation. Immutable once appended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub timestamp: DateTime<Utc>,
    pub price: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Increasing,
    Decreasing,
    Stable,
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Increasing => write!(f, "Increasing"),
            Trend::Decreasing => write!(f, "Decreasing"),
            Trend::Stable => write!(f, "Stable"),
        }
    }
}

/// Result of one trend analysis pass. Built fresh on every call.
#[derive(Debug, Clone, Serialize)]
pub struct TrendAnalysis {
    pub trend: Trend,
    pub confidence: f64,
    pub moving_average: f64,
    pub last_price: Option<f64>,
    pub data_points: usize,
    pub last_updated: Option<DateTime<Utc>>,
    pub message: Option<String>,
}

/// Outcome of a single `run_full_workflow` pass.
#[derive(Debug)]
pub struct WorkflowOutcome {
    pub success: bool,
    pub current_price: f64,
    pub analysis: Option<TrendAnalysis>,
    pub report: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("price source unavailable: {0}")]
    Unavailable(String),
    #[error("price source exhausted")]
    Exhausted,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid history file: {0}")]
    Format(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("AI engine not initialized")]
    NoEngine,
    #[error("Insufficient data for analysis")]
    InsufficientData,
}
