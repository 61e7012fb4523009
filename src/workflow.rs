use crate::engine::AiEngine;
use crate::model::{AnalysisError, PricePoint, SourceError, TrendAnalysis, WorkflowOutcome};
use crate::source::PriceSource;
use crate::storage::HistoryStore;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tracing::{info, warn};

/// Retention cap for the price history; oldest entries evicted first.
const MAX_HISTORY: usize = 1000;
/// Z-score threshold used when the engine supports anomaly detection.
const DEFAULT_ANOMALY_THRESHOLD: f64 = 2.0;

/// Stateful controller for the monitoring cycle: owns the history, the
/// persistence handle and the price source, and drives one
/// fetch → append → persist → analyze → report pass per call.
pub struct PriceMonitorWorkflow {
    history: Vec<PricePoint>,
    store: Box<dyn HistoryStore>,
    source: Box<dyn PriceSource>,
    engine: Option<Arc<dyn AiEngine>>,
    anomaly_threshold: f64,
}

impl PriceMonitorWorkflow {
    /// Builds the workflow and loads prior history from the store. A load
    /// failure is downgraded to a warning and an empty history; it is
    /// never fatal.
    pub fn new(store: Box<dyn HistoryStore>, source: Box<dyn PriceSource>) -> Self {
        let history = match store.load() {
            Ok(points) => points,
            Err(e) => {
                warn!("Error loading historical data: {e}");
                Vec::new()
            }
        };

        Self {
            history,
            store,
            source,
            engine: None,
            anomaly_threshold: DEFAULT_ANOMALY_THRESHOLD,
        }
    }

    pub fn with_anomaly_threshold(mut self, threshold: f64) -> Self {
        self.anomaly_threshold = threshold;
        self
    }

    /// Binds the analysis engine and eagerly initializes it.
    pub fn set_ai_engine(&mut self, engine: Arc<dyn AiEngine>) {
        engine.initialize();
        self.engine = Some(engine);
    }

    pub fn history(&self) -> &[PricePoint] {
        &self.history
    }

    fn prices(&self) -> Vec<f64> {
        self.history.iter().map(|p| p.price).collect()
    }

    /// Obtains the next price from the source, handing it the most recent
    /// recorded observation.
    pub async fn fetch_current_price(&self) -> Result<f64, SourceError> {
        let last_price = self.history.last().map(|p| p.price);
        self.source.fetch(last_price).await
    }

    /// Appends a new observation, enforces the retention cap and persists
    /// the whole history. A persistence failure is logged and swallowed;
    /// the in-memory state is kept.
    pub fn update_price_history(&mut self, price: f64, timestamp: DateTime<Utc>) {
        self.history.push(PricePoint { timestamp, price });

        if self.history.len() > MAX_HISTORY {
            let excess = self.history.len() - MAX_HISTORY;
            self.history.drain(..excess);
        }

        if let Err(e) = self.store.save(&self.history) {
            warn!("Error saving historical data: {e}");
        }
    }

    /// Runs the bound engine over the recorded prices, oldest to newest,
    /// and stamps the result with the analysis time and data-point count.
    pub fn analyze_current_trend(&self) -> Result<TrendAnalysis, AnalysisError> {
        let engine = self.engine.as_ref().ok_or(AnalysisError::NoEngine)?;

        if self.history.len() < 2 {
            return Err(AnalysisError::InsufficientData);
        }

        let mut analysis = engine.analyze_price_trend(&self.prices());
        analysis.last_updated = Some(Utc::now());
        analysis.data_points = self.history.len();
        Ok(analysis)
    }

    /// Renders the analysis into the plain-text report block. An analysis
    /// error becomes a one-line error string.
    pub fn generate_report(&self, analysis: &Result<TrendAnalysis, AnalysisError>) -> String {
        let analysis = match analysis {
            Ok(a) => a,
            Err(e) => return format!("Error: {e}"),
        };

        let generated_at = analysis
            .last_updated
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| Utc::now().to_rfc3339());

        let mut report = vec![
            "=== Price Monitoring Report ===".to_string(),
            format!("Generated at: {generated_at}"),
            format!("Data points analyzed: {}", analysis.data_points),
            String::new(),
            "Current Analysis:".to_string(),
            format!("- Trend: {}", analysis.trend),
            format!("- Confidence: {:.1}%", analysis.confidence * 100.0),
        ];
        if let Some(last) = analysis.last_price {
            report.push(format!("- Last Price: ${last:.2}"));
        }

        if let Some(engine) = &self.engine {
            let anomalies = engine.detect_anomalies(&self.prices(), self.anomaly_threshold);
            if !anomalies.is_empty() {
                report.push(format!(
                    "- Anomalies detected at {} of {} points",
                    anomalies.len(),
                    self.history.len()
                ));
            }

            if let Some(insights) = engine.generate_insights(analysis) {
                if !insights.is_empty() {
                    report.push(String::new());
                    report.push("Insights:".to_string());
                    report.push(insights);
                }
            }
        }

        report.join("\n")
    }

    /// One complete monitoring pass. No retries; each call is independent
    /// apart from what persists in the history.
    pub async fn run_full_workflow(&mut self) -> Result<WorkflowOutcome, SourceError> {
        info!("Starting price monitoring workflow...");

        let current_price = self.fetch_current_price().await?;
        info!("Current price: ${current_price:.2}");

        self.update_price_history(current_price, Utc::now());
        info!("Updated price history with {} records", self.history.len());

        if self.history.len() < 2 {
            info!("Insufficient data for trend analysis. Collecting more data...");
            return Ok(WorkflowOutcome {
                success: false,
                current_price,
                analysis: None,
                report: None,
                message: Some("Insufficient data for analysis".to_string()),
            });
        }

        let analysis = self.analyze_current_trend();
        let report = self.generate_report(&analysis);
        Ok(WorkflowOutcome {
            success: true,
            current_price,
            analysis: analysis.ok(),
            report: Some(report),
            message: None,
        })
    }
}
