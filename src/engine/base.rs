use crate::engine::traits::AiEngine;
use crate::model::{Trend, TrendAnalysis};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Window for the moving average over the most recent observations.
const TREND_WINDOW: usize = 5;
/// Confidence cap for non-stable trends.
const MAX_CONFIDENCE: f64 = 0.9;

/// Built-in analysis engine: moving average, two-point trend
/// classification, z-score anomaly detection and canned insights.
pub struct BaseAiEngine {
    initialized: AtomicBool,
}

impl BaseAiEngine {
    pub fn new() -> Self {
        Self {
            initialized: AtomicBool::new(false),
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized.load(Ordering::Relaxed)
    }

    fn ensure_initialized(&self) {
        if !self.is_initialized() {
            self.initialize();
        }
    }
}

impl Default for BaseAiEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl AiEngine for BaseAiEngine {
    fn initialize(&self) {
        self.initialized.store(true, Ordering::Relaxed);
        debug!("Analysis engine initialized");
    }

    fn analyze_price_trend(&self, prices: &[f64]) -> TrendAnalysis {
        self.ensure_initialized();

        if prices.len() < 2 {
            return TrendAnalysis {
                trend: Trend::Stable,
                confidence: 0.0,
                moving_average: 0.0,
                last_price: None,
                data_points: prices.len(),
                last_updated: None,
                message: Some("Insufficient data for analysis".to_string()),
            };
        }

        let window = TREND_WINDOW.min(prices.len());
        let moving_average =
            prices[prices.len() - window..].iter().sum::<f64>() / window as f64;

        let last = prices[prices.len() - 1];
        let prev = prices[prices.len() - 2];
        let (trend, confidence) = classify(last, prev);

        TrendAnalysis {
            trend,
            confidence,
            moving_average,
            last_price: Some(last),
            data_points: prices.len(),
            last_updated: None,
            message: None,
        }
    }

    fn detect_anomalies(&self, data: &[f64], threshold: f64) -> Vec<usize> {
        if data.len() < 3 {
            return Vec::new();
        }

        let count = data.len() as f64;
        let mean = data.iter().sum::<f64>() / count;
        let std_dev = (data
            .iter()
            .map(|p| (p - mean).powi(2))
            .sum::<f64>() / count)
            .sqrt();

        // All points identical: no outliers definable.
        if std_dev == 0.0 {
            return Vec::new();
        }

        data.iter()
            .enumerate()
            .filter(|&(_, &p)| ((p - mean) / std_dev).abs() > threshold)
            .map(|(i, _)| i)
            .collect()
    }

    fn generate_insights(&self, analysis: &TrendAnalysis) -> Option<String> {
        let last_price = match analysis.last_price {
            Some(p) => p,
            None => return Some("No analysis results available.".to_string()),
        };

        let recommendation = match analysis.trend {
            Trend::Increasing => "Consider monitoring closely as prices are rising.",
            Trend::Decreasing => "This might be a good time to buy as prices are dropping.",
            Trend::Stable => "Prices appear to be stable.",
        };

        Some(format!(
            "Current price: ${:.2}\n{} trend with {:.1}% confidence\n{}",
            last_price,
            analysis.trend,
            analysis.confidence * 100.0,
            recommendation
        ))
    }
}

/// Trend classification over the last two observations.
fn classify(last: f64, prev: f64) -> (Trend, f64) {
    // A zero previous price has no defined ratio; classify by the sign of
    // the move instead of dividing.
    if prev == 0.0 {
        return if last > 0.0 {
            (Trend::Increasing, MAX_CONFIDENCE)
        } else {
            (Trend::Stable, 0.5)
        };
    }

    if last > prev * 1.05 {
        (Trend::Increasing, MAX_CONFIDENCE.min((last / prev - 1.0) * 10.0))
    } else if last < prev * 0.95 {
        (Trend::Decreasing, MAX_CONFIDENCE.min((1.0 - last / prev) * 10.0))
    } else {
        (Trend::Stable, 0.5)
    }
}
