use crate::model::TrendAnalysis;

/// Interface for pluggable analysis engines.
///
/// Only `analyze_price_trend` is mandatory. The remaining members default
/// to "capability not provided" so the workflow runs against a minimal
/// engine and checks presence through the returned types.
pub trait AiEngine: Send + Sync {
    /// Prepares internal resources. Idempotent; safe to call more than once.
    fn initialize(&self) {}

    /// Classifies the trend of a price sequence, oldest to newest.
    fn analyze_price_trend(&self, prices: &[f64]) -> TrendAnalysis;

    /// Indices of statistical outliers in `data`, ascending. Optional
    /// capability; the default reports none.
    fn detect_anomalies(&self, _data: &[f64], _threshold: f64) -> Vec<usize> {
        Vec::new()
    }

    /// Human-readable summary of an analysis. Optional capability; the
    /// default provides no insights.
    fn generate_insights(&self, _analysis: &TrendAnalysis) -> Option<String> {
        None
    }
}
