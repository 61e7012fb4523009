// End-to-end tests: real file store, replay source, built-in engine.

use price_monitor::{
    BaseAiEngine, HistoryStore, JsonFileStore, PriceMonitorWorkflow, ReplaySource, Trend,
};
use std::fs;
use std::sync::Arc;

fn file_workflow(dir: &tempfile::TempDir, prices: Vec<f64>) -> PriceMonitorWorkflow {
    let store = JsonFileStore::new(dir.path().to_str().unwrap()).unwrap();
    let mut workflow =
        PriceMonitorWorkflow::new(Box::new(store), Box::new(ReplaySource::new(prices)));
    workflow.set_ai_engine(Arc::new(BaseAiEngine::new()));
    workflow
}

#[tokio::test]
async fn fresh_history_first_pass_is_insufficient() {
    let dir = tempfile::tempdir().unwrap();
    let mut workflow = file_workflow(&dir, vec![100.0]);

    let outcome = workflow.run_full_workflow().await.unwrap();
    assert!(!outcome.success);
    assert_eq!(outcome.current_price, 100.0);
    assert_eq!(
        outcome.message.as_deref(),
        Some("Insufficient data for analysis")
    );
}

#[tokio::test]
async fn rising_pair_reports_increasing_with_expected_confidence() {
    let dir = tempfile::tempdir().unwrap();
    let mut workflow = file_workflow(&dir, vec![100.0, 107.0]);

    workflow.run_full_workflow().await.unwrap();
    let outcome = workflow.run_full_workflow().await.unwrap();

    assert!(outcome.success);
    let analysis = outcome.analysis.unwrap();
    assert_eq!(analysis.trend, Trend::Increasing);
    assert!((analysis.confidence - 0.7).abs() < 1e-9);
    assert_eq!(analysis.data_points, 2);

    let report = outcome.report.unwrap();
    assert!(report.contains("- Trend: Increasing"));
    assert!(report.contains("- Confidence: 70.0%"));
    assert!(report.contains("- Last Price: $107.00"));
    assert!(report.contains("Insights:"));
    assert!(report.contains("monitoring closely"));
}

#[tokio::test]
async fn falling_pair_reports_decreasing_with_clamped_confidence() {
    let dir = tempfile::tempdir().unwrap();
    let mut workflow = file_workflow(&dir, vec![100.0, 90.0]);

    workflow.run_full_workflow().await.unwrap();
    let outcome = workflow.run_full_workflow().await.unwrap();

    let analysis = outcome.analysis.unwrap();
    assert_eq!(analysis.trend, Trend::Decreasing);
    assert_eq!(analysis.confidence, 0.9);
    assert!(outcome.report.unwrap().contains("good time to buy"));
}

#[tokio::test]
async fn small_move_reports_stable() {
    let dir = tempfile::tempdir().unwrap();
    let mut workflow = file_workflow(&dir, vec![100.0, 102.0]);

    workflow.run_full_workflow().await.unwrap();
    let outcome = workflow.run_full_workflow().await.unwrap();

    let analysis = outcome.analysis.unwrap();
    assert_eq!(analysis.trend, Trend::Stable);
    assert_eq!(analysis.confidence, 0.5);
}

#[tokio::test]
async fn history_survives_a_restart() {
    let dir = tempfile::tempdir().unwrap();

    {
        let mut workflow = file_workflow(&dir, vec![100.0, 107.0, 106.0]);
        for _ in 0..3 {
            workflow.run_full_workflow().await.unwrap();
        }
    }

    // Second workflow instance over the same directory, as after a
    // process restart.
    let workflow = file_workflow(&dir, vec![]);
    let prices: Vec<f64> = workflow.history().iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![100.0, 107.0, 106.0]);
}

#[tokio::test]
async fn corrupt_history_file_starts_empty_and_recovers() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path().to_str().unwrap()).unwrap();
    fs::write(store.path(), "{ definitely not json").unwrap();

    let mut workflow = file_workflow(&dir, vec![100.0, 107.0]);
    assert!(workflow.history().is_empty());

    // The next pass overwrites the corrupt file with valid state.
    workflow.run_full_workflow().await.unwrap();
    let reloaded = JsonFileStore::new(dir.path().to_str().unwrap())
        .unwrap()
        .load()
        .unwrap();
    assert_eq!(reloaded.len(), 1);
    assert_eq!(reloaded[0].price, 100.0);
}

#[tokio::test]
async fn persisted_file_tracks_every_update() {
    let dir = tempfile::tempdir().unwrap();
    let mut workflow = file_workflow(&dir, vec![100.0, 107.0]);

    workflow.run_full_workflow().await.unwrap();
    workflow.run_full_workflow().await.unwrap();

    let reloaded = JsonFileStore::new(dir.path().to_str().unwrap())
        .unwrap()
        .load()
        .unwrap();
    let prices: Vec<f64> = reloaded.iter().map(|p| p.price).collect();
    assert_eq!(prices, vec![100.0, 107.0]);
}
