use price_monitor::{
    load_config, BaseAiEngine, JsonFileStore, PriceMonitorWorkflow, RandomWalkSource, SourceError,
};
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Set panic hook to log details about any panic
    std::panic::set_hook(Box::new(|panic_info| {
        eprintln!("😱 Panic occurred: {:?}", panic_info);
    }));

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config.json".to_string());
    let config = match load_config(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Config load error: {}", e);
            std::process::exit(1);
        }
    };

    let store = match JsonFileStore::new(&config.data_dir) {
        Ok(s) => Box::new(s),
        Err(e) => {
            error!("Failed to initialize storage: {}", e);
            std::process::exit(1);
        }
    };
    let source = Box::new(RandomWalkSource::new(
        config.source.initial_price,
        config.source.seed,
    ));

    let mut workflow = PriceMonitorWorkflow::new(store, source)
        .with_anomaly_threshold(config.anomaly_threshold);
    workflow.set_ai_engine(Arc::new(BaseAiEngine::new()));

    info!("🚀 Price monitor started");

    if config.check_interval_seconds == 0 {
        if let Err(e) = run_pass(&mut workflow).await {
            error!("Price fetch error: {:?}", e);
            std::process::exit(1);
        }
        return;
    }

    // Watch mode: one pass per tick until interrupted.
    loop {
        if let Err(e) = run_pass(&mut workflow).await {
            error!("Price fetch error: {:?}", e);
            std::process::exit(1);
        }

        info!(
            "Waiting for timer ({}s) or shutdown...",
            config.check_interval_seconds
        );
        tokio::select! {
            _ = sleep(Duration::from_secs(config.check_interval_seconds)) => {
                info!("Timer triggered.");
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Shutting down.");
                break;
            }
        }
    }
}

/// Runs one monitoring pass and prints its report. A pass that completes
/// with too little data is not a failure; only a fetch error is.
async fn run_pass(workflow: &mut PriceMonitorWorkflow) -> Result<(), SourceError> {
    let outcome = workflow.run_full_workflow().await?;
    if let Some(report) = &outcome.report {
        println!("{report}");
    } else if let Some(message) = &outcome.message {
        println!("{message}");
    }
    Ok(())
}
