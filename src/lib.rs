// price-monitor: single-instrument price trend monitoring.

pub mod config;
pub mod engine;
pub mod model;
pub mod source;
pub mod storage;
pub mod utils;
pub mod workflow;

pub use config::{load_config, AppConfig};
pub use engine::{AiEngine, BaseAiEngine};
pub use model::{
    AnalysisError, PricePoint, SourceError, StorageError, Trend, TrendAnalysis, WorkflowOutcome,
};
pub use source::{PriceSource, RandomWalkSource, ReplaySource};
pub use storage::{HistoryStore, JsonFileStore};
pub use workflow::PriceMonitorWorkflow;
