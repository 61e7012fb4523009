use crate::model::{PricePoint, StorageError};
use crate::storage::traits::HistoryStore;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const HISTORY_FILE: &str = "historical_prices.json";

/// On-disk shape of the history file.
#[derive(Debug, Serialize, Deserialize)]
struct HistoryFile {
    last_updated: DateTime<Utc>,
    prices: Vec<PricePoint>,
}

/// Whole-file JSON persistence for the price history.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Creates the store, resolving the data directory and creating it if
    /// absent.
    pub fn new(data_dir: &str) -> Result<Self, StorageError> {
        let dir = Path::new(data_dir);
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(HISTORY_FILE),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HistoryStore for JsonFileStore {
    fn load(&self) -> Result<Vec<PricePoint>, StorageError> {
        if !self.path.exists() {
            info!("No history file at {}, starting empty", self.path.display());
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&self.path)?;
        let file: HistoryFile = serde_json::from_str(&content)?;

        // A hand-edited file may carry negative prices; drop those entries
        // and keep the rest.
        let total = file.prices.len();
        let prices: Vec<PricePoint> = file
            .prices
            .into_iter()
            .filter(|p| {
                if p.price < 0.0 {
                    warn!(
                        "Skipping history entry with negative price {:.2} at {}",
                        p.price, p.timestamp
                    );
                    false
                } else {
                    true
                }
            })
            .collect();

        info!(
            "Loaded {} historical price records from {}",
            prices.len(),
            self.path.display()
        );
        if prices.len() < total {
            warn!("Dropped {} invalid history entries", total - prices.len());
        }
        Ok(prices)
    }

    fn save(&self, points: &[PricePoint]) -> Result<(), StorageError> {
        let file = HistoryFile {
            last_updated: Utc::now(),
            prices: points.to_vec(),
        };
        let content = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn point(secs: i64, price: f64) -> PricePoint {
        PricePoint {
            timestamp: Utc.timestamp_opt(secs, 0).unwrap(),
            price,
        }
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_str().unwrap()).unwrap();
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn save_then_load_round_trips_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_str().unwrap()).unwrap();

        let points = vec![point(1, 100.0), point(2, 107.0), point(3, 99.5)];
        store.save(&points).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, points);
    }

    #[test]
    fn malformed_file_is_a_format_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_str().unwrap()).unwrap();
        fs::write(store.path(), "not json at all").unwrap();

        assert!(matches!(store.load(), Err(StorageError::Format(_))));
    }

    #[test]
    fn negative_price_entries_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().to_str().unwrap()).unwrap();

        store
            .save(&[point(1, 100.0), point(2, -5.0), point(3, 101.0)])
            .unwrap();
        let loaded = store.load().unwrap();
        assert_eq!(loaded, vec![point(1, 100.0), point(3, 101.0)]);
    }

    #[test]
    fn creates_missing_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("state").join("prices");
        let store = JsonFileStore::new(nested.to_str().unwrap()).unwrap();
        store.save(&[point(1, 42.0)]).unwrap();
        assert!(nested.join(HISTORY_FILE).exists());
    }
}
