use crate::model::{PricePoint, StorageError};

/// Persistence seam for the price history. Implementations rewrite the
/// whole history on every save; there is no incremental append.
pub trait HistoryStore: Send {
    fn load(&self) -> Result<Vec<PricePoint>, StorageError>;
    fn save(&self, points: &[PricePoint]) -> Result<(), StorageError>;
}
