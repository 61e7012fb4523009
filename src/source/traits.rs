use crate::model::SourceError;

/// A feed producing the next price observation.
///
/// `last_price` carries the most recent recorded observation, if any, so
/// sources that walk from the previous value need no history of their own.
#[async_trait::async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch(&self, last_price: Option<f64>) -> Result<f64, SourceError>;
}
