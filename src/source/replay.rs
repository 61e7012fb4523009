use crate::model::SourceError;
use crate::source::traits::PriceSource;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays a fixed price sequence in order. Used by tests and for
/// feeding recorded data through the workflow.
pub struct ReplaySource {
    prices: Mutex<VecDeque<f64>>,
}

impl ReplaySource {
    pub fn new(prices: Vec<f64>) -> Self {
        Self {
            prices: Mutex::new(prices.into()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.prices.lock().map(|q| q.len()).unwrap_or(0)
    }
}

#[async_trait::async_trait]
impl PriceSource for ReplaySource {
    async fn fetch(&self, _last_price: Option<f64>) -> Result<f64, SourceError> {
        let mut prices = self
            .prices
            .lock()
            .map_err(|_| SourceError::Unavailable("queue lock poisoned".to_string()))?;
        prices.pop_front().ok_or(SourceError::Exhausted)
    }
}
