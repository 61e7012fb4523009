use crate::model::SourceError;
use crate::source::traits::PriceSource;
use crate::utils::round_cents;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Mutex;
use tracing::debug;

/// Placeholder feed performing a seeded random walk from the last
/// recorded price. Stands in for a live data source; deterministic given
/// the seed.
pub struct RandomWalkSource {
    initial_price: f64,
    rng: Mutex<StdRng>,
}

impl RandomWalkSource {
    pub fn new(initial_price: f64, seed: u64) -> Self {
        Self {
            initial_price,
            rng: Mutex::new(StdRng::seed_from_u64(seed)),
        }
    }
}

#[async_trait::async_trait]
impl PriceSource for RandomWalkSource {
    async fn fetch(&self, last_price: Option<f64>) -> Result<f64, SourceError> {
        let mut rng = self
            .rng
            .lock()
            .map_err(|_| SourceError::Unavailable("rng lock poisoned".to_string()))?;

        let price = match last_price {
            // First observation: jitter around the configured base price.
            None => self.initial_price + rng.random_range(-10.0..10.0),
            // Walk at most ±5% from the previous observation.
            Some(last) => last * (1.0 + rng.random_range(-0.05..0.05)),
        };

        let price = round_cents(price.max(0.0));
        debug!("Random walk produced price {price:.2}");
        Ok(price)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_seed_same_sequence() {
        let a = RandomWalkSource::new(100.0, 7);
        let b = RandomWalkSource::new(100.0, 7);

        let mut last = None;
        for _ in 0..10 {
            let pa = a.fetch(last).await.unwrap();
            let pb = b.fetch(last).await.unwrap();
            assert_eq!(pa, pb);
            last = Some(pa);
        }
    }

    #[tokio::test]
    async fn first_price_jitters_around_initial() {
        let source = RandomWalkSource::new(500.0, 1);
        let price = source.fetch(None).await.unwrap();
        assert!((490.0..=510.0).contains(&price));
    }

    #[tokio::test]
    async fn walk_stays_within_five_percent() {
        let source = RandomWalkSource::new(100.0, 3);
        let mut last = 200.0;
        for _ in 0..50 {
            let price = source.fetch(Some(last)).await.unwrap();
            assert!(price >= last * 0.95 - 0.01, "price {price} vs last {last}");
            assert!(price <= last * 1.05 + 0.01, "price {price} vs last {last}");
            last = price;
        }
    }

    #[tokio::test]
    async fn never_goes_negative() {
        let source = RandomWalkSource::new(0.5, 9);
        let price = source.fetch(Some(0.01)).await.unwrap();
        assert!(price >= 0.0);
    }
}
