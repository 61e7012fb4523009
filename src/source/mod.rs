// Source module: price feed interface and the built-in sources.

pub mod random_walk;
pub mod replay;
pub mod traits;

pub use random_walk::RandomWalkSource;
pub use replay::ReplaySource;
pub use traits::PriceSource;
