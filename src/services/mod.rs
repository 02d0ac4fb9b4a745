pub mod cache;
pub mod clock;
pub mod gate;
pub mod picks;
pub mod prediction;
pub mod store;
pub mod teams;

pub use cache::Cache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use gate::{Cached, PredictionCacheGate};
pub use picks::{PicksService, QualityGate};
pub use prediction::{
    MatchPredictor, NoVariance, ScoringEngine, SeededVariance, StandingsCollector,
    StatisticsCollector, SuppliedCollector, ThreadRngVariance, VarianceSource,
};
pub use store::{open_store, CacheStore, MemoryStore, RedisStore};
pub use teams::TeamDirectory;
