//! Match outcome prediction pipeline.
//!
//! Collector -> normalizer -> scoring engine -> recommendation selector.

pub mod collector;
pub mod engine;
pub mod normalizer;
pub mod predictor;
pub mod recommendation;
pub mod variance;

pub use collector::{CollectedSignals, StandingsCollector, StatisticsCollector, SuppliedCollector};
pub use engine::{
    draw_probability, DirectParams, DirectProjection, HomeAdvantageBias, ScoreBreakdown,
    ScoreWeights, ScoringEngine,
};
pub use predictor::MatchPredictor;
pub use recommendation::{select_direct, select_league, Pick};
pub use variance::{NoVariance, SeededVariance, ThreadRngVariance, VarianceSource};
