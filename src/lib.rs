//! Goalcast - football match outcome prediction server

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use services::{
    CacheStore, Clock, MatchPredictor, PicksService, PredictionCacheGate, ScoringEngine,
    TeamDirectory, VarianceSource,
};
use sources::FootballDataSource;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub clock: Arc<dyn Clock>,
    pub source: Arc<dyn FootballDataSource>,
    pub predictor: Arc<MatchPredictor>,
    pub picks: Arc<PicksService>,
    pub teams: Arc<TeamDirectory>,
}

impl AppState {
    /// Wire the services from their collaborators.
    pub fn new(
        config: Config,
        source: Arc<dyn FootballDataSource>,
        store: Arc<dyn CacheStore>,
        variance: Arc<dyn VarianceSource>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let engine = ScoringEngine::new(variance)
            .with_home_advantage(config.prediction.home_advantage);
        let predictor = Arc::new(MatchPredictor::new(engine));

        let gate = PredictionCacheGate::new(store, clock.clone());
        let picks = Arc::new(PicksService::new(
            source.clone(),
            predictor.clone(),
            gate,
            config.competitions.clone(),
            config.prediction.clone(),
        ));

        let teams = Arc::new(TeamDirectory::new(
            source.clone(),
            config.competitions.clone(),
            config.prediction.team_list_ttl(),
            clock.clone(),
        ));

        Self {
            config: Arc::new(config),
            clock,
            source,
            predictor,
            picks,
            teams,
        }
    }
}

/// Build the HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use error::{AppError, Result};
pub use types::*;
