//! Batch predictions over scheduled fixtures: the daily board and curated picks.

use super::gate::{Cached, PredictionCacheGate};
use super::prediction::{MatchPredictor, StandingsCollector};
use crate::config::PredictionConfig;
use crate::error::{AppError, Result};
use crate::sources::FootballDataSource;
use crate::types::{FixtureRecord, MatchContext, MatchPrediction, PickMatch, PredictionResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Fixtures predicted for the daily board.
pub const BOARD_SIZE: usize = 10;

/// Filter applied to curated picks before they are stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QualityGate {
    pub min_win_chance: f64,
    pub min_confidence: f64,
    /// Fixtures evaluated per run.
    pub max_evaluated: usize,
    /// Passing candidates kept before ranking.
    pub max_candidates: usize,
    /// Picks stored and served.
    pub max_stored: usize,
}

impl Default for QualityGate {
    fn default() -> Self {
        Self {
            min_win_chance: 60.0,
            min_confidence: 80.0,
            max_evaluated: 10,
            max_candidates: 10,
            max_stored: 4,
        }
    }
}

impl QualityGate {
    pub fn passes(&self, prediction: &PredictionResult) -> bool {
        prediction.win_chance >= self.min_win_chance && prediction.confidence >= self.min_confidence
    }

    /// Keep passing candidates, best quality first, truncated to `max_stored`.
    pub fn apply(&self, candidates: Vec<MatchPrediction>) -> Vec<MatchPrediction> {
        let mut picks: Vec<MatchPrediction> = candidates
            .into_iter()
            .filter(|c| self.passes(&c.prediction))
            .take(self.max_candidates)
            .collect();
        picks.sort_by(|a, b| b.quality_score().total_cmp(&a.quality_score()));
        picks.truncate(self.max_stored);
        picks
    }
}

/// Builds prediction sets for scheduled fixtures behind the cache gate.
pub struct PicksService {
    source: Arc<dyn FootballDataSource>,
    predictor: Arc<MatchPredictor>,
    gate: PredictionCacheGate,
    competitions: Vec<String>,
    settings: PredictionConfig,
    quality: QualityGate,
}

impl PicksService {
    pub fn new(
        source: Arc<dyn FootballDataSource>,
        predictor: Arc<MatchPredictor>,
        gate: PredictionCacheGate,
        competitions: Vec<String>,
        settings: PredictionConfig,
    ) -> Self {
        Self {
            source,
            predictor,
            gate,
            competitions,
            settings,
            quality: QualityGate::default(),
        }
    }

    pub fn with_quality_gate(mut self, quality: QualityGate) -> Self {
        self.quality = quality;
        self
    }

    pub fn quality_gate(&self) -> &QualityGate {
        &self.quality
    }

    /// Curated picks for the day. Cached under `curated-picks:{date}`.
    pub async fn curated_picks(&self, date_key: &str) -> Result<Cached<Vec<MatchPrediction>>> {
        let key = format!("curated-picks:{}", date_key);
        self.gate
            .get_or_compute(&key, self.settings.curated_picks_ttl(), || async {
                let fixtures = self.source.scheduled_matches(&self.competitions).await?;
                let evaluated = fixtures.len().min(self.quality.max_evaluated);

                let mut candidates = Vec::new();
                for fixture in fixtures.iter().take(self.quality.max_evaluated) {
                    if let Some(entry) = self.predict_fixture(fixture).await {
                        if self.quality.passes(&entry.prediction) {
                            candidates.push(entry);
                        }
                    }
                    if candidates.len() >= self.quality.max_candidates {
                        break;
                    }
                }

                let picks = self.quality.apply(candidates);
                info!(
                    "Curated {} picks from {} evaluated fixtures",
                    picks.len(),
                    evaluated
                );
                Ok::<_, AppError>(picks)
            })
            .await
    }

    /// Predictions for the next scheduled fixtures. Cached under `predictions:{date}`.
    pub async fn upcoming_predictions(
        &self,
        date_key: &str,
    ) -> Result<Cached<Vec<MatchPrediction>>> {
        let key = format!("predictions:{}", date_key);
        self.gate
            .get_or_compute(&key, self.settings.predictions_ttl(), || async {
                let mut fixtures = Vec::new();
                for competition in &self.competitions {
                    match self.source.competition_scheduled(competition).await {
                        Ok(matches) => fixtures.extend(matches),
                        Err(e) => warn!("Could not fetch fixtures for {}: {}", competition, e),
                    }
                }

                let mut board = Vec::new();
                for fixture in fixtures.iter().take(BOARD_SIZE) {
                    if let Some(entry) = self.predict_fixture(fixture).await {
                        board.push(entry);
                    }
                }
                info!(
                    "Predicted {} of {} scheduled fixtures",
                    board.len(),
                    fixtures.len()
                );
                Ok::<_, AppError>(board)
            })
            .await
    }

    /// A failed fixture is skipped rather than failing the batch.
    async fn predict_fixture(&self, fixture: &FixtureRecord) -> Option<MatchPrediction> {
        let context = MatchContext {
            home_team_id: fixture.home_team.id,
            away_team_id: fixture.away_team.id,
            competition_id: fixture.competition_code().map(str::to_string),
            home_team_name: fixture.home_team.display_name().to_string(),
            away_team_name: fixture.away_team.display_name().to_string(),
        };
        let collector =
            StandingsCollector::new(self.source.clone(), self.settings.pipeline_timeout());

        match self.predictor.predict_match(&context, &collector).await {
            Ok(prediction) => Some(MatchPrediction {
                fixture: PickMatch::from(fixture),
                prediction,
            }),
            Err(e) => {
                warn!("Skipping fixture {}: {}", fixture.id, e);
                None
            }
        }
    }
}
