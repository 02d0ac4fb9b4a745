use super::{ApiResponse, ApiMeta};
use crate::error::{AppError, Result};
use crate::services::prediction::{StandingsCollector, SuppliedCollector};
use crate::types::{DirectStats, MatchContext, MatchPrediction, PredictionResult};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use tracing::error;

/// Body of `POST /api/predict/match`.
///
/// Both stats objects select direct-stats mode; otherwise team ids and a
/// competition select live standings mode.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictMatchRequest {
    #[serde(default)]
    pub home_team_name: String,
    #[serde(default)]
    pub away_team_name: String,
    pub home_stats: Option<DirectStats>,
    pub away_stats: Option<DirectStats>,
    pub home_team_id: Option<u64>,
    pub away_team_id: Option<u64>,
    pub competition_id: Option<String>,
}

impl PredictMatchRequest {
    fn context(&self) -> MatchContext {
        MatchContext {
            home_team_id: self.home_team_id,
            away_team_id: self.away_team_id,
            competition_id: self.competition_id.clone(),
            home_team_name: self.home_team_name.clone(),
            away_team_name: self.away_team_name.clone(),
        }
    }
}

/// GET /api/predictions
async fn upcoming_predictions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MatchPrediction>>>> {
    let date_key = state.clock.date_key();
    let board = state.picks.upcoming_predictions(&date_key).await.map_err(|e| {
        error!("Failed to build predictions for {}: {}", date_key, e);
        e
    })?;
    Ok(Json(ApiResponse::cached_list(board)))
}

/// POST /api/predict/match
async fn predict_match(
    State(state): State<AppState>,
    payload: std::result::Result<Json<PredictMatchRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<PredictionResult>>> {
    let Json(request) = payload.map_err(|e| AppError::validation(e.body_text()))?;
    let context = request.context();
    context.validate()?;

    let prediction = match (request.home_stats, request.away_stats) {
        (Some(home), Some(away)) => {
            let collector = SuppliedCollector::direct(home, away)?;
            state.predictor.predict_match(&context, &collector).await?
        }
        (None, None) if context.home_team_id.is_some() && context.away_team_id.is_some() => {
            let collector = StandingsCollector::new(
                state.source.clone(),
                state.config.prediction.pipeline_timeout(),
            );
            state.predictor.predict_match(&context, &collector).await?
        }
        _ => {
            return Err(AppError::validation(
                "provide homeStats and awayStats, or homeTeamId, awayTeamId and competitionId",
            ))
        }
    };

    Ok(Json(ApiResponse {
        data: prediction,
        meta: ApiMeta::simple(),
    }))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/predictions", get(upcoming_predictions))
        .route("/api/predict/match", post(predict_match))
}
