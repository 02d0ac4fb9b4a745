use super::ApiResponse;
use crate::error::Result;
use crate::types::MatchPrediction;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use tracing::error;

/// GET /api/picks/curated
async fn curated_picks(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<MatchPrediction>>>> {
    let date_key = state.clock.date_key();
    let picks = state.picks.curated_picks(&date_key).await.map_err(|e| {
        error!("Curated picks for {} failed: {}", date_key, e);
        e
    })?;
    Ok(Json(ApiResponse::cached_list(picks)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/curated", get(curated_picks))
}
