use super::competitions::competition_code;
use super::{parse_date, ApiResponse};
use crate::error::{AppError, Result};
use crate::types::CompetitionMatches;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    pub competition_id: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
}

/// GET /api/matches/:competitionId/:date
async fn matches_on_date(
    State(state): State<AppState>,
    Path((competition_id, date)): Path<(String, String)>,
) -> Result<Json<ApiResponse<CompetitionMatches>>> {
    let code = competition_code(&competition_id)?;
    parse_date("date", &date)?;
    let matches = state.source.competition_matches(&code, &date, &date).await?;
    Ok(Json(ApiResponse::new(matches)))
}

/// GET /api/matches/range?competitionId=&dateFrom=&dateTo=
async fn matches_in_range(
    State(state): State<AppState>,
    Query(query): Query<RangeQuery>,
) -> Result<Json<ApiResponse<CompetitionMatches>>> {
    let (Some(competition_id), Some(date_from), Some(date_to)) =
        (query.competition_id, query.date_from, query.date_to)
    else {
        return Err(AppError::validation(
            "competitionId, dateFrom, and dateTo are required",
        ));
    };

    let code = competition_code(&competition_id)?;
    let from = parse_date("dateFrom", &date_from)?;
    let to = parse_date("dateTo", &date_to)?;
    if from > to {
        return Err(AppError::validation("dateFrom must not be after dateTo"));
    }

    let matches = state
        .source
        .competition_matches(&code, &date_from, &date_to)
        .await?;
    Ok(Json(ApiResponse::new(matches)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/range", get(matches_in_range))
        .route("/:competition_id/:date", get(matches_on_date))
}
