use super::ApiResponse;
use crate::error::{AppError, Result};
use crate::types::{CompetitionInfo, StandingRow, TeamRef};
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::get,
    Json, Router,
};

/// Competition codes are short upper-case tokens ("PL", "BL1") or numeric ids.
pub(crate) fn competition_code(raw: &str) -> Result<String> {
    let code = raw.trim();
    if code.is_empty() || code.len() > 10 || !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::validation(format!("invalid competition id {:?}", raw)));
    }
    Ok(code.to_uppercase())
}

/// GET /api/competitions
async fn list_competitions(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<CompetitionInfo>>>> {
    let competitions = state.source.competitions().await?;
    Ok(Json(ApiResponse::list(competitions)))
}

/// GET /api/competitions/:id/standings
async fn get_standings(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<StandingRow>>>> {
    let code = competition_code(&id)?;
    let table = state.source.standings(&code).await?;
    Ok(Json(ApiResponse::list(table)))
}

/// GET /api/competitions/:id/teams
async fn get_teams(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<TeamRef>>>> {
    let code = competition_code(&id)?;
    let teams = state.source.competition_teams(&code).await?;
    Ok(Json(ApiResponse::list(teams)))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_competitions))
        .route("/:id/standings", get(get_standings))
        .route("/:id/teams", get(get_teams))
}
