use super::ApiResponse;
use crate::error::Result;
use crate::types::TeamEntry;
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Json, Router,
};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub search: String,
}

/// GET /api/teams/search?search=
async fn search_teams(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<ApiResponse<Vec<TeamEntry>>>> {
    let teams = state.teams.search(&query.search).await?;
    Ok(Json(ApiResponse::list(teams)))
}

pub fn router() -> Router<AppState> {
    Router::new().route("/search", get(search_teams))
}
