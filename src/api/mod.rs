pub mod competitions;
pub mod health;
pub mod matches;
pub mod picks;
pub mod predictions;
pub mod teams;

use crate::error::AppError;
use crate::services::Cached;
use crate::AppState;
use axum::Router;
use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

/// API response wrapper.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
    pub meta: ApiMeta,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiMeta {
    pub cached: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_update: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl ApiMeta {
    pub fn simple() -> Self {
        Self {
            cached: false,
            next_update: None,
            count: None,
        }
    }

    pub fn counted(count: usize) -> Self {
        Self {
            count: Some(count),
            ..Self::simple()
        }
    }
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            meta: ApiMeta::simple(),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    pub fn list(data: Vec<T>) -> Self {
        let count = data.len();
        Self {
            data,
            meta: ApiMeta::counted(count),
        }
    }

    /// A list served through the prediction cache gate.
    pub fn cached_list(cached: Cached<Vec<T>>) -> Self {
        let count = cached.value.len();
        Self {
            data: cached.value,
            meta: ApiMeta {
                cached: cached.cached,
                next_update: Some(cached.next_update),
                count: Some(count),
            },
        }
    }
}

/// Validate a `YYYY-MM-DD` date parameter.
pub(crate) fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::validation(format!("{} must be a YYYY-MM-DD date (got {:?})", field, value)))
}

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(predictions::router())
        .nest("/api/picks", picks::router())
        .nest("/api/teams", teams::router())
        .nest("/api/competitions", competitions::router())
        .nest("/api/matches", matches::router())
}
