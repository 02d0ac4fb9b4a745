use super::FootballDataSource;
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::types::{
    CompetitionInfo, CompetitionMatches, CompetitionsResponse, FixtureRecord, MatchesResponse,
    StandingRow, StandingsResponse, TeamRef, TeamsResponse, STATUS_SCHEDULED,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// football-data.org v4 REST client.
#[derive(Clone)]
pub struct FootballDataClient {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl FootballDataClient {
    /// Create a new client.
    pub fn new(base_url: &str, api_key: Option<String>, timeout: std::time::Duration) -> Self {
        let client = Client::builder()
            .user_agent("Goalcast/1.0 (Football Match Predictions)")
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(
            &config.football_data_api_url,
            config.football_data_api_key.clone(),
            config.upstream_timeout(),
        )
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            AppError::UpstreamUnavailable("Missing FOOTBALL_DATA_API_KEY".to_string())
        })?;

        let url = format!("{}{}", self.base_url, endpoint);
        debug!("GET {}", url);

        let response = self
            .client
            .get(&url)
            .header("X-Auth-Token", api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Football API request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let text: String = response
                .text()
                .await
                .unwrap_or_default()
                .chars()
                .take(200)
                .collect();
            warn!("Football API returned {} for {}: {}", status, endpoint, text);
            return Err(AppError::UpstreamUnavailable(format!(
                "Football API error: {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(format!("Malformed Football API response: {}", e)))
    }
}

#[async_trait]
impl FootballDataSource for FootballDataClient {
    async fn standings(&self, competition: &str) -> Result<Vec<StandingRow>> {
        let response: StandingsResponse = self
            .get(&format!("/competitions/{}/standings", competition))
            .await?;
        Ok(response.into_table())
    }

    async fn recent_matches(
        &self,
        team_id: u64,
        limit: usize,
        status: Option<&str>,
    ) -> Result<Vec<FixtureRecord>> {
        let mut endpoint = format!("/teams/{}/matches?limit={}", team_id, limit);
        if let Some(status) = status {
            endpoint.push_str(&format!("&status={}", status));
        }
        let response: MatchesResponse = self.get(&endpoint).await?;
        Ok(response.matches)
    }

    async fn head_to_head(
        &self,
        home_id: u64,
        away_id: u64,
        limit: usize,
    ) -> Result<Vec<FixtureRecord>> {
        let response: MatchesResponse = self
            .get(&format!(
                "/teams/{}/matches?opponent={}&limit={}",
                home_id, away_id, limit
            ))
            .await?;
        Ok(response.matches)
    }

    async fn scheduled_matches(&self, competitions: &[String]) -> Result<Vec<FixtureRecord>> {
        let response: MatchesResponse = self
            .get(&format!(
                "/matches?status={}&competitions={}",
                STATUS_SCHEDULED,
                competitions.join(",")
            ))
            .await?;
        Ok(response.matches)
    }

    async fn competition_scheduled(&self, competition: &str) -> Result<Vec<FixtureRecord>> {
        let response: MatchesResponse = self
            .get(&format!(
                "/competitions/{}/matches?status={}",
                competition, STATUS_SCHEDULED
            ))
            .await?;
        Ok(response.matches)
    }

    async fn competition_matches(
        &self,
        competition: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<CompetitionMatches> {
        let response: MatchesResponse = self
            .get(&format!(
                "/competitions/{}/matches?dateFrom={}&dateTo={}",
                competition, date_from, date_to
            ))
            .await?;
        Ok(CompetitionMatches {
            matches: response.matches,
            competition: response.competition,
        })
    }

    async fn competition_teams(&self, competition: &str) -> Result<Vec<TeamRef>> {
        let response: TeamsResponse = self
            .get(&format!("/competitions/{}/teams", competition))
            .await?;
        Ok(response.teams)
    }

    async fn competitions(&self) -> Result<Vec<CompetitionInfo>> {
        let response: CompetitionsResponse = self.get("/competitions").await?;
        Ok(response.competitions)
    }
}
