pub mod football_data;

pub use football_data::FootballDataClient;

use crate::error::Result;
use crate::types::{CompetitionInfo, CompetitionMatches, FixtureRecord, StandingRow, TeamRef};
use async_trait::async_trait;

/// Upstream football statistics provider.
#[async_trait]
pub trait FootballDataSource: Send + Sync {
    /// Overall league table of a competition.
    async fn standings(&self, competition: &str) -> Result<Vec<StandingRow>>;

    /// Most recent matches of a team, optionally filtered by status.
    async fn recent_matches(
        &self,
        team_id: u64,
        limit: usize,
        status: Option<&str>,
    ) -> Result<Vec<FixtureRecord>>;

    /// Meetings between two teams, from `home_id`'s fixture list.
    async fn head_to_head(&self, home_id: u64, away_id: u64, limit: usize)
        -> Result<Vec<FixtureRecord>>;

    /// Scheduled fixtures across several competitions in one call.
    async fn scheduled_matches(&self, competitions: &[String]) -> Result<Vec<FixtureRecord>>;

    /// Scheduled fixtures of one competition.
    async fn competition_scheduled(&self, competition: &str) -> Result<Vec<FixtureRecord>>;

    /// Fixtures of one competition between two dates (inclusive, `YYYY-MM-DD`).
    async fn competition_matches(
        &self,
        competition: &str,
        date_from: &str,
        date_to: &str,
    ) -> Result<CompetitionMatches>;

    async fn competition_teams(&self, competition: &str) -> Result<Vec<TeamRef>>;

    async fn competitions(&self) -> Result<Vec<CompetitionInfo>>;
}
