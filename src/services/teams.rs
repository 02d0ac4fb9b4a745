//! Searchable directory of teams in the target competitions.

use super::cache::Cache;
use super::clock::Clock;
use crate::error::{AppError, Result};
use crate::sources::FootballDataSource;
use crate::types::TeamEntry;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Bump to invalidate every memoized team list.
pub const TEAM_LIST_KEY: &str = "teams-all-competitions:v1";
/// Maximum search results.
pub const SEARCH_LIMIT: usize = 20;

pub struct TeamDirectory {
    source: Arc<dyn FootballDataSource>,
    competitions: Vec<String>,
    cache: Cache<Arc<Vec<TeamEntry>>>,
}

impl TeamDirectory {
    pub fn new(
        source: Arc<dyn FootballDataSource>,
        competitions: Vec<String>,
        ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            source,
            competitions,
            cache: Cache::with_clock(ttl, clock),
        }
    }

    /// All known teams, de-duplicated by id and sorted by name.
    pub async fn all_teams(&self) -> Result<Arc<Vec<TeamEntry>>> {
        if let Some(teams) = self.cache.get(TEAM_LIST_KEY) {
            debug!("Team list served from memory ({} teams)", teams.len());
            return Ok(teams);
        }

        let mut by_id: HashMap<u64, TeamEntry> = HashMap::new();
        let mut failures = 0;
        for competition in &self.competitions {
            match self.source.competition_teams(competition).await {
                Ok(teams) => {
                    for team in teams {
                        let (Some(id), Some(name)) = (team.id, team.name.clone()) else {
                            continue;
                        };
                        by_id.entry(id).or_insert_with(|| TeamEntry {
                            id,
                            name,
                            competition: competition.clone(),
                            crest: team.crest.clone().unwrap_or_default(),
                        });
                    }
                }
                Err(e) => {
                    failures += 1;
                    warn!("Could not fetch teams for {}: {}", competition, e);
                }
            }
        }

        if failures > 0 && failures == self.competitions.len() {
            return Err(AppError::UpstreamUnavailable(
                "no competition returned a team list".to_string(),
            ));
        }

        let mut teams: Vec<TeamEntry> = by_id.into_values().collect();
        teams.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        info!(
            "Loaded {} teams from {} competitions",
            teams.len(),
            self.competitions.len()
        );

        let teams = Arc::new(teams);
        self.cache.set(TEAM_LIST_KEY.to_string(), teams.clone());
        Ok(teams)
    }

    /// Case-insensitive substring search over team names. An empty query lists the first teams.
    pub async fn search(&self, query: &str) -> Result<Vec<TeamEntry>> {
        let needle = query.trim().to_lowercase();
        let teams = self.all_teams().await?;
        Ok(teams
            .iter()
            .filter(|team| needle.is_empty() || team.name.to_lowercase().contains(&needle))
            .take(SEARCH_LIMIT)
            .cloned()
            .collect())
    }

    /// Drop the memoized list.
    pub fn invalidate(&self) {
        self.cache.remove(TEAM_LIST_KEY);
    }
}
