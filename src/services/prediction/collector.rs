//! Signal collection strategies: live standings/match history, or caller-supplied numbers.

use super::normalizer::{
    form_score, goal_rates, head_to_head, strength_from_standings, FORM_MATCHES, GOAL_MATCHES,
};
use crate::error::{AppError, Result};
use crate::sources::FootballDataSource;
use crate::types::{
    DirectStats, FixtureRecord, HeadToHeadRecord, MatchContext, StandingRow, TeamSignals,
    HEAD_TO_HEAD_LIMIT, STATUS_FINISHED,
};
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{timeout_at, Instant};
use tracing::{debug, warn};

/// Inputs ready for scoring.
#[derive(Debug, Clone, PartialEq)]
pub enum CollectedSignals {
    League {
        home: TeamSignals,
        away: TeamSignals,
        head_to_head: HeadToHeadRecord,
    },
    Direct {
        home: DirectStats,
        away: DirectStats,
    },
}

impl CollectedSignals {
    pub fn validate(&self) -> Result<()> {
        match self {
            Self::League {
                home,
                away,
                head_to_head,
            } => {
                home.validate("home")?;
                away.validate("away")?;
                head_to_head.validate()
            }
            Self::Direct { home, away } => {
                home.validate("home")?;
                away.validate("away")
            }
        }
    }
}

/// Gathers the raw signals for one fixture.
#[async_trait]
pub trait StatisticsCollector: Send + Sync {
    fn name(&self) -> &'static str;

    async fn collect(&self, context: &MatchContext) -> Result<CollectedSignals>;
}

/// Live collector backed by league standings and match history.
///
/// Every signal is fetched concurrently under one deadline. A failed or timed
/// out fetch falls back to that signal's neutral default.
pub struct StandingsCollector {
    source: Arc<dyn FootballDataSource>,
    timeout: Duration,
}

impl StandingsCollector {
    pub fn new(source: Arc<dyn FootballDataSource>, timeout: Duration) -> Self {
        Self { source, timeout }
    }
}

async fn within<T, F>(deadline: Instant, signal: &'static str, fetch: F) -> Option<T>
where
    F: Future<Output = Result<T>>,
{
    let reason = match timeout_at(deadline, fetch).await {
        Ok(Ok(value)) => return Some(value),
        Ok(Err(e)) => e.to_string(),
        Err(_) => "deadline exceeded".to_string(),
    };
    let failure = AppError::Collector { signal, reason };
    warn!("{}; using default", failure);
    None
}

#[async_trait]
impl StatisticsCollector for StandingsCollector {
    fn name(&self) -> &'static str {
        "standings"
    }

    async fn collect(&self, context: &MatchContext) -> Result<CollectedSignals> {
        let (home_id, away_id) = match (context.home_team_id, context.away_team_id) {
            (Some(home), Some(away)) => (home, away),
            _ => {
                return Err(AppError::validation(
                    "homeTeamId and awayTeamId are required for live predictions",
                ))
            }
        };
        let competition = context
            .competition_id
            .as_deref()
            .filter(|c| !c.trim().is_empty())
            .ok_or_else(|| AppError::validation("competitionId is required for live predictions"))?;

        let deadline = Instant::now() + self.timeout;
        let source = &self.source;

        let (table, home_recent, away_recent, meetings, home_history, away_history) = tokio::join!(
            within(deadline, "strength", source.standings(competition)),
            within(
                deadline,
                "home form",
                source.recent_matches(home_id, FORM_MATCHES, Some(STATUS_FINISHED))
            ),
            within(
                deadline,
                "away form",
                source.recent_matches(away_id, FORM_MATCHES, Some(STATUS_FINISHED))
            ),
            within(
                deadline,
                "head-to-head",
                source.head_to_head(home_id, away_id, HEAD_TO_HEAD_LIMIT)
            ),
            within(
                deadline,
                "home goals",
                source.recent_matches(home_id, GOAL_MATCHES, Some(STATUS_FINISHED))
            ),
            within(
                deadline,
                "away goals",
                source.recent_matches(away_id, GOAL_MATCHES, Some(STATUS_FINISHED))
            ),
        );

        let table: Vec<StandingRow> = table.unwrap_or_default();
        let strength = |id: u64| {
            strength_from_standings(&table, id).unwrap_or_else(|| {
                debug!("Team {} not in {} standings", id, competition);
                TeamSignals::DEFAULT_STRENGTH
            })
        };

        let form = |matches: Option<Vec<FixtureRecord>>, id: u64| {
            matches
                .and_then(|m| form_score(&m, id))
                .unwrap_or(TeamSignals::DEFAULT_FORM)
        };

        let goals = |matches: Option<Vec<FixtureRecord>>, id: u64| {
            matches
                .and_then(|m| goal_rates(&m, id))
                .map(|r| (r.goals_for, r.goals_against))
                .unwrap_or((TeamSignals::DEFAULT_GOAL_RATE, TeamSignals::DEFAULT_GOAL_RATE))
        };

        let (home_for, home_against) = goals(home_history, home_id);
        let (away_for, away_against) = goals(away_history, away_id);

        Ok(CollectedSignals::League {
            home: TeamSignals {
                strength: strength(home_id),
                form: form(home_recent, home_id),
                goals_for: home_for,
                goals_against: home_against,
            },
            away: TeamSignals {
                strength: strength(away_id),
                form: form(away_recent, away_id),
                goals_for: away_for,
                goals_against: away_against,
            },
            head_to_head: meetings
                .map(|m| head_to_head(&m, home_id, away_id))
                .unwrap_or_default(),
        })
    }
}

/// Collector over numbers supplied by the caller.
#[derive(Debug, Clone)]
pub struct SuppliedCollector {
    signals: CollectedSignals,
}

impl SuppliedCollector {
    pub fn direct(home: DirectStats, away: DirectStats) -> Result<Self> {
        Self::new(CollectedSignals::Direct { home, away })
    }

    pub fn league(home: TeamSignals, away: TeamSignals, head_to_head: HeadToHeadRecord) -> Result<Self> {
        Self::new(CollectedSignals::League {
            home,
            away,
            head_to_head,
        })
    }

    fn new(signals: CollectedSignals) -> Result<Self> {
        signals.validate()?;
        Ok(Self { signals })
    }
}

#[async_trait]
impl StatisticsCollector for SuppliedCollector {
    fn name(&self) -> &'static str {
        "supplied"
    }

    async fn collect(&self, _context: &MatchContext) -> Result<CollectedSignals> {
        Ok(self.signals.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CompetitionInfo, CompetitionMatches, GoalPair, ScoreLine, TeamRef};

    /// Source whose standings succeed and everything else fails or hangs.
    struct PartialSource {
        hang: bool,
    }

    #[async_trait]
    impl FootballDataSource for PartialSource {
        async fn standings(&self, _competition: &str) -> Result<Vec<StandingRow>> {
            Ok(vec![
                StandingRow {
                    position: 1,
                    team: TeamRef::new(1, "Leaders"),
                    played_games: 10,
                    points: 30,
                    goal_difference: 20,
                },
                StandingRow {
                    position: 2,
                    team: TeamRef::new(2, "Chasers"),
                    played_games: 10,
                    points: 15,
                    goal_difference: -20,
                },
            ])
        }

        async fn recent_matches(
            &self,
            _team_id: u64,
            _limit: usize,
            _status: Option<&str>,
        ) -> Result<Vec<FixtureRecord>> {
            if self.hang {
                tokio::time::sleep(Duration::from_secs(60)).await;
            }
            Err(AppError::UpstreamUnavailable("429 Too Many Requests".into()))
        }

        async fn head_to_head(
            &self,
            home_id: u64,
            away_id: u64,
            _limit: usize,
        ) -> Result<Vec<FixtureRecord>> {
            Ok(vec![FixtureRecord {
                id: 5,
                utc_date: Some("2024-01-01T15:00:00Z".into()),
                status: STATUS_FINISHED.into(),
                home_team: TeamRef::new(away_id, "Chasers"),
                away_team: TeamRef::new(home_id, "Leaders"),
                score: ScoreLine {
                    winner: None,
                    full_time: GoalPair {
                        home: Some(0),
                        away: Some(2),
                    },
                },
                competition: None,
            }])
        }

        async fn scheduled_matches(&self, _competitions: &[String]) -> Result<Vec<FixtureRecord>> {
            Ok(Vec::new())
        }

        async fn competition_scheduled(&self, _competition: &str) -> Result<Vec<FixtureRecord>> {
            Ok(Vec::new())
        }

        async fn competition_matches(
            &self,
            competition: &str,
            _date_from: &str,
            _date_to: &str,
        ) -> Result<CompetitionMatches> {
            Err(AppError::NotFound(competition.to_string()))
        }

        async fn competition_teams(&self, _competition: &str) -> Result<Vec<TeamRef>> {
            Ok(Vec::new())
        }

        async fn competitions(&self) -> Result<Vec<CompetitionInfo>> {
            Ok(Vec::new())
        }
    }

    fn context() -> MatchContext {
        MatchContext {
            home_team_id: Some(1),
            away_team_id: Some(2),
            competition_id: Some("PL".into()),
            home_team_name: "Leaders".into(),
            away_team_name: "Chasers".into(),
        }
    }

    #[tokio::test]
    async fn test_failed_signals_fall_back_to_defaults() {
        let collector =
            StandingsCollector::new(Arc::new(PartialSource { hang: false }), Duration::from_secs(5));
        let signals = collector.collect(&context()).await.unwrap();

        match signals {
            CollectedSignals::League {
                home,
                away,
                head_to_head,
            } => {
                assert!(home.strength > away.strength);
                assert_eq!(home.form, TeamSignals::DEFAULT_FORM);
                assert_eq!(away.goals_for, TeamSignals::DEFAULT_GOAL_RATE);
                assert_eq!(head_to_head.home_wins, 1);
                assert_eq!(head_to_head.total(), 1);
            }
            other => panic!("unexpected signals {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_deadline_defaults_slow_signals() {
        let collector =
            StandingsCollector::new(Arc::new(PartialSource { hang: true }), Duration::from_millis(50));
        let signals = collector.collect(&context()).await.unwrap();
        match signals {
            CollectedSignals::League { home, away, .. } => {
                assert_eq!(home.form, TeamSignals::DEFAULT_FORM);
                assert_eq!(away.form, TeamSignals::DEFAULT_FORM);
                assert_eq!(home.goals_against, TeamSignals::DEFAULT_GOAL_RATE);
            }
            other => panic!("unexpected signals {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_live_collection_requires_ids_and_competition() {
        let collector =
            StandingsCollector::new(Arc::new(PartialSource { hang: false }), Duration::from_secs(1));

        let mut ctx = context();
        ctx.away_team_id = None;
        assert!(matches!(
            collector.collect(&ctx).await,
            Err(AppError::Validation(_))
        ));

        let mut ctx = context();
        ctx.competition_id = None;
        assert!(matches!(
            collector.collect(&ctx).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_supplied_collector_validates_up_front() {
        let mut bad = TeamSignals::neutral();
        bad.strength = 140.0;
        assert!(SuppliedCollector::league(bad, TeamSignals::neutral(), HeadToHeadRecord::default())
            .is_err());

        let collector = SuppliedCollector::league(
            TeamSignals::neutral(),
            TeamSignals::neutral(),
            HeadToHeadRecord::default(),
        )
        .unwrap();
        let signals = collector.collect(&context()).await.unwrap();
        assert!(matches!(signals, CollectedSignals::League { .. }));
        assert_eq!(collector.name(), "supplied");
    }
}
