//! Shared fixtures for integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use goalcast::config::Config;
use goalcast::error::{AppError, Result};
use goalcast::services::{ManualClock, MemoryStore, NoVariance};
use goalcast::sources::FootballDataSource;
use goalcast::types::{
    CompetitionInfo, CompetitionMatches, CompetitionRef, FixtureRecord, GoalPair, ScoreLine,
    StandingRow, TeamRef, STATUS_FINISHED, STATUS_SCHEDULED,
};
use goalcast::AppState;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub const LEADERS: u64 = 1;
pub const STRUGGLERS: u64 = 2;
pub const CHASERS: u64 = 3;
pub const MIDTABLE: u64 = 4;
const OUTSIDER: u64 = 9;

pub fn team_name(id: u64) -> &'static str {
    match id {
        LEADERS => "Leaders FC",
        STRUGGLERS => "Strugglers United",
        CHASERS => "Chasers City",
        MIDTABLE => "Midtable Town",
        _ => "Outsiders",
    }
}

fn premier_league() -> CompetitionRef {
    CompetitionRef {
        id: Some(2021),
        code: Some("PL".into()),
        name: Some("Premier League".into()),
        emblem: None,
    }
}

pub fn finished(id: u64, day: u32, home: u64, away: u64, hg: u32, ag: u32) -> FixtureRecord {
    FixtureRecord {
        id,
        utc_date: Some(format!("2024-09-{:02}T15:00:00Z", day)),
        status: STATUS_FINISHED.into(),
        home_team: TeamRef::new(home, team_name(home)),
        away_team: TeamRef::new(away, team_name(away)),
        score: ScoreLine {
            winner: None,
            full_time: GoalPair {
                home: Some(hg),
                away: Some(ag),
            },
        },
        competition: Some(premier_league()),
    }
}

pub fn scheduled(id: u64, home: u64, away: u64) -> FixtureRecord {
    FixtureRecord {
        id,
        utc_date: Some("2024-10-05T14:00:00Z".into()),
        status: STATUS_SCHEDULED.into(),
        home_team: TeamRef::new(home, team_name(home)),
        away_team: TeamRef::new(away, team_name(away)),
        score: ScoreLine::default(),
        competition: Some(premier_league()),
    }
}

/// A fixture whose teams are not decided yet.
pub fn undecided(id: u64) -> FixtureRecord {
    FixtureRecord {
        home_team: TeamRef::default(),
        away_team: TeamRef::default(),
        ..scheduled(id, 0, 0)
    }
}

/// In-memory football data with call counters.
pub struct FakeSource {
    pub standings: Vec<StandingRow>,
    pub history: HashMap<u64, Vec<FixtureRecord>>,
    pub scheduled: Vec<FixtureRecord>,
    pub fail_scheduled: bool,
    pub scheduled_calls: AtomicUsize,
    pub standings_calls: AtomicUsize,
}

impl FakeSource {
    /// Four-team league: one dominant side, one hopeless side, two without history.
    pub fn league() -> Self {
        let row = |id: u64, position: u32, points: u32, gd: i32| StandingRow {
            position,
            team: TeamRef::new(id, team_name(id)),
            played_games: 10,
            points,
            goal_difference: gd,
        };

        let mut history = HashMap::new();
        history.insert(
            LEADERS,
            (0..10)
                .map(|i| finished(100 + i, 1 + i as u32, LEADERS, OUTSIDER, 3, 0))
                .collect(),
        );
        history.insert(
            STRUGGLERS,
            (0..10)
                .map(|i| finished(200 + i, 1 + i as u32, STRUGGLERS, OUTSIDER, 0, 2))
                .collect(),
        );

        Self {
            standings: vec![
                row(LEADERS, 1, 30, 25),
                row(CHASERS, 2, 18, 5),
                row(MIDTABLE, 3, 9, -5),
                row(STRUGGLERS, 4, 0, -25),
            ],
            history,
            scheduled: vec![
                scheduled(1, CHASERS, MIDTABLE),
                scheduled(2, LEADERS, STRUGGLERS),
                undecided(3),
                scheduled(4, MIDTABLE, CHASERS),
                scheduled(5, STRUGGLERS, LEADERS),
            ],
            fail_scheduled: false,
            scheduled_calls: AtomicUsize::new(0),
            standings_calls: AtomicUsize::new(0),
        }
    }

    pub fn scheduled_calls(&self) -> usize {
        self.scheduled_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FootballDataSource for FakeSource {
    async fn standings(&self, competition: &str) -> Result<Vec<StandingRow>> {
        self.standings_calls.fetch_add(1, Ordering::SeqCst);
        if competition == "PL" {
            Ok(self.standings.clone())
        } else {
            Err(AppError::NotFound(format!("competition {}", competition)))
        }
    }

    async fn recent_matches(
        &self,
        team_id: u64,
        limit: usize,
        _status: Option<&str>,
    ) -> Result<Vec<FixtureRecord>> {
        Ok(self
            .history
            .get(&team_id)
            .map(|m| m.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    async fn head_to_head(
        &self,
        _home_id: u64,
        _away_id: u64,
        _limit: usize,
    ) -> Result<Vec<FixtureRecord>> {
        Ok(Vec::new())
    }

    async fn scheduled_matches(&self, _competitions: &[String]) -> Result<Vec<FixtureRecord>> {
        self.scheduled_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_scheduled {
            return Err(AppError::UpstreamUnavailable("Football API error: 503".into()));
        }
        Ok(self.scheduled.clone())
    }

    async fn competition_scheduled(&self, competition: &str) -> Result<Vec<FixtureRecord>> {
        if competition == "PL" {
            Ok(self.scheduled.clone())
        } else {
            Err(AppError::UpstreamUnavailable("Football API error: 403".into()))
        }
    }

    async fn competition_matches(
        &self,
        competition: &str,
        _date_from: &str,
        _date_to: &str,
    ) -> Result<CompetitionMatches> {
        Ok(CompetitionMatches {
            matches: self.scheduled.clone(),
            competition: Some(CompetitionRef {
                code: Some(competition.to_string()),
                ..premier_league()
            }),
        })
    }

    async fn competition_teams(&self, competition: &str) -> Result<Vec<TeamRef>> {
        if competition != "PL" {
            return Err(AppError::UpstreamUnavailable("Football API error: 403".into()));
        }
        Ok(self.standings.iter().map(|row| row.team.clone()).collect())
    }

    async fn competitions(&self) -> Result<Vec<CompetitionInfo>> {
        Ok(vec![CompetitionInfo {
            id: 2021,
            code: Some("PL".into()),
            name: "Premier League".into(),
            kind: Some("LEAGUE".into()),
            emblem: None,
        }])
    }
}

pub fn clock() -> Arc<ManualClock> {
    Arc::new(ManualClock::new(
        Utc.with_ymd_and_hms(2024, 10, 4, 9, 0, 0).unwrap(),
    ))
}

/// Application state over a fake source, memory store and zero variance.
pub fn state_with(source: Arc<FakeSource>, clock: Arc<ManualClock>) -> AppState {
    let config = Config {
        competitions: vec!["PL".into(), "SA".into()],
        ..Config::default()
    };
    AppState::new(
        config,
        source,
        Arc::new(MemoryStore::new(clock.clone())),
        Arc::new(NoVariance),
        clock,
    )
}
