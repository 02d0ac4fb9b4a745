//! Wire types for the football-data.org v4 API.

use serde::{Deserialize, Serialize};

/// Match status for finished fixtures.
pub const STATUS_FINISHED: &str = "FINISHED";
/// Match status for upcoming fixtures.
pub const STATUS_SCHEDULED: &str = "SCHEDULED";

/// Team reference as embedded in standings and fixtures.
/// Knockout fixtures can carry null ids/names until the draw is made.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TeamRef {
    pub id: Option<u64>,
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub short_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tla: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crest: Option<String>,
}

impl TeamRef {
    pub fn new(id: u64, name: &str) -> Self {
        Self {
            id: Some(id),
            name: Some(name.to_string()),
            ..Default::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("TBD")
    }
}

/// Competition reference embedded in fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRef {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emblem: Option<String>,
}

/// One row of a league table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub position: u32,
    pub team: TeamRef,
    #[serde(default)]
    pub played_games: u32,
    #[serde(default)]
    pub points: u32,
    #[serde(default)]
    pub goal_difference: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsGroup {
    #[serde(default)]
    pub table: Vec<StandingRow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StandingsResponse {
    #[serde(default)]
    pub standings: Vec<StandingsGroup>,
}

impl StandingsResponse {
    /// The overall table (first group).
    pub fn into_table(self) -> Vec<StandingRow> {
        self.standings
            .into_iter()
            .next()
            .map(|group| group.table)
            .unwrap_or_default()
    }
}

/// Full-time goals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GoalPair {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

/// Score block of a fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ScoreLine {
    /// "HOME_TEAM", "AWAY_TEAM", "DRAW" or null.
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub full_time: GoalPair,
}

/// A fixture (scheduled or finished).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FixtureRecord {
    pub id: u64,
    #[serde(default)]
    pub utc_date: Option<String>,
    #[serde(default)]
    pub status: String,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    #[serde(default)]
    pub score: ScoreLine,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competition: Option<CompetitionRef>,
}

impl FixtureRecord {
    pub fn is_finished(&self) -> bool {
        self.status == STATUS_FINISHED
    }

    /// Whether this fixture was played at all between the two ids, either way round.
    pub fn involves(&self, a: u64, b: u64) -> bool {
        let (home, away) = (self.home_team.id, self.away_team.id);
        (home == Some(a) && away == Some(b)) || (home == Some(b) && away == Some(a))
    }

    /// Winner identity: `Some(team_id)` for a decided match, `None` for a draw
    /// or an undecidable record.
    pub fn winner_id(&self) -> Option<u64> {
        match self.score.winner.as_deref() {
            Some("HOME_TEAM") => self.home_team.id,
            Some("AWAY_TEAM") => self.away_team.id,
            Some(_) => None,
            None => match (self.score.full_time.home, self.score.full_time.away) {
                (Some(h), Some(a)) if h > a => self.home_team.id,
                (Some(h), Some(a)) if a > h => self.away_team.id,
                _ => None,
            },
        }
    }

    /// Goals (scored, conceded) from the perspective of `team_id`.
    pub fn goals_for_team(&self, team_id: u64) -> Option<(u32, u32)> {
        let home = self.score.full_time.home?;
        let away = self.score.full_time.away?;
        if self.home_team.id == Some(team_id) {
            Some((home, away))
        } else if self.away_team.id == Some(team_id) {
            Some((away, home))
        } else {
            None
        }
    }

    pub fn competition_code(&self) -> Option<&str> {
        self.competition.as_ref().and_then(|c| c.code.as_deref())
    }

    pub fn competition_name(&self) -> &str {
        self.competition
            .as_ref()
            .and_then(|c| c.name.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchesResponse {
    #[serde(default)]
    pub matches: Vec<FixtureRecord>,
    #[serde(default)]
    pub competition: Option<CompetitionRef>,
}

/// Fixtures of one competition in a date window.
#[derive(Debug, Clone, Serialize)]
pub struct CompetitionMatches {
    pub matches: Vec<FixtureRecord>,
    pub competition: Option<CompetitionRef>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TeamsResponse {
    #[serde(default)]
    pub teams: Vec<TeamRef>,
}

/// Competition listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionInfo {
    pub id: u64,
    #[serde(default)]
    pub code: Option<String>,
    pub name: String,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emblem: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompetitionsResponse {
    #[serde(default)]
    pub competitions: Vec<CompetitionInfo>,
}

/// Entry of the team directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamEntry {
    pub id: u64,
    pub name: String,
    pub competition: String,
    pub crest: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture(winner: Option<&str>, home: Option<u32>, away: Option<u32>) -> FixtureRecord {
        FixtureRecord {
            id: 1,
            utc_date: Some("2024-03-01T15:00:00Z".into()),
            status: STATUS_FINISHED.into(),
            home_team: TeamRef::new(10, "Arsenal"),
            away_team: TeamRef::new(20, "Chelsea"),
            score: ScoreLine {
                winner: winner.map(str::to_string),
                full_time: GoalPair { home, away },
            },
            competition: None,
        }
    }

    #[test]
    fn test_winner_from_score_block() {
        assert_eq!(fixture(Some("HOME_TEAM"), Some(2), Some(0)).winner_id(), Some(10));
        assert_eq!(fixture(Some("AWAY_TEAM"), Some(0), Some(1)).winner_id(), Some(20));
        assert_eq!(fixture(Some("DRAW"), Some(1), Some(1)).winner_id(), None);
    }

    #[test]
    fn test_winner_falls_back_to_goals() {
        assert_eq!(fixture(None, Some(3), Some(1)).winner_id(), Some(10));
        assert_eq!(fixture(None, Some(0), Some(2)).winner_id(), Some(20));
        assert_eq!(fixture(None, None, None).winner_id(), None);
    }

    #[test]
    fn test_goals_for_team_perspective() {
        let f = fixture(Some("HOME_TEAM"), Some(3), Some(1));
        assert_eq!(f.goals_for_team(10), Some((3, 1)));
        assert_eq!(f.goals_for_team(20), Some((1, 3)));
        assert_eq!(f.goals_for_team(99), None);
    }

    #[test]
    fn test_fixture_deserialization() {
        let json = r#"{
            "id": 4411,
            "utcDate": "2024-05-19T15:00:00Z",
            "status": "FINISHED",
            "homeTeam": {"id": 57, "name": "Arsenal FC", "crest": "https://crests/57.png"},
            "awayTeam": {"id": 62, "name": "Everton FC"},
            "score": {"winner": "HOME_TEAM", "fullTime": {"home": 2, "away": 1}},
            "competition": {"id": 2021, "code": "PL", "name": "Premier League"}
        }"#;
        let f: FixtureRecord = serde_json::from_str(json).unwrap();
        assert!(f.is_finished());
        assert_eq!(f.winner_id(), Some(57));
        assert_eq!(f.competition_code(), Some("PL"));
        assert_eq!(f.competition_name(), "Premier League");
        assert!(f.involves(62, 57));
    }

    #[test]
    fn test_null_teams_deserialize() {
        let json = r#"{
            "id": 9,
            "status": "SCHEDULED",
            "homeTeam": {"id": null, "name": null},
            "awayTeam": {"id": null, "name": null}
        }"#;
        let f: FixtureRecord = serde_json::from_str(json).unwrap();
        assert_eq!(f.home_team.display_name(), "TBD");
        assert_eq!(f.winner_id(), None);
    }

    #[test]
    fn test_standings_table_extraction() {
        let json = r#"{"standings": [{"table": [
            {"position": 1, "team": {"id": 1, "name": "A"}, "playedGames": 10, "points": 25, "goalDifference": 14}
        ]}]}"#;
        let response: StandingsResponse = serde_json::from_str(json).unwrap();
        let table = response.into_table();
        assert_eq!(table.len(), 1);
        assert_eq!(table[0].goal_difference, 14);

        let empty: StandingsResponse = serde_json::from_str("{}").unwrap();
        assert!(empty.into_table().is_empty());
    }
}
