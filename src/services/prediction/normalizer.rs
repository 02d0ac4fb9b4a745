//! Turns raw standings and match history into comparable 0-100 factors.

use crate::types::{FixtureRecord, HeadToHeadRecord, StandingRow, HEAD_TO_HEAD_LIMIT};
use tracing::debug;

/// Matches considered for form.
pub const FORM_MATCHES: usize = 5;
/// Matches considered for goal rates.
pub const GOAL_MATCHES: usize = 10;

const POSITION_WEIGHT: f64 = 40.0;
const POINTS_WEIGHT: f64 = 30.0;
const GOAL_DIFF_WEIGHT: f64 = 30.0;

/// Average goals per match from one team's perspective.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GoalRates {
    pub goals_for: f64,
    pub goals_against: f64,
}

/// Strength 0-100 from the league table, or `None` if the team is not in it.
///
/// position (0-40) + points per game (0-30) + goal difference relative to the
/// largest absolute goal difference in the table (-30..30), clamped.
pub fn strength_from_standings(table: &[StandingRow], team_id: u64) -> Option<f64> {
    let row = table.iter().find(|row| row.team.id == Some(team_id))?;

    let team_count = table.len() as f64;
    let position_score = (team_count - row.position as f64) / team_count * POSITION_WEIGHT;

    let points_score = if row.played_games > 0 {
        (row.points as f64 / row.played_games as f64) / 3.0 * POINTS_WEIGHT
    } else {
        0.0
    };

    let max_goal_diff = table
        .iter()
        .map(|r| r.goal_difference.unsigned_abs())
        .max()
        .unwrap_or(0)
        .max(1) as f64;
    let goal_diff_score = row.goal_difference as f64 / max_goal_diff * GOAL_DIFF_WEIGHT;

    Some((position_score + points_score + goal_diff_score).clamp(0.0, 100.0))
}

/// Finished matches, most recent first.
fn finished_recent_first(matches: &[FixtureRecord]) -> Vec<&FixtureRecord> {
    let mut finished: Vec<&FixtureRecord> = matches.iter().filter(|m| m.is_finished()).collect();
    // ISO-8601 timestamps order lexicographically; undated records sink.
    finished.sort_by(|a, b| b.utc_date.cmp(&a.utc_date));
    finished
}

/// Form 0-100 over the last five finished matches: 3 per win, 1 per draw, scaled by 15.
/// `None` when there is no finished match.
pub fn form_score(matches: &[FixtureRecord], team_id: u64) -> Option<f64> {
    let recent: Vec<&FixtureRecord> = finished_recent_first(matches)
        .into_iter()
        .filter(|m| m.home_team.id == Some(team_id) || m.away_team.id == Some(team_id))
        .take(FORM_MATCHES)
        .collect();
    if recent.is_empty() {
        return None;
    }

    let points: u32 = recent
        .iter()
        .map(|m| match m.winner_id() {
            Some(winner) if winner == team_id => 3,
            Some(_) => 0,
            None => 1,
        })
        .sum();

    Some(points as f64 / (FORM_MATCHES as f64 * 3.0) * 100.0)
}

/// Head-to-head record oriented to the current fixture.
///
/// A meeting counts for the home side when its winner is the current home team
/// and for the away side when its winner is the current away team, wherever
/// the historical match was played.
pub fn head_to_head(matches: &[FixtureRecord], home_id: u64, away_id: u64) -> HeadToHeadRecord {
    let mut record = HeadToHeadRecord::default();

    for meeting in finished_recent_first(matches)
        .into_iter()
        .filter(|m| m.involves(home_id, away_id))
        .take(HEAD_TO_HEAD_LIMIT)
    {
        match meeting.winner_id() {
            None => record.draws += 1,
            Some(winner) if winner == home_id => record.home_wins += 1,
            Some(winner) if winner == away_id => record.away_wins += 1,
            Some(other) => debug!(
                "Ignoring meeting {} with unexpected winner {}",
                meeting.id, other
            ),
        }
    }

    record
}

/// Average goals scored and conceded over the last ten finished matches.
/// `None` when no finished match has a full-time score.
pub fn goal_rates(matches: &[FixtureRecord], team_id: u64) -> Option<GoalRates> {
    let scored: Vec<(u32, u32)> = finished_recent_first(matches)
        .into_iter()
        .filter_map(|m| m.goals_for_team(team_id))
        .take(GOAL_MATCHES)
        .collect();
    if scored.is_empty() {
        return None;
    }

    let games = scored.len() as f64;
    let (total_for, total_against) = scored
        .iter()
        .fold((0u32, 0u32), |(f, a), (gf, ga)| (f + gf, a + ga));

    Some(GoalRates {
        goals_for: total_for as f64 / games,
        goals_against: total_against as f64 / games,
    })
}

/// Share of meetings won by the home side (0 when there is no history).
pub fn head_to_head_home_share(record: &HeadToHeadRecord) -> f64 {
    share(record.home_wins as f64, record.total() as f64)
}

/// Share of meetings won by the away side (0 when there is no history).
pub fn head_to_head_away_share(record: &HeadToHeadRecord) -> f64 {
    share(record.away_wins as f64, record.total() as f64)
}

/// goals_for / (goals_for + goals_against), 0 when both are zero.
pub fn goal_share(goals_for: f64, goals_against: f64) -> f64 {
    share(goals_for, goals_for + goals_against)
}

fn share(part: f64, whole: f64) -> f64 {
    // Zero denominators divide by one, so an empty record yields part (= 0).
    if whole == 0.0 {
        part
    } else {
        part / whole
    }
}

/// Form string strength: (wins + 0.5 * draws) / length. 0 for empty or "N/A".
pub fn form_strength(form: &str) -> f64 {
    if form.is_empty() || form == "N/A" {
        return 0.0;
    }
    let total = form.chars().count() as f64;
    let points: f64 = form
        .chars()
        .map(|c| match c {
            'W' => 1.0,
            'D' => 0.5,
            _ => 0.0,
        })
        .sum();
    points / total
}
