use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};

/// Maximum meetings considered for a head-to-head record.
pub const HEAD_TO_HEAD_LIMIT: usize = 10;

/// Label used as `winner` when the pick is not a team.
pub const DRAW_LABEL: &str = "Draw";

/// Raw per-team signals for league (aggregate) mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSignals {
    /// League strength, 0-100.
    pub strength: f64,
    /// Recent form, 0-100.
    pub form: f64,
    /// Average goals scored per match.
    pub goals_for: f64,
    /// Average goals conceded per match.
    pub goals_against: f64,
}

impl TeamSignals {
    pub const DEFAULT_STRENGTH: f64 = 50.0;
    pub const DEFAULT_FORM: f64 = 50.0;
    pub const DEFAULT_GOAL_RATE: f64 = 1.5;

    /// Signals used when nothing could be collected.
    pub fn neutral() -> Self {
        Self {
            strength: Self::DEFAULT_STRENGTH,
            form: Self::DEFAULT_FORM,
            goals_for: Self::DEFAULT_GOAL_RATE,
            goals_against: Self::DEFAULT_GOAL_RATE,
        }
    }

    pub fn validate(&self, side: &str) -> Result<()> {
        check_percent(self.strength, side, "strength")?;
        check_percent(self.form, side, "form")?;
        check_non_negative(self.goals_for, side, "goalsFor")?;
        check_non_negative(self.goals_against, side, "goalsAgainst")?;
        Ok(())
    }
}

/// Head-to-head results oriented to the current fixture's home team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHeadRecord {
    pub home_wins: u32,
    pub draws: u32,
    pub away_wins: u32,
}

impl HeadToHeadRecord {
    pub fn total(&self) -> u32 {
        self.home_wins + self.draws + self.away_wins
    }

    pub fn validate(&self) -> Result<()> {
        if self.total() as usize > HEAD_TO_HEAD_LIMIT {
            return Err(AppError::validation(format!(
                "head-to-head record covers {} meetings, at most {} allowed",
                self.total(),
                HEAD_TO_HEAD_LIMIT
            )));
        }
        Ok(())
    }
}

/// Caller-supplied numbers for direct-stats mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectStats {
    /// Goals-per-match style attacking rating.
    pub attack_strength: f64,
    /// Goals-per-match style defensive rating (goals conceded).
    pub defense_strength: f64,
    /// Overall strength, 0-100.
    pub strength: f64,
    /// Recent results, most recent first, e.g. "WWDLW". "N/A" when unknown.
    #[serde(default)]
    pub form: String,
}

impl DirectStats {
    pub fn validate(&self, side: &str) -> Result<()> {
        check_non_negative(self.attack_strength, side, "attackStrength")?;
        check_non_negative(self.defense_strength, side, "defenseStrength")?;
        check_percent(self.strength, side, "strength")?;
        if self.form != "N/A" && !self.form.chars().all(|c| matches!(c, 'W' | 'D' | 'L')) {
            return Err(AppError::validation(format!(
                "{side} form must contain only W, D, L (got {:?})",
                self.form
            )));
        }
        Ok(())
    }
}

fn check_percent(value: f64, side: &str, field: &str) -> Result<()> {
    if !value.is_finite() || !(0.0..=100.0).contains(&value) {
        return Err(AppError::validation(format!(
            "{side} {field} must be within [0, 100] (got {value})"
        )));
    }
    Ok(())
}

fn check_non_negative(value: f64, side: &str, field: &str) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(AppError::validation(format!(
            "{side} {field} must be a non-negative number (got {value})"
        )));
    }
    Ok(())
}

/// Identity of the fixture being predicted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchContext {
    pub home_team_id: Option<u64>,
    pub away_team_id: Option<u64>,
    pub competition_id: Option<String>,
    pub home_team_name: String,
    pub away_team_name: String,
}

impl MatchContext {
    /// Context for a fixture that only has names (direct-stats mode).
    pub fn named(home_team_name: &str, away_team_name: &str) -> Self {
        Self {
            home_team_id: None,
            away_team_id: None,
            competition_id: None,
            home_team_name: home_team_name.to_string(),
            away_team_name: away_team_name.to_string(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.home_team_name.trim().is_empty() || self.away_team_name.trim().is_empty() {
            return Err(AppError::validation("homeTeamName and awayTeamName are required"));
        }
        if self.home_team_id.is_some() && self.home_team_id == self.away_team_id {
            return Err(AppError::validation("home and away team must differ"));
        }
        Ok(())
    }
}

/// Scoring mode that produced a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionMode {
    /// Derived from standings, form, head-to-head and goal rates.
    League,
    /// Derived from caller-supplied attack/defense/strength/form numbers.
    Direct,
}

/// Betting recommendation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecommendationType {
    #[serde(rename = "win")]
    Win,
    #[serde(rename = "win-or-draw")]
    WinOrDraw,
    #[serde(rename = "handicap-2")]
    Handicap2,
    #[serde(rename = "draw-safe")]
    DrawSafe,
    #[serde(rename = "draw")]
    Draw,
}

impl RecommendationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Win => "win",
            Self::WinOrDraw => "win-or-draw",
            Self::Handicap2 => "handicap-2",
            Self::DrawSafe => "draw-safe",
            Self::Draw => "draw",
        }
    }
}

impl std::fmt::Display for RecommendationType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Win/draw/loss probabilities in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeProbabilities {
    pub home_win: f64,
    pub draw: f64,
    pub away_win: f64,
}

impl OutcomeProbabilities {
    pub fn new(home_win: f64, draw: f64, away_win: f64) -> Self {
        Self {
            home_win,
            draw,
            away_win,
        }
    }

    pub fn total(&self) -> f64 {
        self.home_win + self.draw + self.away_win
    }

    /// Rescale so the three values sum to `target`. A zero total falls back to an even split.
    pub fn normalized_to(&self, target: f64) -> Self {
        let total = self.total();
        if total <= 0.0 || !total.is_finite() {
            let third = target / 3.0;
            return Self::new(third, third, third);
        }
        Self::new(
            self.home_win / total * target,
            self.draw / total * target,
            self.away_win / total * target,
        )
    }

    /// Every probability rounded to one decimal place.
    pub fn rounded(&self) -> Self {
        Self::new(
            round_to_tenth(self.home_win),
            round_to_tenth(self.draw),
            round_to_tenth(self.away_win),
        )
    }

    /// Highest and second-highest values.
    pub fn top_two(&self) -> (f64, f64) {
        let mut values = [self.home_win, self.draw, self.away_win];
        values.sort_by(|a, b| b.total_cmp(a));
        (values[0], values[1])
    }
}

/// Round to one decimal place, halves away from zero.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Rounded inputs reported alongside a prediction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionFactors {
    pub home_strength: i64,
    pub away_strength: i64,
    pub home_form: i64,
    pub away_form: i64,
}

/// Goal projection from direct-stats mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalExpectation {
    pub expected_goals_home: f64,
    pub expected_goals_away: f64,
    pub safe_goals_home: f64,
    pub safe_goals_away: f64,
    #[serde(rename = "over25Goals")]
    pub over_2_5_goals: bool,
    pub both_teams_to_score: bool,
}

/// Output of one pipeline run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PredictionResult {
    pub recommendation: String,
    pub recommendation_type: RecommendationType,
    pub winner: String,
    pub home_win_prob: f64,
    pub draw_prob: f64,
    pub away_win_prob: f64,
    pub win_chance: f64,
    pub confidence: f64,
    pub factors: PredictionFactors,
    pub mode: PredictionMode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub goals: Option<GoalExpectation>,
}

impl PredictionResult {
    pub fn probabilities(&self) -> OutcomeProbabilities {
        OutcomeProbabilities::new(self.home_win_prob, self.draw_prob, self.away_win_prob)
    }

    /// Ranking score used by the curated picks gate.
    pub fn quality_score(&self) -> f64 {
        self.win_chance * self.confidence / 100.0
    }
}
