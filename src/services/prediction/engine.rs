//! Weighted multi-factor scoring and probability normalization.

use super::normalizer::{form_strength, goal_share, head_to_head_away_share, head_to_head_home_share};
use super::variance::VarianceSource;
use crate::types::{DirectStats, GoalExpectation, HeadToHeadRecord, OutcomeProbabilities, TeamSignals};
use std::sync::Arc;

/// Factor weights for league mode. Sum to 1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub strength: f64,
    pub form: f64,
    pub head_to_head: f64,
    pub goal_ability: f64,
    pub home_advantage: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            strength: 0.35,
            form: 0.25,
            head_to_head: 0.15,
            goal_ability: 0.15,
            home_advantage: 0.10,
        }
    }
}

/// Venue bias for league mode: the base each side feeds through the
/// home-advantage weight.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HomeAdvantageBias {
    pub home_base: f64,
    pub away_base: f64,
}

impl Default for HomeAdvantageBias {
    fn default() -> Self {
        Self {
            home_base: 55.0,
            away_base: 45.0,
        }
    }
}

/// Tunables for direct-stats mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectParams {
    /// Added to the home win probability and, doubled, to home expected goals.
    pub home_advantage: f64,
    /// Amplitude of the random jitter on win probabilities (fraction).
    pub jitter: f64,
}

impl Default for DirectParams {
    fn default() -> Self {
        Self {
            home_advantage: 0.05,
            jitter: 0.015,
        }
    }
}

/// Composite scores and the similarity-derived draw probability, before variance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub home_score: f64,
    pub away_score: f64,
    pub draw_prob: f64,
}

/// Direct-stats output: probabilities in percent plus the goal projection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectProjection {
    pub probabilities: OutcomeProbabilities,
    pub goals: GoalExpectation,
}

/// Draw probability (percent) from how close two composite scores are.
pub fn draw_probability(score_diff: f64) -> f64 {
    match score_diff.abs() {
        d if d < 5.0 => 35.0,
        d if d < 15.0 => 25.0,
        d if d < 25.0 => 15.0,
        _ => 8.0,
    }
}

const LEAGUE_VARIANCE: f64 = 2.0;
const EVEN_BASELINE: f64 = 1.0 / 3.0;
const STRENGTH_SWING: f64 = 0.35;
const FORM_SWING: f64 = 0.12;
const DRAW_DECAY: f64 = 0.08;
const SAFETY_MARGIN: f64 = 0.5;
const MIN_EXPECTED_GOALS: f64 = 0.2;

pub struct ScoringEngine {
    weights: ScoreWeights,
    bias: HomeAdvantageBias,
    direct: DirectParams,
    variance: Arc<dyn VarianceSource>,
}

impl ScoringEngine {
    pub fn new(variance: Arc<dyn VarianceSource>) -> Self {
        Self {
            weights: ScoreWeights::default(),
            bias: HomeAdvantageBias::default(),
            direct: DirectParams::default(),
            variance,
        }
    }

    pub fn with_home_advantage(mut self, home_advantage: f64) -> Self {
        self.direct.home_advantage = home_advantage;
        self
    }

    pub fn with_bias(mut self, bias: HomeAdvantageBias) -> Self {
        self.bias = bias;
        self
    }

    pub fn weights(&self) -> &ScoreWeights {
        &self.weights
    }

    pub fn direct_params(&self) -> &DirectParams {
        &self.direct
    }

    /// League-mode composite scores for both sides and the draw probability.
    pub fn compute(
        &self,
        home: &TeamSignals,
        away: &TeamSignals,
        h2h: &HeadToHeadRecord,
    ) -> ScoreBreakdown {
        let w = &self.weights;

        let home_score = home.strength * w.strength
            + home.form * w.form
            + head_to_head_home_share(h2h) * 100.0 * w.head_to_head
            + goal_share(home.goals_for, home.goals_against) * 100.0 * w.goal_ability
            + self.bias.home_base * w.home_advantage;

        let away_score = away.strength * w.strength
            + away.form * w.form
            + head_to_head_away_share(h2h) * 100.0 * w.head_to_head
            + goal_share(away.goals_for, away.goals_against) * 100.0 * w.goal_ability
            + self.bias.away_base * w.home_advantage;

        ScoreBreakdown {
            home_score,
            away_score,
            draw_prob: draw_probability(home_score - away_score),
        }
    }

    /// Outcome probabilities (percent, summing to 100) from a league breakdown.
    pub fn league_probabilities(&self, breakdown: &ScoreBreakdown) -> OutcomeProbabilities {
        let total = breakdown.home_score + breakdown.away_score;
        let (mut home, mut away) = if total > 0.0 {
            (
                breakdown.home_score / total * 100.0,
                breakdown.away_score / total * 100.0,
            )
        } else {
            (50.0, 50.0)
        };

        let draw = breakdown.draw_prob;
        let share = (100.0 - draw) / 100.0;
        home *= share;
        away *= share;

        let variance = self.variance.sample(LEAGUE_VARIANCE);
        home = (home + variance).clamp(0.0, 100.0);
        away = (away - variance).clamp(0.0, 100.0);

        OutcomeProbabilities::new(home, draw, away).normalized_to(100.0)
    }

    /// Direct-stats probabilities (percent, summing to 100) and goal projection.
    pub fn direct_projection(&self, home: &DirectStats, away: &DirectStats) -> DirectProjection {
        let home_advantage = self.direct.home_advantage;
        let home_form = form_strength(&home.form);
        let away_form = form_strength(&away.form);

        let expected_home = (home.attack_strength - away.defense_strength
            + 1.0
            + home_form * 0.3
            + home_advantage * 2.0)
            .max(MIN_EXPECTED_GOALS);
        let expected_away = (away.attack_strength - home.defense_strength + 0.9 + away_form * 0.3)
            .max(MIN_EXPECTED_GOALS);

        let safe_home = (expected_home - SAFETY_MARGIN).max(0.0);
        let safe_away = (expected_away - SAFETY_MARGIN).max(0.0);

        // Strengths arrive on a 0-100 scale; the swings are defined per unit.
        let strength_diff = (home.strength - away.strength) / 100.0;
        let form_diff = home_form - away_form;

        let mut home_win =
            EVEN_BASELINE + strength_diff * STRENGTH_SWING + form_diff * FORM_SWING + home_advantage;
        let mut away_win = EVEN_BASELINE - strength_diff * STRENGTH_SWING - form_diff * FORM_SWING;
        let draw = EVEN_BASELINE - strength_diff.abs() * DRAW_DECAY;

        let jitter = self.variance.sample(self.direct.jitter);
        home_win += jitter;
        away_win -= jitter * 0.5;

        let probabilities =
            OutcomeProbabilities::new(home_win.max(0.0), draw.max(0.0), away_win.max(0.0))
                .normalized_to(100.0);

        DirectProjection {
            probabilities,
            goals: GoalExpectation {
                expected_goals_home: expected_home,
                expected_goals_away: expected_away,
                safe_goals_home: safe_home,
                safe_goals_away: safe_away,
                over_2_5_goals: safe_home + safe_away >= 3.0,
                both_teams_to_score: safe_home >= 1.0 && safe_away >= 1.0,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::prediction::variance::{NoVariance, SeededVariance};

    fn engine() -> ScoringEngine {
        ScoringEngine::new(Arc::new(NoVariance))
    }

    fn signals(strength: f64, form: f64, gf: f64, ga: f64) -> TeamSignals {
        TeamSignals {
            strength,
            form,
            goals_for: gf,
            goals_against: ga,
        }
    }

    fn direct(strength: f64, form: &str) -> DirectStats {
        DirectStats {
            attack_strength: 1.5,
            defense_strength: 1.0,
            strength,
            form: form.to_string(),
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        let w = ScoreWeights::default();
        let sum = w.strength + w.form + w.head_to_head + w.goal_ability + w.home_advantage;
        assert!((sum - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_draw_buckets() {
        assert_eq!(draw_probability(0.0), 35.0);
        assert_eq!(draw_probability(-4.9), 35.0);
        assert_eq!(draw_probability(5.0), 25.0);
        assert_eq!(draw_probability(14.9), 25.0);
        assert_eq!(draw_probability(20.0), 15.0);
        assert_eq!(draw_probability(25.0), 8.0);
        assert_eq!(draw_probability(-60.0), 8.0);
    }

    #[test]
    fn test_compute_composite_scores() {
        let h2h = HeadToHeadRecord {
            home_wins: 2,
            draws: 1,
            away_wins: 1,
        };
        let breakdown = engine().compute(
            &signals(80.0, 60.0, 2.0, 1.0),
            &signals(40.0, 40.0, 1.0, 1.0),
            &h2h,
        );
        // 28 + 15 + 50*0.15 + 66.67*0.15 + 5.5
        let expected_home = 28.0 + 15.0 + 7.5 + 2.0 / 3.0 * 100.0 * 0.15 + 5.5;
        // 14 + 10 + 25*0.15 + 50*0.15 + 4.5
        let expected_away = 14.0 + 10.0 + 3.75 + 7.5 + 4.5;
        assert!((breakdown.home_score - expected_home).abs() < 1e-9);
        assert!((breakdown.away_score - expected_away).abs() < 1e-9);
        assert_eq!(breakdown.draw_prob, 15.0);
    }

    #[test]
    fn test_missing_head_to_head_contributes_nothing() {
        let home = signals(50.0, 50.0, 1.5, 1.5);
        let breakdown = engine().compute(&home, &home, &HeadToHeadRecord::default());
        // 17.5 + 12.5 + 0 + 7.5 + base
        assert!((breakdown.home_score - 43.0).abs() < 1e-9);
        assert!((breakdown.away_score - 42.0).abs() < 1e-9);
        assert_eq!(breakdown.draw_prob, 35.0);
    }

    #[test]
    fn test_scores_sixty_forty_give_fifteen_percent_draw() {
        let breakdown = ScoreBreakdown {
            home_score: 60.0,
            away_score: 40.0,
            draw_prob: draw_probability(60.0 - 40.0),
        };
        assert_eq!(breakdown.draw_prob, 15.0);

        let probs = engine().league_probabilities(&breakdown);
        // 60% and 40% of the remaining 85
        assert!((probs.home_win - 51.0).abs() < 1e-9);
        assert!((probs.away_win - 34.0).abs() < 1e-9);
        assert!((probs.draw - 15.0).abs() < 1e-9);
    }

    #[test]
    fn test_league_probabilities_sum_with_variance() {
        let engine = ScoringEngine::new(Arc::new(SeededVariance::new(3)));
        let breakdown = ScoreBreakdown {
            home_score: 70.0,
            away_score: 5.0,
            draw_prob: 8.0,
        };
        for _ in 0..200 {
            let probs = engine.league_probabilities(&breakdown);
            assert!((probs.total() - 100.0).abs() < 1e-9);
            assert!(probs.home_win >= 0.0 && probs.away_win >= 0.0 && probs.draw >= 0.0);
        }
    }

    #[test]
    fn test_direct_equal_teams_favour_home() {
        let projection = engine().direct_projection(&direct(70.0, "WDWDL"), &direct(70.0, "WDWDL"));
        let p = projection.probabilities;
        assert!(p.home_win > p.away_win);
        assert!((p.draw - p.away_win).abs() < 1e-9);
        assert!((p.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_form_swing() {
        let projection = engine().direct_projection(&direct(70.0, "WWWWW"), &direct(70.0, "LLLLL"));
        let p = projection.probabilities;
        // (1/3 + 0.12 + 0.05) / 1.05
        assert!((p.home_win - (EVEN_BASELINE + 0.17) / 1.05 * 100.0).abs() < 1e-9);
        assert!(p.home_win > p.away_win);
    }

    #[test]
    fn test_direct_extreme_strength_gap_stays_non_negative() {
        let projection = engine().direct_projection(&direct(100.0, "WWWWW"), &direct(0.0, "LLLLL"));
        let p = projection.probabilities;
        assert_eq!(p.away_win, 0.0);
        assert!(p.draw >= 0.0);
        assert!((p.total() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_goal_projection() {
        let home = DirectStats {
            attack_strength: 2.5,
            defense_strength: 0.8,
            strength: 80.0,
            form: "WWWWW".into(),
        };
        let away = DirectStats {
            attack_strength: 2.0,
            defense_strength: 0.5,
            strength: 60.0,
            form: "N/A".into(),
        };
        let goals = engine().direct_projection(&home, &away).goals;
        // 2.5 - 0.5 + 1.0 + 0.3 + 0.1
        assert!((goals.expected_goals_home - 3.4).abs() < 1e-9);
        // 2.0 - 0.8 + 0.9 + 0
        assert!((goals.expected_goals_away - 2.1).abs() < 1e-9);
        assert!((goals.safe_goals_home - 2.9).abs() < 1e-9);
        assert!((goals.safe_goals_away - 1.6).abs() < 1e-9);
        assert!(goals.both_teams_to_score);
        assert!(goals.over_2_5_goals);
    }

    #[test]
    fn test_direct_expected_goals_floor() {
        let weak = DirectStats {
            attack_strength: 0.0,
            defense_strength: 3.0,
            strength: 10.0,
            form: String::new(),
        };
        let goals = engine().direct_projection(&weak, &weak).goals;
        assert_eq!(goals.expected_goals_away, MIN_EXPECTED_GOALS);
        assert_eq!(goals.safe_goals_away, 0.0);
        assert!(!goals.both_teams_to_score);
        assert!(!goals.over_2_5_goals);
    }

    #[test]
    fn test_home_advantage_override() {
        let engine = engine().with_home_advantage(0.10);
        assert_eq!(engine.direct_params().home_advantage, 0.10);
        let p = engine
            .direct_projection(&direct(70.0, "WWWWW"), &direct(70.0, "LLLLL"))
            .probabilities;
        assert!(p.home_win >= 49.0);
    }
}
