use super::collector::{CollectedSignals, StatisticsCollector};
use super::engine::ScoringEngine;
use super::normalizer::form_strength;
use super::recommendation::{direct_confidence, league_confidence, select_direct, select_league, Pick};
use crate::error::Result;
use crate::types::{
    round_to_tenth, DirectStats, HeadToHeadRecord, MatchContext, OutcomeProbabilities,
    PredictionFactors, PredictionMode, PredictionResult, TeamSignals,
};
use tracing::debug;

/// Runs collection, scoring and selection for one fixture.
pub struct MatchPredictor {
    engine: ScoringEngine,
}

impl MatchPredictor {
    pub fn new(engine: ScoringEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ScoringEngine {
        &self.engine
    }

    /// Collect signals for `context` and predict.
    pub async fn predict_match(
        &self,
        context: &MatchContext,
        collector: &dyn StatisticsCollector,
    ) -> Result<PredictionResult> {
        context.validate()?;
        let signals = collector.collect(context).await?;
        debug!(
            "Collected {} signals for {} vs {}",
            collector.name(),
            context.home_team_name,
            context.away_team_name
        );
        self.predict(context, &signals)
    }

    /// Score already collected signals. Deterministic for a deterministic variance source.
    pub fn predict(&self, context: &MatchContext, signals: &CollectedSignals) -> Result<PredictionResult> {
        context.validate()?;
        signals.validate()?;

        let result = match signals {
            CollectedSignals::League {
                home,
                away,
                head_to_head,
            } => self.predict_league(context, home, away, head_to_head),
            CollectedSignals::Direct { home, away } => self.predict_direct(context, home, away),
        };

        debug!(
            "{} vs {}: {} ({:.1}% / {:.0})",
            context.home_team_name,
            context.away_team_name,
            result.recommendation,
            result.win_chance,
            result.confidence
        );
        Ok(result)
    }

    fn predict_league(
        &self,
        context: &MatchContext,
        home: &TeamSignals,
        away: &TeamSignals,
        head_to_head: &HeadToHeadRecord,
    ) -> PredictionResult {
        let breakdown = self.engine.compute(home, away, head_to_head);
        let probs = self.engine.league_probabilities(&breakdown);
        let pick = select_league(&probs, &context.home_team_name, &context.away_team_name);
        let confidence = league_confidence(&probs).round();

        assemble(
            pick,
            probs,
            confidence,
            PredictionFactors {
                home_strength: home.strength.round() as i64,
                away_strength: away.strength.round() as i64,
                home_form: home.form.round() as i64,
                away_form: away.form.round() as i64,
            },
            PredictionMode::League,
        )
    }

    fn predict_direct(
        &self,
        context: &MatchContext,
        home: &DirectStats,
        away: &DirectStats,
    ) -> PredictionResult {
        let projection = self.engine.direct_projection(home, away);
        let pick = select_direct(
            &projection.probabilities,
            &context.home_team_name,
            &context.away_team_name,
        );
        let confidence = round_to_tenth(direct_confidence(home.strength, away.strength));

        let mut result = assemble(
            pick,
            projection.probabilities,
            confidence,
            PredictionFactors {
                home_strength: home.strength.round() as i64,
                away_strength: away.strength.round() as i64,
                home_form: (form_strength(&home.form) * 100.0).round() as i64,
                away_form: (form_strength(&away.form) * 100.0).round() as i64,
            },
            PredictionMode::Direct,
        );
        result.goals = Some(projection.goals);
        result
    }
}

fn assemble(
    pick: Pick,
    probs: OutcomeProbabilities,
    confidence: f64,
    factors: PredictionFactors,
    mode: PredictionMode,
) -> PredictionResult {
    let rounded = probs.rounded();
    PredictionResult {
        recommendation: pick.recommendation,
        recommendation_type: pick.recommendation_type,
        winner: pick.winner,
        home_win_prob: rounded.home_win,
        draw_prob: rounded.draw,
        away_win_prob: rounded.away_win,
        win_chance: round_to_tenth(pick.win_chance),
        confidence,
        factors,
        mode,
        goals: None,
    }
}
