//! Maps outcome probabilities to a betting recommendation and a confidence score.

use crate::types::{OutcomeProbabilities, RecommendationType, DRAW_LABEL};

/// Direct mode: a side at or above this is a straight win.
pub const WIN_THRESHOLD: f64 = 60.0;
/// Direct mode: a side at or above this is win-or-draw.
pub const WIN_OR_DRAW_THRESHOLD: f64 = 49.0;
/// Direct mode: a home/away gap below this is called a draw.
pub const CLOSE_MATCH_GAP: f64 = 5.0;
/// League mode: a favourite above this is a straight win, otherwise "(Safe)".
pub const STRONG_FAVOURITE: f64 = 55.0;

const LEAGUE_CONFIDENCE_BASE: f64 = 50.0;
const LEAGUE_CONFIDENCE_PER_POINT: f64 = 5.0;
const DIRECT_CONFIDENCE_BASE: f64 = 60.0;
const DIRECT_CONFIDENCE_CAP: f64 = 90.0;

/// A selected recommendation.
#[derive(Debug, Clone, PartialEq)]
pub struct Pick {
    pub recommendation: String,
    pub recommendation_type: RecommendationType,
    /// Team name, or "Draw".
    pub winner: String,
    /// Probability (percent) backing the pick.
    pub win_chance: f64,
}

/// League mode selector.
///
/// A side must strictly beat both other outcomes to be picked; any tie at the
/// top falls through to a draw.
pub fn select_league(probs: &OutcomeProbabilities, home_name: &str, away_name: &str) -> Pick {
    let side = |label: &str, name: &str, chance: f64| {
        if chance > STRONG_FAVOURITE {
            Pick {
                recommendation: format!("{} Win", label),
                recommendation_type: RecommendationType::Win,
                winner: name.to_string(),
                win_chance: chance,
            }
        } else {
            Pick {
                recommendation: format!("{} Win (Safe)", label),
                recommendation_type: RecommendationType::WinOrDraw,
                winner: name.to_string(),
                win_chance: chance,
            }
        }
    };

    if probs.home_win > probs.draw && probs.home_win > probs.away_win {
        side("Home", home_name, probs.home_win)
    } else if probs.away_win > probs.draw && probs.away_win > probs.home_win {
        side("Away", away_name, probs.away_win)
    } else {
        Pick {
            recommendation: DRAW_LABEL.to_string(),
            recommendation_type: RecommendationType::Draw,
            winner: DRAW_LABEL.to_string(),
            win_chance: probs.draw,
        }
    }
}

fn side_pick(own: f64, other: f64, name: &str) -> Option<Pick> {
    let (recommendation, recommendation_type) = if own >= WIN_THRESHOLD {
        (format!("{} Win", name), RecommendationType::Win)
    } else if own >= WIN_OR_DRAW_THRESHOLD {
        (format!("{} Win or Draw", name), RecommendationType::WinOrDraw)
    } else if own > other {
        (format!("{} +2 Handicap", name), RecommendationType::Handicap2)
    } else {
        return None;
    };
    Some(Pick {
        recommendation,
        recommendation_type,
        winner: name.to_string(),
        win_chance: own,
    })
}

/// Direct mode selector. Home rules are evaluated before away rules.
pub fn select_direct(probs: &OutcomeProbabilities, home_name: &str, away_name: &str) -> Pick {
    if let Some(pick) = side_pick(probs.home_win, probs.away_win, home_name) {
        return pick;
    }
    if let Some(pick) = side_pick(probs.away_win, probs.home_win, away_name) {
        return pick;
    }

    if (probs.home_win - probs.away_win).abs() < CLOSE_MATCH_GAP {
        return Pick {
            recommendation: "Draw or Double Chance".to_string(),
            recommendation_type: RecommendationType::DrawSafe,
            winner: DRAW_LABEL.to_string(),
            win_chance: probs.draw,
        };
    }

    let (name, chance) = if probs.home_win > probs.away_win {
        (home_name, probs.home_win)
    } else {
        (away_name, probs.away_win)
    };
    Pick {
        recommendation: format!("{} +2 Handicap", name),
        recommendation_type: RecommendationType::Handicap2,
        winner: name.to_string(),
        win_chance: chance,
    }
}

/// League confidence: 50 plus 5 per point of margin between the top two outcomes, capped at 100.
pub fn league_confidence(probs: &OutcomeProbabilities) -> f64 {
    let (top, second) = probs.top_two();
    (LEAGUE_CONFIDENCE_BASE + LEAGUE_CONFIDENCE_PER_POINT * (top - second)).min(100.0)
}

/// Direct confidence from the strength gap (0-100 scale), capped at 90.
pub fn direct_confidence(home_strength: f64, away_strength: f64) -> f64 {
    (DIRECT_CONFIDENCE_BASE + (home_strength - away_strength).abs()).min(DIRECT_CONFIDENCE_CAP)
}
