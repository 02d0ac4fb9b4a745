use super::{FixtureRecord, PredictionResult};
use serde::{Deserialize, Serialize};

/// Provenance of a predicted fixture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PickMatch {
    pub id: u64,
    pub home_team: String,
    pub away_team: String,
    pub date: Option<String>,
    pub competition: String,
}

impl From<&FixtureRecord> for PickMatch {
    fn from(fixture: &FixtureRecord) -> Self {
        Self {
            id: fixture.id,
            home_team: fixture.home_team.display_name().to_string(),
            away_team: fixture.away_team.display_name().to_string(),
            date: fixture.utc_date.clone(),
            competition: fixture.competition_name().to_string(),
        }
    }
}

/// A fixture together with its prediction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchPrediction {
    #[serde(rename = "match")]
    pub fixture: PickMatch,
    pub prediction: PredictionResult,
}

impl MatchPrediction {
    pub fn quality_score(&self) -> f64 {
        self.prediction.quality_score()
    }
}
