// models/event.rs
//
// Shape of one event record as the sports-data API returns it. Only the
// fields the formatter reads are modelled; everything else is ignored.
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawEvent {
    pub id: u64,

    #[serde(default)]
    pub tournament: RawTournament,

    pub home_team: RawTeam,
    pub away_team: RawTeam,

    #[serde(default)]
    pub home_score: Option<RawScore>,

    #[serde(default)]
    pub away_score: Option<RawScore>,

    #[serde(default)]
    pub status: RawStatus,

    pub start_timestamp: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTournament {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTeam {
    pub id: u64,
    pub name: String,

    #[serde(default)]
    pub logo: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawScore {
    #[serde(default)]
    pub current: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawStatus {
    #[serde(default)]
    pub code: Option<i64>,

    #[serde(default)]
    pub description: String,

    #[serde(default, rename = "type")]
    pub kind: String,
}

impl RawEvent {
    pub fn home_goals(&self) -> Option<i64> {
        self.home_score.as_ref().and_then(|s| s.current)
    }

    pub fn away_goals(&self) -> Option<i64> {
        self.away_score.as_ref().and_then(|s| s.current)
    }
}
