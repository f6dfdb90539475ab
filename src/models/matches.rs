// models/matches.rs
use serde::{Deserialize, Serialize};

/// Simplified match record handed to API callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: u64,
    pub tournament_name: String,
    pub start_timestamp: i64,
    pub start_time_formatted: String,
    pub status: String,
    pub status_code: Option<i64>,
    pub status_type: String,
    pub home: TeamSide,
    pub away: TeamSide,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSide {
    pub id: u64,
    pub name: String,
    pub logo_url: Option<String>,
    pub score: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BucketKind {
    Live,
    Upcoming,
    Finished,
}

/// Matches partitioned by status.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchBucket {
    pub live: Vec<Match>,
    pub upcoming: Vec<Match>,
    pub finished: Vec<Match>,
}

impl MatchBucket {
    pub fn push(&mut self, kind: BucketKind, m: Match) {
        match kind {
            BucketKind::Live => self.live.push(m),
            BucketKind::Upcoming => self.upcoming.push(m),
            BucketKind::Finished => self.finished.push(m),
        }
    }

    pub fn len(&self) -> usize {
        self.live.len() + self.upcoming.len() + self.finished.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
