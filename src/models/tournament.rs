// models/tournament.rs
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, Result};

/// A competition the service tracks, keyed by its upstream identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tournament {
    pub name: String,
    pub id: u64,
}

impl Tournament {
    pub fn new(name: impl Into<String>, id: u64) -> Self {
        Self {
            name: name.into(),
            id,
        }
    }
}

const DEFAULT_TOURNAMENTS: &[(&str, u64)] = &[
    ("Premier League", 17),
    ("LaLiga", 8),
    ("Serie A", 23),
    ("Bundesliga", 35),
    ("Ligue 1", 34),
    ("UEFA Champions League", 7),
];

pub fn default_tournaments() -> Vec<Tournament> {
    DEFAULT_TOURNAMENTS
        .iter()
        .map(|(name, id)| Tournament::new(*name, *id))
        .collect()
}

/// Parses a `Name:id,Name:id` table. Names may contain spaces; the id is
/// whatever follows the last colon.
pub fn parse_tournament_table(raw: &str) -> Result<Vec<Tournament>> {
    let mut tournaments = Vec::new();

    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, id) = entry.rsplit_once(':').ok_or_else(|| {
            AppError::configuration(format!("tournament entry '{}' is not Name:id", entry))
        })?;

        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::configuration(format!(
                "tournament entry '{}' has an empty name",
                entry
            )));
        }

        let id = id.trim().parse::<u64>().map_err(|e| {
            AppError::configuration(format!("tournament '{}' has a bad id: {}", name, e))
        })?;

        if tournaments.iter().any(|t: &Tournament| t.name == name) {
            return Err(AppError::configuration(format!(
                "tournament '{}' is listed twice",
                name
            )));
        }

        tournaments.push(Tournament::new(name, id));
    }

    if tournaments.is_empty() {
        return Err(AppError::configuration("tournament table is empty"));
    }

    Ok(tournaments)
}
