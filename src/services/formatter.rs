// src/services/formatter.rs

use chrono::{DateTime, Local, TimeZone};
use serde::Deserialize;
use serde_json::Value;

use crate::models::event::{RawEvent, RawTeam};
use crate::models::matches::{Match, TeamSide};

const KICKOFF_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Where a team's logo URL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogoSource {
    /// URL built from the team id; `{id}` is replaced.
    Template(String),
    /// Whatever `logo` field the upstream team record carries, if any.
    Passthrough,
}

#[derive(Debug, Clone)]
pub struct EventFormatter {
    logo: LogoSource,
}

impl EventFormatter {
    pub fn new(logo: LogoSource) -> Self {
        Self { logo }
    }

    /// Formats with kickoff times in the server's local time zone.
    pub fn format(&self, raw: &RawEvent) -> Match {
        self.format_in(raw, &Local)
    }

    pub fn format_in<Tz>(&self, raw: &RawEvent, tz: &Tz) -> Match
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Match {
            id: raw.id,
            tournament_name: raw.tournament.name.clone(),
            start_timestamp: raw.start_timestamp,
            start_time_formatted: format_kickoff(raw.start_timestamp, tz),
            status: raw.status.description.clone(),
            status_code: raw.status.code,
            status_type: raw.status.kind.clone(),
            home: self.side(&raw.home_team, raw.home_goals()),
            away: self.side(&raw.away_team, raw.away_goals()),
        }
    }

    /// Decodes and formats a list of raw upstream records. Records that don't
    /// have the required fields are logged and dropped.
    pub fn format_all(&self, events: &[Value]) -> Vec<Match> {
        events
            .iter()
            .filter_map(|value| match RawEvent::deserialize(value) {
                Ok(raw) => Some(self.format(&raw)),
                Err(e) => {
                    let id = value.get("id").cloned().unwrap_or_default();
                    tracing::warn!("Skipping malformed event {}: {}", id, e);
                    None
                }
            })
            .collect()
    }

    fn side(&self, team: &RawTeam, score: Option<i64>) -> TeamSide {
        let logo_url = match &self.logo {
            LogoSource::Template(template) => {
                Some(template.replace("{id}", &team.id.to_string()))
            }
            LogoSource::Passthrough => team.logo.clone(),
        };

        TeamSide {
            id: team.id,
            name: team.name.clone(),
            logo_url,
            score,
        }
    }
}

/// Unix seconds rendered as `YYYY-MM-DD HH:MM` in `tz`. Out-of-range
/// timestamps render as an empty string.
pub fn format_kickoff<Tz>(timestamp: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    DateTime::from_timestamp(timestamp, 0)
        .map(|utc| utc.with_timezone(tz).format(KICKOFF_FORMAT).to_string())
        .unwrap_or_default()
}
