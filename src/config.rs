// config.rs
use std::env;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use chrono::NaiveTime;

use crate::errors::{AppError, Result};
use crate::models::tournament::{default_tournaments, parse_tournament_table, Tournament};
use crate::services::categorizer::CategorizationPolicy;
use crate::services::formatter::LogoSource;
use crate::services::refresher::RefreshSchedule;

const DEFAULT_BASE_URL: &str = "https://api.sofascore.com/api/v1";
const DEFAULT_LOGO_TEMPLATE: &str = "https://api.sofascore.app/api/v1/team/{id}/image";
const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";
const DEFAULT_REFERER: &str = "https://www.sofascore.com/";
const DEFAULT_ORIGIN: &str = "https://www.sofascore.com";
/// Upper bound for `MATCH_WINDOW_MAX_DAYS`; each day costs one upstream request.
const WINDOW_DAYS_CAP: u32 = 31;

/// Settings for talking to the sports-data API.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub sport: String,
    pub timeout: Duration,
    pub user_agent: Option<String>,
    pub referer: Option<String>,
    pub origin: Option<String>,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            sport: "football".to_string(),
            timeout: Duration::from_secs(10),
            user_agent: Some(DEFAULT_USER_AGENT.to_string()),
            referer: Some(DEFAULT_REFERER.to_string()),
            origin: Some(DEFAULT_ORIGIN.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub log_level: tracing::Level,
    pub upstream: UpstreamConfig,
    pub logo: LogoSource,
    pub policy: CategorizationPolicy,
    pub refresh: RefreshSchedule,
    pub tournaments: Vec<Tournament>,
    pub window_days: u32,
    pub max_window_days: u32,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup. Unset keys take their
    /// defaults; set-but-invalid keys are errors.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let upstream = UpstreamConfig {
            base_url: lookup("UPSTREAM_BASE_URL")
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            sport: lookup("UPSTREAM_SPORT").unwrap_or_else(|| "football".to_string()),
            timeout: Duration::from_secs(parse_or(&lookup, "UPSTREAM_TIMEOUT_SECS", 10u64)?),
            user_agent: header_value(&lookup, "UPSTREAM_USER_AGENT", DEFAULT_USER_AGENT),
            referer: header_value(&lookup, "UPSTREAM_REFERER", DEFAULT_REFERER),
            origin: header_value(&lookup, "UPSTREAM_ORIGIN", DEFAULT_ORIGIN),
        };

        if upstream.timeout.is_zero() {
            return Err(AppError::configuration("UPSTREAM_TIMEOUT_SECS must be positive"));
        }

        let logo = match lookup("TEAM_LOGO_TEMPLATE") {
            Some(v) if v.eq_ignore_ascii_case("passthrough") => LogoSource::Passthrough,
            Some(v) if !v.contains("{id}") => {
                return Err(AppError::configuration(
                    "TEAM_LOGO_TEMPLATE must contain an {id} placeholder",
                ))
            }
            Some(v) => LogoSource::Template(v),
            None => LogoSource::Template(DEFAULT_LOGO_TEMPLATE.to_string()),
        };

        let policy = match lookup("CATEGORIZATION_POLICY") {
            Some(v) => v.parse::<CategorizationPolicy>()?,
            None => CategorizationPolicy::default(),
        };

        let refresh = match lookup("REFRESH_DAILY_AT") {
            Some(at) => {
                let time = NaiveTime::parse_from_str(at.trim(), "%H:%M").map_err(|e| {
                    AppError::configuration(format!("REFRESH_DAILY_AT '{}': {}", at, e))
                })?;
                RefreshSchedule::DailyAt(time)
            }
            None => {
                let secs = parse_or(&lookup, "REFRESH_INTERVAL_SECS", 86_400u64)?;
                if secs == 0 {
                    return Err(AppError::configuration("REFRESH_INTERVAL_SECS must be positive"));
                }
                RefreshSchedule::Every(Duration::from_secs(secs))
            }
        };

        let tournaments = match lookup("TOURNAMENTS") {
            Some(raw) => parse_tournament_table(&raw)?,
            None => default_tournaments(),
        };

        let window_days = parse_or(&lookup, "MATCH_WINDOW_DAYS", 3u32)?;
        let max_window_days = parse_or(&lookup, "MATCH_WINDOW_MAX_DAYS", 14u32)?;
        if max_window_days == 0 || max_window_days > WINDOW_DAYS_CAP {
            return Err(AppError::configuration(format!(
                "MATCH_WINDOW_MAX_DAYS must be between 1 and {}",
                WINDOW_DAYS_CAP
            )));
        }
        if window_days == 0 || window_days > max_window_days {
            return Err(AppError::configuration(format!(
                "MATCH_WINDOW_DAYS must be between 1 and {}",
                max_window_days
            )));
        }

        Ok(AppConfig {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parse_or(&lookup, "PORT", 10000u16)?,
            log_level: parse_or(&lookup, "LOG_LEVEL", tracing::Level::INFO)?,
            upstream,
            logo,
            policy,
            refresh,
            tournaments,
            window_days,
            max_window_days,
        })
    }

    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|e| AppError::configuration(format!("bad bind address: {}", e)))
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| AppError::configuration(format!("{} '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

// An explicitly empty value switches the header off.
fn header_value<F>(lookup: &F, key: &str, default: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(v) if v.trim().is_empty() => None,
        Some(v) => Some(v),
        None => Some(default.to_string()),
    }
}
