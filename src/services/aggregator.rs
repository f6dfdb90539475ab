// src/services/aggregator.rs

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::{Duration, Local, NaiveDate};
use futures::future::join_all;
use futures::stream::{self, StreamExt};

use crate::errors::AggregateError;
use crate::models::matches::{Match, MatchBucket};
use crate::models::tournament::Tournament;
use crate::services::categorizer::CategorizationPolicy;
use crate::services::formatter::EventFormatter;
use crate::services::resolver::resolve_season;
use crate::services::upstream::{
    collection, live_events_path, scheduled_events_path, season_events_path, UpstreamClient,
};

/// Most day feeds in flight at once for the window endpoint.
const WINDOW_FETCH_FANOUT: usize = 4;

/// Runs season resolution, event fetch, formatting and bucketing. Every
/// public entry point degrades to empty buckets instead of failing.
pub struct MatchAggregator {
    client: Arc<dyn UpstreamClient>,
    formatter: EventFormatter,
    policy: CategorizationPolicy,
    sport: String,
}

impl MatchAggregator {
    pub fn new(
        client: Arc<dyn UpstreamClient>,
        formatter: EventFormatter,
        policy: CategorizationPolicy,
        sport: impl Into<String>,
    ) -> Self {
        Self {
            client,
            formatter,
            policy,
            sport: sport.into(),
        }
    }

    pub async fn aggregate(&self, tournament: &Tournament) -> MatchBucket {
        self.aggregate_tournament(tournament.id, None).await
    }

    /// Buckets one tournament's events. With `season_id` set the season
    /// lookup is skipped.
    pub async fn aggregate_tournament(
        &self,
        tournament_id: u64,
        season_id: Option<u64>,
    ) -> MatchBucket {
        match self.try_aggregate(tournament_id, season_id).await {
            Ok(bucket) => bucket,
            Err(e) => {
                tracing::warn!("Tournament {}: serving empty buckets ({})", tournament_id, e);
                MatchBucket::default()
            }
        }
    }

    async fn try_aggregate(
        &self,
        tournament_id: u64,
        season_id: Option<u64>,
    ) -> Result<MatchBucket, AggregateError> {
        let season_id = match season_id {
            Some(id) => id,
            None => resolve_season(self.client.as_ref(), tournament_id).await?,
        };

        let path = season_events_path(tournament_id, season_id);
        let response = self.client.fetch(&path).await?;
        let events = collection(&response, &path, "events")?;

        let bucket = self.policy.bucket(self.formatter.format_all(events));
        tracing::debug!(
            "Tournament {} season {}: {} live, {} upcoming, {} finished",
            tournament_id,
            season_id,
            bucket.live.len(),
            bucket.upcoming.len(),
            bucket.finished.len()
        );
        Ok(bucket)
    }

    /// One bucket per tournament name. Tournaments are fetched concurrently
    /// and fail independently.
    pub async fn aggregate_all(&self, tournaments: &[Tournament]) -> BTreeMap<String, MatchBucket> {
        let results = join_all(
            tournaments
                .iter()
                .map(|t| async move { (t.name.clone(), self.aggregate(t).await) }),
        )
        .await;

        results.into_iter().collect()
    }

    /// Live feed plus the scheduled feeds for `days` days either side of today.
    pub async fn window(&self, days: u32) -> MatchBucket {
        self.window_from(Local::now().date_naive(), days).await
    }

    pub async fn window_from(&self, today: NaiveDate, days: u32) -> MatchBucket {
        let days = i64::from(days);
        let mut paths = vec![live_events_path(&self.sport)];
        paths.extend((-days..days).filter_map(|offset| {
            today
                .checked_add_signed(Duration::days(offset))
                .map(|date| scheduled_events_path(&self.sport, date))
        }));

        // `buffered` keeps feed order, so the live feed still wins the de-dup.
        let fetches: Vec<_> = paths.iter().map(|path| self.feed(path)).collect();
        let feeds: Vec<Vec<Match>> = stream::iter(fetches)
            .buffered(WINDOW_FETCH_FANOUT)
            .collect()
            .await;

        // Today's scheduled feed repeats whatever is live; keep the first copy.
        let mut seen = HashSet::new();
        let matches: Vec<Match> = feeds
            .into_iter()
            .flatten()
            .filter(|m| seen.insert(m.id))
            .collect();

        self.policy.bucket(matches)
    }

    async fn feed(&self, path: &str) -> Vec<Match> {
        let result = async {
            let response = self.client.fetch(path).await?;
            let events = collection(&response, path, "events")?;
            Ok::<_, AggregateError>(self.formatter.format_all(events))
        }
        .await;

        result.unwrap_or_else(|e| {
            tracing::warn!("Feed {} skipped: {}", path, e);
            Vec::new()
        })
    }
}
