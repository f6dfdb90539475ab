// src/services/refresher.rs

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local, LocalResult, NaiveDateTime, NaiveTime, TimeZone};
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::models::matches::MatchBucket;
use crate::models::tournament::Tournament;
use crate::services::aggregator::MatchAggregator;
use crate::services::cache::MatchCache;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshSchedule {
    Every(Duration),
    /// Once a day at this local wall-clock time.
    DailyAt(NaiveTime),
}

impl RefreshSchedule {
    /// Time to wait from `now` until the next trigger.
    pub fn next_delay<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Duration {
        match self {
            RefreshSchedule::Every(period) => *period,
            RefreshSchedule::DailyAt(at) => {
                let tz = now.timezone();
                next_daily_slot(now, *at, |local| tz.from_local_datetime(&local))
                    .and_then(|slot| slot.signed_duration_since(now.clone()).to_std().ok())
                    .unwrap_or(Duration::from_secs(24 * 60 * 60))
            }
        }
    }
}

/// First instant after `now` whose local wall-clock time is `at`. `resolve`
/// maps a local time to instants; a DST gap resolves to nothing, in which case
/// the next day is tried.
fn next_daily_slot<Tz, F>(now: &DateTime<Tz>, at: NaiveTime, resolve: F) -> Option<DateTime<Tz>>
where
    Tz: TimeZone,
    F: Fn(NaiveDateTime) -> LocalResult<DateTime<Tz>>,
{
    let mut date = now.date_naive();
    for _ in 0..3 {
        if let Some(slot) = resolve(date.and_time(at)).earliest().filter(|s| s > now) {
            return Some(slot);
        }
        date = date.succ_opt()?;
    }
    None
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed { generation: u64, matches: usize },
    /// Another refresh held the slot, so this trigger did nothing.
    Skipped,
}

/// Repopulates the cache from upstream, at most one cycle at a time.
pub struct RefreshJob {
    aggregator: Arc<MatchAggregator>,
    cache: Arc<MatchCache>,
    tournaments: Vec<Tournament>,
    schedule: RefreshSchedule,
    running: Mutex<()>,
}

impl RefreshJob {
    pub fn new(
        aggregator: Arc<MatchAggregator>,
        cache: Arc<MatchCache>,
        tournaments: Vec<Tournament>,
        schedule: RefreshSchedule,
    ) -> Self {
        Self {
            aggregator,
            cache,
            tournaments,
            schedule,
            running: Mutex::new(()),
        }
    }

    pub async fn refresh_once(&self) -> RefreshOutcome {
        let _guard = match self.running.try_lock() {
            Ok(guard) => guard,
            Err(_) => {
                tracing::warn!("⏭️ Refresh already in progress, skipping this trigger");
                return RefreshOutcome::Skipped;
            }
        };

        let started = Instant::now();
        tracing::info!("🔄 Refreshing {} tournaments", self.tournaments.len());

        let buckets = self.aggregator.aggregate_all(&self.tournaments).await;
        for (name, bucket) in &buckets {
            if bucket.is_empty() {
                tracing::warn!("   → {}: no matches", name);
                continue;
            }
            tracing::info!(
                "   → {}: {} live, {} upcoming, {} finished",
                name,
                bucket.live.len(),
                bucket.upcoming.len(),
                bucket.finished.len()
            );
        }

        let matches = buckets.values().map(MatchBucket::len).sum();
        let generation = self.cache.replace(buckets);

        tracing::info!(
            "✅ Cache generation {} published ({} matches) in {:?}",
            generation,
            matches,
            started.elapsed()
        );
        RefreshOutcome::Completed { generation, matches }
    }

    /// Runs the schedule on one background task until `shutdown` fires.
    /// Each cycle finishes before the next delay starts, so cycles never overlap.
    pub fn spawn(self: Arc<Self>, shutdown: CancellationToken) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let delay = self.schedule.next_delay(&Local::now());
                tracing::debug!("Next cache refresh in {:?}", delay);

                tokio::select! {
                    _ = shutdown.cancelled() => {
                        tracing::info!("🛑 Refresh job stopped");
                        break;
                    }
                    _ = tokio::time::sleep(delay) => {
                        self.refresh_once().await;
                    }
                }
            }
        })
    }
}
