// src/services/cache.rs

use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};

use crate::models::matches::MatchBucket;

/// One complete refresh result. Never mutated after it is published.
#[derive(Debug, Default)]
pub struct CacheSnapshot {
    pub buckets: BTreeMap<String, MatchBucket>,
    pub refreshed_at: Option<DateTime<Utc>>,
    /// 0 until the first refresh lands.
    pub generation: u64,
}

/// Tournament name to buckets, replaced wholesale by the refresh job.
///
/// Readers take a cheap `Arc` clone of the current snapshot, so they see either
/// the previous refresh or the next one, never a mix.
#[derive(Debug, Default)]
pub struct MatchCache {
    current: RwLock<Arc<CacheSnapshot>>,
}

impl MatchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn snapshot(&self) -> Arc<CacheSnapshot> {
        match self.current.read() {
            Ok(guard) => Arc::clone(&*guard),
            Err(poisoned) => Arc::clone(&*poisoned.into_inner()),
        }
    }

    /// Publishes `buckets` as the new snapshot and returns its generation.
    pub fn replace(&self, buckets: BTreeMap<String, MatchBucket>) -> u64 {
        let mut guard = match self.current.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };

        let generation = guard.generation + 1;
        *guard = Arc::new(CacheSnapshot {
            buckets,
            refreshed_at: Some(Utc::now()),
            generation,
        });
        generation
    }
}
