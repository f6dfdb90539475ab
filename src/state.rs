use std::sync::Arc;

use crate::config::AppConfig;
use crate::services::aggregator::MatchAggregator;
use crate::services::cache::MatchCache;
use crate::services::formatter::EventFormatter;
use crate::services::upstream::UpstreamClient;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub aggregator: Arc<MatchAggregator>,
    pub cache: Arc<MatchCache>,
}

impl AppState {
    pub fn new(config: AppConfig, client: Arc<dyn UpstreamClient>) -> Self {
        let aggregator = MatchAggregator::new(
            client,
            EventFormatter::new(config.logo.clone()),
            config.policy,
            config.upstream.sport.clone(),
        );

        AppState {
            config: Arc::new(config),
            aggregator: Arc::new(aggregator),
            cache: Arc::new(MatchCache::new()),
        }
    }
}
