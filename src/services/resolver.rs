// src/services/resolver.rs

use crate::errors::AggregateError;
use crate::services::upstream::{collection, seasons_path, UpstreamClient};

/// Current season id for a tournament: the first entry of the upstream
/// `seasons` list, taken as-is without sorting.
pub async fn resolve_season(
    client: &dyn UpstreamClient,
    tournament_id: u64,
) -> Result<u64, AggregateError> {
    let path = seasons_path(tournament_id);
    let response = client.fetch(&path).await?;

    let seasons = match collection(&response, &path, "seasons") {
        Ok(seasons) => seasons,
        Err(_) => return Err(AggregateError::SeasonNotFound(tournament_id)),
    };

    seasons
        .first()
        .and_then(|season| season.get("id"))
        .and_then(|id| id.as_u64())
        .ok_or(AggregateError::SeasonNotFound(tournament_id))
}
