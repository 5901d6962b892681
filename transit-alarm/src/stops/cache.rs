//! Caching layer for stop lookups.
//!
//! Stops do not move, so a resolved coordinate can be reused for a long
//! time. Only successful lookups are cached; failures always go back to
//! the API on the next attempt.

use std::time::Duration;

use moka::future::Cache as MokaCache;
use tracing::debug;

use crate::domain::{Coordinate, StopNumber};

use super::StopResolver;
use super::client::TranslinkClient;
use super::error::ResolveError;

/// Configuration for the stop cache.
#[derive(Debug, Clone)]
pub struct StopCacheConfig {
    /// TTL for cached entries.
    pub ttl: Duration,

    /// Maximum number of cached stops.
    pub max_capacity: u64,
}

impl Default for StopCacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            max_capacity: 256,
        }
    }
}

/// RTTI client with caching.
///
/// Wraps a `TranslinkClient` and caches stop coordinates by stop number.
#[derive(Clone)]
pub struct CachedStopResolver {
    client: TranslinkClient,
    stops: MokaCache<StopNumber, Coordinate>,
}

impl CachedStopResolver {
    /// Create a new cached resolver.
    pub fn new(client: TranslinkClient, config: &StopCacheConfig) -> Self {
        let stops = MokaCache::builder()
            .time_to_live(config.ttl)
            .max_capacity(config.max_capacity)
            .build();

        Self { client, stops }
    }

    /// Resolve a validated stop number, using the cache if possible.
    pub async fn resolve_stop(&self, stop: StopNumber) -> Result<Coordinate, ResolveError> {
        if let Some(cached) = self.stops.get(&stop).await {
            debug!(%stop, "stop cache hit");
            return Ok(cached);
        }

        let coordinate = self.client.resolve_stop(stop).await?;
        self.stops.insert(stop, coordinate).await;

        Ok(coordinate)
    }

    /// Number of cached stops.
    pub fn cache_entry_count(&self) -> u64 {
        self.stops.entry_count()
    }
}

impl StopResolver for CachedStopResolver {
    async fn resolve(&self, input: &str) -> Result<Coordinate, ResolveError> {
        let stop = StopNumber::parse(input)?;
        self.resolve_stop(stop).await
    }
}
