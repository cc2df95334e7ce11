//! Snapshot Refresh Cache
//!
//! Single-slot, time-expiring cache around the bulk market-data fetch.
//! The upstream enforces call-rate limits, so this cache is the only
//! defense against exceeding them; when the upstream is down it serves
//! the last-known-good snapshot instead of failing.

use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::Utc;
use tokio::sync::Mutex;

use crate::error::Result;
use crate::model::{MarketSnapshot, MarketStats};
use crate::provider::MarketDataProvider;

/// Default snapshot time-to-live.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

struct CacheEntry {
    snapshot: Arc<MarketSnapshot>,
    fetched_at: Instant,
}

/// One-slot snapshot cache over a market-data provider.
///
/// Holds at most one entry, replaced wholesale on refresh, so callers
/// always observe either a fully-old or fully-new snapshot. Construct
/// once per process and share by `Arc`.
pub struct SnapshotCache {
    provider: Arc<dyn MarketDataProvider>,
    ttl: Duration,
    slot: Mutex<Option<CacheEntry>>,
}

impl SnapshotCache {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::with_ttl(provider, DEFAULT_TTL)
    }

    pub fn with_ttl(provider: Arc<dyn MarketDataProvider>, ttl: Duration) -> Self {
        Self {
            provider,
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Name of the provider behind this cache.
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// True once a snapshot has been published.
    pub async fn is_primed(&self) -> bool {
        self.slot.lock().await.is_some()
    }

    /// Return the cached snapshot, refreshing it first when expired.
    ///
    /// The slot lock is held across the refresh, so callers racing past
    /// an expired TTL collapse into a single upstream fetch: the winner
    /// publishes, the losers find a fresh entry and return it.
    ///
    /// A failed refresh falls back to the stale snapshot when one
    /// exists; with an empty slot the provider error surfaces to the
    /// caller.
    pub async fn get_or_refresh(&self) -> Result<Arc<MarketSnapshot>> {
        let mut slot = self.slot.lock().await;

        if let Some(entry) = slot.as_ref() {
            if entry.fetched_at.elapsed() < self.ttl {
                tracing::debug!("Serving cached snapshot from {}", self.provider.name());
                return Ok(Arc::clone(&entry.snapshot));
            }
        }

        match self.refresh().await {
            Ok(snapshot) => {
                *slot = Some(CacheEntry {
                    snapshot: Arc::clone(&snapshot),
                    fetched_at: Instant::now(),
                });
                Ok(snapshot)
            }
            Err(err) => match slot.as_ref() {
                Some(entry) => {
                    tracing::warn!("Refresh failed, serving stale snapshot: {}", err);
                    Ok(Arc::clone(&entry.snapshot))
                }
                None => Err(err),
            },
        }
    }

    async fn refresh(&self) -> Result<Arc<MarketSnapshot>> {
        tracing::info!("Fetching fresh market data from {}", self.provider.name());
        let markets = self.provider.fetch_markets().await?;

        // Only the asset list is fatal; global stats default to zeros
        // when their endpoint fails independently.
        let stats = match self.provider.fetch_global().await {
            Ok(stats) => stats,
            Err(err) => {
                tracing::warn!("Global stats unavailable, using defaults: {}", err);
                MarketStats::default()
            }
        };

        Ok(Arc::new(MarketSnapshot::assemble(markets, stats, Utc::now())))
    }
}
