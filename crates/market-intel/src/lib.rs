//! # market-intel
//!
//! Market intelligence core for the crypto dashboard: momentum-derived
//! trading signals over a cached bulk market-data feed.
//!
//! ## Flow
//!
//! ```text
//! caller ──> SnapshotCache::get_or_refresh
//!              │ fresh entry                  │ expired or empty
//!              ▼                              ▼
//!        cached Arc<MarketSnapshot>    MarketDataProvider::fetch_markets
//!                                             │
//!                                             ▼
//!                               derive_signal per asset ──> new snapshot
//! ```
//!
//! The cache holds one snapshot at a time, replaced wholesale on refresh,
//! and serves it stale when the provider is down or rate limited. The
//! signal engine is a pure function over the three momentum windows
//! (1h/24h/7d); identical inputs always yield identical signals.

pub mod cache;
pub mod error;
pub mod model;
pub mod provider;
pub mod signal;

pub use cache::SnapshotCache;
pub use error::{IntelError, Result};
pub use model::{AssetQuote, MarketSentiment, MarketSnapshot, MarketStats};
pub use provider::{CoinGeckoProvider, MarketDataProvider, MockProvider, RawMarket};
pub use signal::{PriceChanges, Signal, SignalReading, derive_signal};
