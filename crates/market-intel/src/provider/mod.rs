//! Market Data Providers
//!
//! Abstractions and implementations for bulk market-data sources.

mod coingecko;
mod mock;

pub use coingecko::CoinGeckoProvider;
pub use mock::{MockOutage, MockProvider};

use async_trait::async_trait;
use rust_decimal::Decimal;

use crate::error::Result;
use crate::model::MarketStats;

/// Bulk market-data source (Strategy pattern)
///
/// Implement this for each source: CoinGecko, CoinMarketCap, a fixture
/// file, etc.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Top assets by market cap, with momentum percentages and sparkline.
    async fn fetch_markets(&self) -> Result<Vec<RawMarket>>;

    /// Global market aggregates.
    async fn fetch_global(&self) -> Result<MarketStats>;

    /// Provider name (for logs and health reporting)
    fn name(&self) -> &str;
}

/// One asset as returned by the provider, before signal annotation.
///
/// Numeric fields are nullable: thin markets legitimately lack momentum
/// or supply figures.
#[derive(Clone, Debug, Default)]
pub struct RawMarket {
    pub id: String,
    pub symbol: String,
    pub name: String,
    pub image: Option<String>,
    pub price: Option<Decimal>,
    pub market_cap: Option<Decimal>,
    pub volume: Option<Decimal>,
    pub rank: Option<u32>,
    pub change_1h: Option<f64>,
    pub change_24h: Option<f64>,
    pub change_7d: Option<f64>,
    pub high_24h: Option<Decimal>,
    pub low_24h: Option<Decimal>,
    pub ath: Option<Decimal>,
    pub ath_change_percent: Option<f64>,
    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
    pub sparkline: Vec<f64>,
}
