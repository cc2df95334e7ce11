//! Mock Provider
//!
//! For testing and demo purposes. Returns a realistic static market list,
//! and can be scripted to fail so callers can exercise their degradation
//! paths.

use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use rust_decimal_macros::dec;

use super::{MarketDataProvider, RawMarket};
use crate::error::{IntelError, Result};
use crate::model::MarketStats;

/// Scripted failure mode for the next fetches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockOutage {
    /// Behave as if the upstream returned HTTP 429.
    RateLimited,
    /// Behave as if the upstream is down.
    Unavailable,
}

impl MockOutage {
    fn to_error(self) -> IntelError {
        match self {
            MockOutage::RateLimited => IntelError::RateLimited("mock provider".into()),
            MockOutage::Unavailable => IntelError::Upstream("mock provider offline".into()),
        }
    }
}

/// Mock market-data provider with a static asset list.
pub struct MockProvider {
    markets: Vec<RawMarket>,
    stats: MarketStats,
    outage: Mutex<Option<MockOutage>>,
    global_outage: Mutex<bool>,
    market_fetches: AtomicUsize,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    pub fn new() -> Self {
        Self::with_markets(seed_markets())
    }

    /// Create with a caller-supplied asset list (for testing)
    pub fn with_markets(markets: Vec<RawMarket>) -> Self {
        Self {
            markets,
            stats: seed_stats(),
            outage: Mutex::new(None),
            global_outage: Mutex::new(false),
            market_fetches: AtomicUsize::new(0),
        }
    }

    /// Make every subsequent fetch fail (or recover with `None`).
    pub fn set_outage(&self, outage: Option<MockOutage>) {
        *self.outage.lock().unwrap() = outage;
    }

    /// Fail only the global-stats endpoint.
    pub fn set_global_outage(&self, down: bool) {
        *self.global_outage.lock().unwrap() = down;
    }

    /// How many market fetches have been attempted.
    pub fn market_fetches(&self) -> usize {
        self.market_fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MarketDataProvider for MockProvider {
    async fn fetch_markets(&self) -> Result<Vec<RawMarket>> {
        self.market_fetches.fetch_add(1, Ordering::SeqCst);
        if let Some(outage) = *self.outage.lock().unwrap() {
            return Err(outage.to_error());
        }
        Ok(self.markets.clone())
    }

    async fn fetch_global(&self) -> Result<MarketStats> {
        if let Some(outage) = *self.outage.lock().unwrap() {
            return Err(outage.to_error());
        }
        if *self.global_outage.lock().unwrap() {
            return Err(IntelError::Upstream("mock global stats offline".into()));
        }
        Ok(self.stats.clone())
    }

    fn name(&self) -> &str {
        "MockProvider"
    }
}

fn seed_markets() -> Vec<RawMarket> {
    // (id, symbol, name, price, market cap, 1h, 24h, 7d)
    let rows = [
        ("bitcoin", "btc", "Bitcoin", dec!(97500), dec!(1_930_000_000_000), 0.3, 2.5, 4.1),
        ("ethereum", "eth", "Ethereum", dec!(3450), dec!(415_000_000_000), 0.1, 1.8, -2.3),
        ("solana", "sol", "Solana", dec!(195), dec!(94_000_000_000), 0.8, 4.2, 11.5),
        ("dogecoin", "doge", "Dogecoin", dec!(0.38), dec!(56_000_000_000), 2.4, 12.0, 18.9),
        ("cardano", "ada", "Cardano", dec!(0.95), dec!(34_000_000_000), -0.2, -1.2, -6.4),
        ("avalanche-2", "avax", "Avalanche", dec!(42.00), dec!(17_000_000_000), 0.6, 5.5, 8.0),
        ("chainlink", "link", "Chainlink", dec!(24.50), dec!(15_000_000_000), 0.4, 3.1, 6.2),
        ("polkadot", "dot", "Polkadot", dec!(7.20), dec!(11_000_000_000), 0.0, 0.8, -1.1),
        ("shiba-inu", "shib", "Shiba Inu", dec!(0.000022), dec!(13_000_000_000), -1.1, -8.0, -15.2),
        ("litecoin", "ltc", "Litecoin", dec!(105), dec!(7_900_000_000), 0.2, 1.5, 2.8),
    ];

    rows.into_iter()
        .enumerate()
        .map(|(i, (id, symbol, name, price, cap, h1, h24, d7))| RawMarket {
            id: id.to_string(),
            symbol: symbol.to_string(),
            name: name.to_string(),
            price: Some(price),
            market_cap: Some(cap),
            rank: Some(i as u32 + 1),
            change_1h: Some(h1),
            change_24h: Some(h24),
            change_7d: Some(d7),
            ..RawMarket::default()
        })
        .collect()
}

fn seed_stats() -> MarketStats {
    MarketStats {
        total_market_cap: dec!(3_400_000_000_000),
        total_volume: dec!(120_000_000_000),
        btc_dominance: 56.5,
        eth_dominance: 12.1,
        active_cryptos: 17_000,
        market_cap_change_24h: 1.8,
    }
}
