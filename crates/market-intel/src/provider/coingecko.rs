//! CoinGecko Provider
//!
//! Bulk market data from the public CoinGecko REST API. The public tier
//! enforces aggressive call-rate limits; callers are expected to sit
//! behind a `SnapshotCache` rather than hit this client directly.

use async_trait::async_trait;
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

use super::{MarketDataProvider, RawMarket};
use crate::error::{IntelError, Result};
use crate::model::MarketStats;

const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

/// How many assets a markets fetch returns.
const PAGE_SIZE: u32 = 100;

/// CoinGecko REST client.
pub struct CoinGeckoProvider {
    client: reqwest::Client,
    base_url: String,
}

impl Default for CoinGeckoProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl CoinGeckoProvider {
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Point the client at a different base URL (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path_and_query: &str) -> Result<T> {
        let url = format!("{}{}", self.base_url, path_and_query);
        let response = self
            .client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let body = response.text().await?;
                Ok(serde_json::from_str(&body)?)
            }
            StatusCode::TOO_MANY_REQUESTS => Err(IntelError::RateLimited("CoinGecko".into())),
            status => Err(IntelError::Upstream(format!(
                "CoinGecko returned HTTP {status}"
            ))),
        }
    }
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    async fn fetch_markets(&self) -> Result<Vec<RawMarket>> {
        let path = format!(
            "/coins/markets?vs_currency=usd&order=market_cap_desc&per_page={PAGE_SIZE}&page=1&sparkline=true&price_change_percentage=1h,24h,7d"
        );
        let markets: Vec<GeckoMarket> = self.get_json(&path).await?;
        Ok(markets.into_iter().map(RawMarket::from).collect())
    }

    async fn fetch_global(&self) -> Result<MarketStats> {
        let global: GeckoGlobal = self.get_json("/global").await?;
        Ok(global.data.into_stats())
    }

    fn name(&self) -> &str {
        "CoinGecko"
    }
}

/// Raw `/coins/markets` record. Momentum fields for 1h and 7d only appear
/// when the request asks for them `_in_currency`.
#[derive(Debug, Deserialize)]
struct GeckoMarket {
    id: String,
    symbol: String,
    name: String,
    image: Option<String>,
    current_price: Option<Decimal>,
    market_cap: Option<Decimal>,
    market_cap_rank: Option<u32>,
    total_volume: Option<Decimal>,
    high_24h: Option<Decimal>,
    low_24h: Option<Decimal>,
    price_change_percentage_24h: Option<f64>,
    #[serde(rename = "price_change_percentage_1h_in_currency")]
    change_1h: Option<f64>,
    #[serde(rename = "price_change_percentage_7d_in_currency")]
    change_7d: Option<f64>,
    ath: Option<Decimal>,
    ath_change_percentage: Option<f64>,
    circulating_supply: Option<Decimal>,
    total_supply: Option<Decimal>,
    max_supply: Option<Decimal>,
    sparkline_in_7d: Option<GeckoSparkline>,
}

#[derive(Debug, Deserialize)]
struct GeckoSparkline {
    price: Vec<f64>,
}

impl From<GeckoMarket> for RawMarket {
    fn from(m: GeckoMarket) -> Self {
        Self {
            id: m.id,
            symbol: m.symbol,
            name: m.name,
            image: m.image,
            price: m.current_price,
            market_cap: m.market_cap,
            volume: m.total_volume,
            rank: m.market_cap_rank,
            change_1h: m.change_1h,
            change_24h: m.price_change_percentage_24h,
            change_7d: m.change_7d,
            high_24h: m.high_24h,
            low_24h: m.low_24h,
            ath: m.ath,
            ath_change_percent: m.ath_change_percentage,
            circulating_supply: m.circulating_supply,
            total_supply: m.total_supply,
            max_supply: m.max_supply,
            sparkline: m.sparkline_in_7d.map(|s| s.price).unwrap_or_default(),
        }
    }
}

/// `/global` response wrapper.
#[derive(Debug, Deserialize)]
struct GeckoGlobal {
    data: GeckoGlobalData,
}

#[derive(Debug, Default, Deserialize)]
struct GeckoGlobalData {
    #[serde(default)]
    total_market_cap: HashMap<String, Decimal>,
    #[serde(default)]
    total_volume: HashMap<String, Decimal>,
    #[serde(default)]
    market_cap_percentage: HashMap<String, f64>,
    #[serde(default)]
    active_cryptocurrencies: u32,
    #[serde(default)]
    market_cap_change_percentage_24h_usd: f64,
}

impl GeckoGlobalData {
    fn into_stats(self) -> MarketStats {
        MarketStats {
            total_market_cap: self
                .total_market_cap
                .get("usd")
                .copied()
                .unwrap_or_default(),
            total_volume: self.total_volume.get("usd").copied().unwrap_or_default(),
            btc_dominance: self
                .market_cap_percentage
                .get("btc")
                .copied()
                .unwrap_or_default(),
            eth_dominance: self
                .market_cap_percentage
                .get("eth")
                .copied()
                .unwrap_or_default(),
            active_cryptos: self.active_cryptocurrencies,
            market_cap_change_24h: self.market_cap_change_percentage_24h_usd,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn decodes_a_markets_record_with_nulls() {
        let json = r#"{
            "id": "bitcoin",
            "symbol": "btc",
            "name": "Bitcoin",
            "image": "https://assets.coingecko.com/coins/images/1/large/bitcoin.png",
            "current_price": 97500.0,
            "market_cap": 1930000000000,
            "market_cap_rank": 1,
            "total_volume": 25000000000,
            "high_24h": 98100.0,
            "low_24h": 95200.0,
            "price_change_percentage_24h": 2.5,
            "price_change_percentage_1h_in_currency": 0.3,
            "price_change_percentage_7d_in_currency": null,
            "ath": 108000.0,
            "ath_change_percentage": -9.7,
            "circulating_supply": 19800000.0,
            "total_supply": 21000000.0,
            "max_supply": null,
            "sparkline_in_7d": { "price": [96000.0, 96500.0, 97500.0] }
        }"#;

        let market: GeckoMarket = serde_json::from_str(json).unwrap();
        let raw = RawMarket::from(market);

        assert_eq!(raw.id, "bitcoin");
        assert_eq!(raw.price, Some(dec!(97500)));
        assert_eq!(raw.rank, Some(1));
        assert_eq!(raw.change_1h, Some(0.3));
        assert_eq!(raw.change_24h, Some(2.5));
        assert_eq!(raw.change_7d, None);
        assert_eq!(raw.max_supply, None);
        assert_eq!(raw.sparkline.len(), 3);
    }

    #[test]
    fn missing_momentum_and_sparkline_fields_decode_as_empty() {
        let json = r#"{
            "id": "newcoin",
            "symbol": "new",
            "name": "New Coin",
            "current_price": 0.01
        }"#;

        let market: GeckoMarket = serde_json::from_str(json).unwrap();
        let raw = RawMarket::from(market);

        assert_eq!(raw.change_1h, None);
        assert_eq!(raw.change_24h, None);
        assert!(raw.sparkline.is_empty());
        assert_eq!(raw.market_cap, None);
    }

    #[test]
    fn decodes_global_stats() {
        let json = r#"{
            "data": {
                "active_cryptocurrencies": 17000,
                "total_market_cap": { "usd": 3400000000000, "eur": 3100000000000 },
                "total_volume": { "usd": 120000000000 },
                "market_cap_percentage": { "btc": 56.5, "eth": 12.1 },
                "market_cap_change_percentage_24h_usd": 1.8
            }
        }"#;

        let global: GeckoGlobal = serde_json::from_str(json).unwrap();
        let stats = global.data.into_stats();

        assert_eq!(stats.total_market_cap, dec!(3400000000000));
        assert_eq!(stats.btc_dominance, 56.5);
        assert_eq!(stats.eth_dominance, 12.1);
        assert_eq!(stats.active_cryptos, 17000);
        assert_eq!(stats.market_cap_change_24h, 1.8);
    }

    #[test]
    fn global_stats_tolerate_missing_currencies() {
        let json = r#"{ "data": {} }"#;

        let global: GeckoGlobal = serde_json::from_str(json).unwrap();
        let stats = global.data.into_stats();

        assert_eq!(stats.total_market_cap, Decimal::ZERO);
        assert_eq!(stats.btc_dominance, 0.0);
        assert_eq!(stats.active_cryptos, 0);
    }
}
