//! Market Data Model
//!
//! Wire types for the market snapshot served to the dashboard. Field
//! names serialize in camelCase to match what the frontend consumes.
//! Uses `rust_decimal` for all monetary magnitudes - never use f64 for
//! money! Percentages stay f64.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::provider::RawMarket;
use crate::signal::{PriceChanges, Signal, derive_signal};

/// How many leading assets feed the sentiment average.
const SENTIMENT_SAMPLE: usize = 20;

/// A single asset in the market snapshot, annotated with its signal.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetQuote {
    /// Provider-side asset identifier (e.g. "bitcoin")
    pub id: String,

    /// Ticker symbol, uppercased (e.g. "BTC")
    pub symbol: String,

    /// Full name (e.g. "Bitcoin")
    pub name: String,

    /// Logo URL
    pub image: Option<String>,

    /// Current price in USD
    pub price: Decimal,

    /// Market capitalization
    pub market_cap: Option<Decimal>,

    /// 24-hour trading volume
    pub volume: Option<Decimal>,

    /// 1-hour change percentage (0 when the provider had none)
    pub change_1h: f64,

    /// 24-hour change percentage
    pub change_24h: f64,

    /// 7-day change percentage
    pub change_7d: f64,

    /// Market-cap rank
    pub rank: Option<u32>,

    /// Derived trading signal
    pub signal: Signal,

    /// Raw score behind the signal
    pub signal_strength: i32,

    /// 7-day price sparkline
    pub sparkline: Vec<f64>,

    pub high_24h: Option<Decimal>,
    pub low_24h: Option<Decimal>,

    /// All-time high
    pub ath: Option<Decimal>,

    /// Percent distance from the all-time high
    pub ath_change_percent: Option<f64>,

    pub circulating_supply: Option<Decimal>,
    pub total_supply: Option<Decimal>,
    pub max_supply: Option<Decimal>,
}

impl AssetQuote {
    /// Build a quote from a provider record, deriving its signal from
    /// the momentum percentages.
    pub fn from_raw(raw: RawMarket) -> Self {
        let changes = PriceChanges {
            h1: raw.change_1h,
            h24: raw.change_24h,
            d7: raw.change_7d,
        };
        let reading = derive_signal(&changes);

        Self {
            id: raw.id,
            symbol: raw.symbol.to_uppercase(),
            name: raw.name,
            image: raw.image,
            price: raw.price.unwrap_or(Decimal::ZERO),
            market_cap: raw.market_cap,
            volume: raw.volume,
            change_1h: raw.change_1h.unwrap_or(0.0),
            change_24h: raw.change_24h.unwrap_or(0.0),
            change_7d: raw.change_7d.unwrap_or(0.0),
            rank: raw.rank,
            signal: reading.signal,
            signal_strength: reading.strength,
            sparkline: raw.sparkline,
            high_24h: raw.high_24h,
            low_24h: raw.low_24h,
            ath: raw.ath,
            ath_change_percent: raw.ath_change_percent,
            circulating_supply: raw.circulating_supply,
            total_supply: raw.total_supply,
            max_supply: raw.max_supply,
        }
    }
}

/// Global market aggregates.
///
/// Zeroed defaults are served when the provider's global endpoint fails;
/// only the asset list is fatal to a refresh.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketStats {
    pub total_market_cap: Decimal,
    pub total_volume: Decimal,
    pub btc_dominance: f64,
    pub eth_dominance: f64,
    pub active_cryptos: u32,
    pub market_cap_change_24h: f64,
}

/// Aggregate market mood derived from the leading assets' 24h momentum.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MarketSentiment {
    Bullish,
    #[serde(rename = "Slightly Bullish")]
    SlightlyBullish,
    Neutral,
    #[serde(rename = "Slightly Bearish")]
    SlightlyBearish,
    Bearish,
}

impl MarketSentiment {
    /// Classify from the average 24h change of the leading assets,
    /// returning the label and its 0-100 score.
    pub fn from_average_change(avg: f64) -> (Self, u8) {
        if avg > 5.0 {
            (Self::Bullish, 75)
        } else if avg > 2.0 {
            (Self::Bullish, 65)
        } else if avg > 0.0 {
            (Self::SlightlyBullish, 55)
        } else if avg < -5.0 {
            (Self::Bearish, 25)
        } else if avg < -2.0 {
            (Self::Bearish, 35)
        } else if avg < 0.0 {
            (Self::SlightlyBearish, 45)
        } else {
            (Self::Neutral, 50)
        }
    }
}

/// One fully-assembled market snapshot.
///
/// Immutable once built; the refresh cache replaces it wholesale so
/// consumers never observe a partially updated mix.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketSnapshot {
    pub cryptos: Vec<AssetQuote>,
    pub market_stats: MarketStats,
    pub sentiment: MarketSentiment,
    pub sentiment_score: u8,
    pub last_updated: DateTime<Utc>,
}

impl MarketSnapshot {
    /// Assemble a snapshot from provider records, running every asset's
    /// momentum figures through the signal engine.
    pub fn assemble(markets: Vec<RawMarket>, stats: MarketStats, as_of: DateTime<Utc>) -> Self {
        let cryptos: Vec<AssetQuote> = markets.into_iter().map(AssetQuote::from_raw).collect();

        let sample = &cryptos[..cryptos.len().min(SENTIMENT_SAMPLE)];
        let avg_change = if sample.is_empty() {
            0.0
        } else {
            sample.iter().map(|c| c.change_24h).sum::<f64>() / sample.len() as f64
        };
        let (sentiment, sentiment_score) = MarketSentiment::from_average_change(avg_change);

        Self {
            cryptos,
            market_stats: stats,
            sentiment,
            sentiment_score,
            last_updated: as_of,
        }
    }
}
