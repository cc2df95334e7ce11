//! crypto-intel HTTP Server
//!
//! Axum-based server exposing the cached market snapshot with
//! momentum-derived trading signals to the dashboard frontend.

mod handlers;
mod state;

use std::sync::Arc;
use std::time::Duration;

use axum::{Router, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use market_intel::{CoinGeckoProvider, MarketDataProvider, MockProvider, SnapshotCache};

use crate::handlers::{health_check, markets_handler};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    // Initialize the market-data provider
    let provider: Arc<dyn MarketDataProvider> =
        match std::env::var("MARKET_PROVIDER").as_deref() {
            Ok("mock") => {
                tracing::warn!("⚠ Using mock market data");
                tracing::warn!("  Set MARKET_PROVIDER=coingecko for live prices");
                Arc::new(MockProvider::new())
            }
            _ => match std::env::var("COINGECKO_API_URL") {
                Ok(url) => Arc::new(CoinGeckoProvider::with_base_url(url)),
                Err(_) => Arc::new(CoinGeckoProvider::new()),
            },
        };

    let ttl = std::env::var("CACHE_TTL_SECS")
        .ok()
        .and_then(|v| v.parse::<u64>().ok())
        .map_or(market_intel::cache::DEFAULT_TTL, Duration::from_secs);

    tracing::info!(
        "✓ Market provider: {} (snapshot TTL {}s)",
        provider.name(),
        ttl.as_secs()
    );

    // Build application state
    let state = AppState {
        cache: Arc::new(SnapshotCache::with_ttl(provider, ttl)),
    };

    // CORS configuration (the snapshot is consumed by a browser frontend)
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build router
    let app = Router::new()
        .route("/health", get(health_check))
        .route("/api/markets", get(markets_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("🚀 crypto-intel server running on http://{}", addr);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health       - Health check");
    tracing::info!("  GET  /api/markets  - Market snapshot with signals");
    tracing::info!("");

    axum::serve(listener, app).await?;

    Ok(())
}
