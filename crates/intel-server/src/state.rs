//! Application State

use std::sync::Arc;

use market_intel::SnapshotCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// One-slot market snapshot cache over the configured provider
    pub cache: Arc<SnapshotCache>,
}
