use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use coinboard_market_data::{MarketItem, Snapshot, VsCurrency};
use serde::{Deserialize, Serialize};

/// Default freshness window for cached snapshots.
pub const DEFAULT_FRESHNESS_WINDOW: Duration = Duration::from_millis(60_000);

/// Default deadline for a single upstream fetch.
pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(10);

/// Tuning for [`MarketService`](super::MarketService).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarketServiceConfig {
    /// A snapshot younger than this is served from cache
    pub freshness_window: Duration,
    /// Upstream fetches running longer than this fail as timeouts
    pub upstream_timeout: Duration,
}

impl Default for MarketServiceConfig {
    fn default() -> Self {
        Self {
            freshness_window: DEFAULT_FRESHNESS_WINDOW,
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }
}

/// Where the returned snapshot came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Cache,
    Live,
}

/// Result of a market lookup: a snapshot tagged with its currency and origin.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketsView {
    pub vs: VsCurrency,
    pub source: DataSource,
    pub last_updated: DateTime<Utc>,
    pub items: Arc<[MarketItem]>,
}

impl MarketsView {
    pub fn new(vs: VsCurrency, source: DataSource, snapshot: Snapshot) -> Self {
        Self {
            vs,
            source,
            last_updated: snapshot.fetched_at,
            items: snapshot.items,
        }
    }
}
