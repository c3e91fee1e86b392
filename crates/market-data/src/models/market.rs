use std::sync::Arc;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One asset's row in a market snapshot.
///
/// Prices and market caps are already expressed in the snapshot's display
/// currency; no conversion happens in this crate.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MarketItem {
    /// Position by market cap, 1-based
    pub rank: u32,

    /// Provider's stable coin identifier (e.g. "bitcoin")
    pub id: String,

    /// Display name
    pub name: String,

    /// Ticker symbol, always upper-case
    pub symbol: String,

    /// Logo URL
    pub image: Option<String>,

    /// Current price
    pub price: Decimal,

    /// Market capitalization
    pub market_cap: Decimal,

    /// 24 hour price change in percent; consumers treat `None` as zero
    pub change_24h: Option<Decimal>,
}

/// An ordered set of market items and the instant they were fetched.
///
/// Items keep the provider's ranking order. The item list is shared, so
/// cloning a snapshot out of the cache does not copy the rows.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    pub items: Arc<[MarketItem]>,
    pub fetched_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(items: Vec<MarketItem>, fetched_at: DateTime<Utc>) -> Self {
        Self {
            items: items.into(),
            fetched_at,
        }
    }

    /// Age of the snapshot at `now`. Negative ages (clock skew) count as zero.
    pub fn age(&self, now: DateTime<Utc>) -> std::time::Duration {
        (now - self.fetched_at).to_std().unwrap_or_default()
    }

    /// True while `now - fetched_at` is strictly below `window`.
    pub fn is_fresh(&self, now: DateTime<Utc>, window: std::time::Duration) -> bool {
        self.age(now) < window
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
