use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use coinboard_market_data::{MarketDataError, MarketDataProvider, Snapshot, VsCurrency};

use super::markets_cache::CacheStore;
use super::markets_model::{DataSource, MarketServiceConfig, MarketsView};
use super::markets_traits::MarketServiceTrait;

/// Source of the current wall-clock time.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Per-currency refresh state.
#[derive(Default)]
struct RefreshSlot {
    /// Refresh attempts finished so far, bumped while `last_failure` is held.
    completed: AtomicU64,
    /// Outcome of the latest attempt when it failed.
    last_failure: Mutex<Option<MarketDataError>>,
}

/// Serves market snapshots from the cache and refreshes them from the
/// provider once they go stale.
///
/// Each currency has its own refresh lock held across the whole
/// read-decide-fetch-write sequence, so concurrent misses for one key
/// produce a single upstream call. Callers that queued behind an attempt
/// share its outcome: the new snapshot from cache, or the same error.
pub struct MarketService {
    provider: Arc<dyn MarketDataProvider>,
    cache: Arc<CacheStore>,
    config: MarketServiceConfig,
    refresh_slots: HashMap<VsCurrency, RefreshSlot>,
    clock: Clock,
}

impl MarketService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        cache: Arc<CacheStore>,
        config: MarketServiceConfig,
    ) -> Self {
        let refresh_slots = VsCurrency::ALL
            .into_iter()
            .map(|vs| (vs, RefreshSlot::default()))
            .collect();

        Self {
            provider,
            cache,
            config,
            refresh_slots,
            clock: Arc::new(Utc::now),
        }
    }

    /// Replaces the wall clock used for freshness decisions (for testing).
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    /// Fetch from the provider under the configured deadline.
    async fn fetch_with_timeout(&self, vs: VsCurrency) -> Result<Snapshot, MarketDataError> {
        match tokio::time::timeout(self.config.upstream_timeout, self.provider.fetch_markets(vs))
            .await
        {
            Ok(result) => result,
            Err(_) => Err(MarketDataError::Timeout {
                provider: self.provider.id().to_string(),
            }),
        }
    }
}

#[async_trait]
impl MarketServiceTrait for MarketService {
    async fn get_markets(&self, vs: VsCurrency) -> Result<MarketsView, MarketDataError> {
        // Every allow-listed currency has a slot
        let slot = &self.refresh_slots[&vs];
        let seen = slot.completed.load(Ordering::SeqCst);
        let mut last_failure = slot.last_failure.lock().await;

        if let Some(snapshot) = self.cache.get(vs) {
            let now = (self.clock)();
            if snapshot.is_fresh(now, self.config.freshness_window) {
                debug!(
                    "Serving cached {} snapshot ({} items, age {:?})",
                    vs,
                    snapshot.len(),
                    snapshot.age(now)
                );
                return Ok(MarketsView::new(vs, DataSource::Cache, snapshot));
            }
            debug!("Cached {} snapshot is stale", vs);
        }

        if slot.completed.load(Ordering::SeqCst) != seen {
            if let Some(err) = last_failure.as_ref() {
                debug!("Reusing failed {} refresh for a waiting request", vs);
                return Err(err.clone());
            }
        }

        info!("Refreshing {} snapshot from {}", vs, self.provider.id());
        let result = self.fetch_with_timeout(vs).await;
        slot.completed.fetch_add(1, Ordering::SeqCst);

        match result {
            Ok(snapshot) => {
                *last_failure = None;
                self.cache.put(vs, snapshot.clone());
                Ok(MarketsView::new(vs, DataSource::Live, snapshot))
            }
            Err(err) => {
                warn!("Refreshing {} snapshot failed: {}", vs, err);
                *last_failure = Some(err.clone());
                Err(err)
            }
        }
    }
}
