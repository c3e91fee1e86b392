use std::sync::Arc;

use coinboard_core::markets::{CacheStore, MarketService, MarketServiceTrait};
use coinboard_market_data::{CoinGeckoProvider, MarketDataProvider};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::Config;

pub struct AppState {
    pub market_service: Arc<dyn MarketServiceTrait>,
}

impl AppState {
    pub fn new(market_service: Arc<dyn MarketServiceTrait>) -> Self {
        Self { market_service }
    }
}

pub fn init_tracing() {
    let log_format = std::env::var("CB_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let mut provider = CoinGeckoProvider::new(config.coingecko_api_key.clone())
        .with_timeout(config.upstream_timeout);
    if let Some(base_url) = &config.coingecko_base_url {
        tracing::info!("Using market data endpoint {}", base_url);
        provider = provider.with_base_url(base_url.as_str());
    }
    if config.coingecko_api_key.is_none() {
        tracing::info!("COINGECKO_API_KEY not set, using the public rate limit");
    }
    let provider: Arc<dyn MarketDataProvider> = Arc::new(provider);

    // One cache for the whole process; it lives as long as the state does
    let cache = Arc::new(CacheStore::new());
    let service_config = config.market_service_config();
    tracing::info!(
        "Market snapshots cached for {:?}, upstream timeout {:?}",
        service_config.freshness_window,
        service_config.upstream_timeout
    );
    let market_service: Arc<dyn MarketServiceTrait> =
        Arc::new(MarketService::new(provider, cache, service_config));

    Ok(Arc::new(AppState::new(market_service)))
}
