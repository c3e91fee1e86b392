//! CoinGecko provider for crypto market listings.
//!
//! Fetches the top coins by market capitalization from the `/coins/markets`
//! endpoint, with prices already converted to the requested display currency.
//! A demo API key is sent when configured; without one the public rate limit
//! applies.

mod models;

pub use models::CoinGeckoMarket;

use async_trait::async_trait;
use chrono::Utc;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder};
use rust_decimal::Decimal;
use std::time::Duration;

use crate::errors::MarketDataError;
use crate::models::{MarketItem, Snapshot, VsCurrency};
use crate::provider::MarketDataProvider;

/// Provider ID constant
const PROVIDER_ID: &str = "COINGECKO";

/// Name used in error messages
const PROVIDER_NAME: &str = "CoinGecko";

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// Header carrying the demo-plan API key
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Number of coins requested per listing
pub const PAGE_SIZE: u32 = 30;

/// Default HTTP request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

const USER_AGENT: &str = concat!("coinboard/", env!("CARGO_PKG_VERSION"));

/// CoinGecko market listing provider.
///
/// # Example
///
/// ```ignore
/// use coinboard_market_data::CoinGeckoProvider;
///
/// let provider = CoinGeckoProvider::new(std::env::var("COINGECKO_API_KEY").ok());
/// ```
pub struct CoinGeckoProvider {
    client: Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinGeckoProvider {
    /// Create a provider against the public API. Empty keys are ignored.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            client: Self::build_client(REQUEST_TIMEOUT),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        }
    }

    /// Point the provider at a different API root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Replace the per-request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Self::build_client(timeout);
        self
    }

    fn build_client(timeout: Duration) -> Client {
        Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .unwrap_or_else(|_| Client::new())
    }

    /// Build the listing request for `vs`.
    fn markets_request(&self, vs: VsCurrency) -> RequestBuilder {
        let url = format!("{}/coins/markets", self.base_url);
        let page_size = PAGE_SIZE.to_string();
        let request = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .query(&[
                ("vs_currency", vs.as_str()),
                ("order", "market_cap_desc"),
                ("per_page", page_size.as_str()),
                ("page", "1"),
                ("price_change_percentage", "24h"),
            ]);

        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    fn transport_error(err: reqwest::Error) -> MarketDataError {
        if err.is_timeout() {
            MarketDataError::Timeout {
                provider: PROVIDER_NAME.to_string(),
            }
        } else {
            MarketDataError::from(err)
        }
    }
}

/// Normalize raw listing records into market items.
///
/// Output order equals input order. A record without a rank gets its 1-based
/// position; symbols are upper-cased, with a missing symbol read as empty.
pub fn map_records(records: Vec<CoinGeckoMarket>) -> Vec<MarketItem> {
    records
        .into_iter()
        .enumerate()
        .map(|(idx, record)| MarketItem {
            rank: record.market_cap_rank.unwrap_or(idx as u32 + 1),
            id: record.id,
            name: record.name.unwrap_or_default(),
            symbol: record.symbol.unwrap_or_default().to_uppercase(),
            image: record.image,
            price: record.current_price.unwrap_or(Decimal::ZERO),
            market_cap: record.market_cap.unwrap_or(Decimal::ZERO),
            change_24h: record.price_change_percentage_24h,
        })
        .collect()
}

#[async_trait]
impl MarketDataProvider for CoinGeckoProvider {
    fn id(&self) -> &'static str {
        PROVIDER_ID
    }

    async fn fetch_markets(&self, vs: VsCurrency) -> Result<Snapshot, MarketDataError> {
        debug!("Requesting {} market listing for {}", PROVIDER_NAME, vs);

        let response = self
            .markets_request(vs)
            .send()
            .await
            .map_err(Self::transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("{} returned HTTP {} for {}", PROVIDER_NAME, status.as_u16(), vs);
            return Err(MarketDataError::upstream(
                PROVIDER_NAME,
                status.as_u16(),
                status.canonical_reason().unwrap_or_default(),
                &body,
            ));
        }

        let fetched_at = Utc::now();
        let bytes = response.bytes().await.map_err(Self::transport_error)?;

        // A literal `null` body is treated as an empty listing
        let records: Option<Vec<CoinGeckoMarket>> =
            serde_json::from_slice(&bytes).map_err(|e| MarketDataError::InvalidResponse {
                provider: PROVIDER_NAME.to_string(),
                message: e.to_string(),
            })?;

        let items = map_records(records.unwrap_or_default());
        debug!("{} returned {} coins for {}", PROVIDER_NAME, items.len(), vs);

        Ok(Snapshot::new(items, fetched_at))
    }
}
