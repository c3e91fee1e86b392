//! Shared fixtures for server integration tests.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Method, Request, Response},
    Router,
};
use chrono::Utc;
use coinboard_core::markets::{CacheStore, MarketService, MarketServiceConfig};
use coinboard_market_data::{MarketDataError, MarketDataProvider, MarketItem, Snapshot, VsCurrency};
use coinboard_server::{api::app_router, config::Config, AppState};
use rust_decimal_macros::dec;
use tower::ServiceExt;

/// Provider double that counts calls and can be switched to fail or slowed down.
pub struct StubProvider {
    calls: AtomicUsize,
    fail_with: Mutex<Option<u16>>,
    delay: Mutex<Duration>,
}

impl StubProvider {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            fail_with: Mutex::new(None),
            delay: Mutex::new(Duration::ZERO),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn fail_with(&self, status: Option<u16>) {
        *self.fail_with.lock().unwrap() = status;
    }

    pub fn delay_by(&self, delay: Duration) {
        *self.delay.lock().unwrap() = delay;
    }
}

#[async_trait]
impl MarketDataProvider for StubProvider {
    fn id(&self) -> &'static str {
        "STUB"
    }

    async fn fetch_markets(&self, vs: VsCurrency) -> Result<Snapshot, MarketDataError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let delay = *self.delay.lock().unwrap();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        if let Some(status) = *self.fail_with.lock().unwrap() {
            return Err(MarketDataError::upstream(
                "CoinGecko",
                status,
                "Too Many Requests",
                "You've exceeded the Rate Limit.",
            ));
        }
        let scale = match vs {
            VsCurrency::Usd => dec!(1),
            VsCurrency::Krw => dec!(1350),
        };
        let items = vec![
            MarketItem {
                rank: 1,
                id: "bitcoin".into(),
                name: "Bitcoin".into(),
                symbol: "BTC".into(),
                image: Some("https://img.example/btc.png".into()),
                price: dec!(64000) * scale,
                market_cap: dec!(1260000000000) * scale,
                change_24h: Some(dec!(2.1)),
            },
            MarketItem {
                rank: 2,
                id: "ethereum".into(),
                name: "Ethereum".into(),
                symbol: "ETH".into(),
                image: Some("https://img.example/eth.png".into()),
                price: dec!(3100) * scale,
                market_cap: dec!(372000000000) * scale,
                change_24h: None,
            },
        ];
        Ok(Snapshot::new(items, Utc::now()))
    }
}

pub struct TestApp {
    pub router: Router,
    pub provider: Arc<StubProvider>,
    pub cache: Arc<CacheStore>,
}

pub fn default_config() -> Config {
    Config::from_lookup(|_| None).unwrap()
}

pub fn test_app(freshness_window: Duration) -> TestApp {
    let provider = StubProvider::new();
    let cache = Arc::new(CacheStore::new());
    let service = MarketService::new(
        provider.clone(),
        cache.clone(),
        MarketServiceConfig {
            freshness_window,
            ..MarketServiceConfig::default()
        },
    );
    let state = Arc::new(AppState::new(Arc::new(service)));
    TestApp {
        router: app_router(state, &default_config()),
        provider,
        cache,
    }
}

pub async fn send(router: &Router, method: Method, uri: &str) -> Response<Body> {
    router
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
