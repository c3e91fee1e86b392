use std::{net::SocketAddr, time::Duration};

use anyhow::Context;
use coinboard_core::markets::{
    MarketServiceConfig, DEFAULT_FRESHNESS_WINDOW, DEFAULT_UPSTREAM_TIMEOUT,
};

pub struct Config {
    pub listen_addr: SocketAddr,
    pub cors_allow: Vec<String>,
    pub request_timeout: Duration,
    pub static_dir: String,
    /// How long a fetched snapshot is served from cache (`CACHE_MS`)
    pub freshness_window: Duration,
    pub upstream_timeout: Duration,
    pub coingecko_api_key: Option<String>,
    pub coingecko_base_url: Option<String>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let listen_addr: SocketAddr = lookup("CB_LISTEN_ADDR")
            .unwrap_or_else(|| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid CB_LISTEN_ADDR")?;
        let cors_allow = lookup("CB_CORS_ALLOW_ORIGINS")
            .unwrap_or_else(|| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        let request_timeout = millis(&lookup, "CB_REQUEST_TIMEOUT_MS", Duration::from_secs(30));
        let static_dir = lookup("CB_STATIC_DIR").unwrap_or_else(|| "public".into());
        let freshness_window = millis(&lookup, "CACHE_MS", DEFAULT_FRESHNESS_WINDOW);
        let upstream_timeout = millis(&lookup, "CB_UPSTREAM_TIMEOUT_MS", DEFAULT_UPSTREAM_TIMEOUT);
        let coingecko_api_key = non_empty(lookup("COINGECKO_API_KEY"));
        let coingecko_base_url = non_empty(lookup("COINGECKO_API_URL"));

        Ok(Self {
            listen_addr,
            cors_allow,
            request_timeout,
            static_dir,
            freshness_window,
            upstream_timeout,
            coingecko_api_key,
            coingecko_base_url,
        })
    }

    pub fn market_service_config(&self) -> MarketServiceConfig {
        MarketServiceConfig {
            freshness_window: self.freshness_window,
            upstream_timeout: self.upstream_timeout,
        }
    }
}

/// Reads a millisecond duration, keeping `default` when unset or unparsable.
fn millis<F>(lookup: &F, key: &str, default: Duration) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(ms) => Duration::from_millis(ms),
            Err(_) => {
                tracing::warn!("Ignoring invalid {}={:?}, using {:?}", key, raw, default);
                default
            }
        },
        None => default,
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
