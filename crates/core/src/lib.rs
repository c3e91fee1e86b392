//! Coinboard Core - market snapshot caching and refresh.
//!
//! This crate decides, per display currency, whether a previously fetched
//! snapshot can be served or a fresh one must be pulled from the provider.
//! It has no HTTP surface; the server crate drives it.

pub mod markets;

// Re-export the market data types callers need alongside the service
pub use coinboard_market_data::{MarketDataError, MarketItem, Snapshot, VsCurrency};
pub use markets::{CacheStore, DataSource, MarketService, MarketServiceConfig, MarketServiceTrait};
