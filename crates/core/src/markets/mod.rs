//! Market snapshot module - cache, service, and traits.
//!
//! ```text
//! MarketService ──► CacheStore (read) ──[miss/stale]──► MarketDataProvider
//!       │                                                      │
//!       └──────────── CacheStore (write) ◄─────────────────────┘
//! ```
//!
//! The cache and the provider know nothing about each other; the service
//! owns the freshness decision and the per-currency refresh locks.

mod markets_cache;
mod markets_model;
mod markets_service;
mod markets_traits;


pub use markets_cache::CacheStore;
pub use markets_model::{
    DataSource, MarketServiceConfig, MarketsView, DEFAULT_FRESHNESS_WINDOW,
    DEFAULT_UPSTREAM_TIMEOUT,
};
pub use markets_service::{Clock, MarketService};
pub use markets_traits::MarketServiceTrait;
