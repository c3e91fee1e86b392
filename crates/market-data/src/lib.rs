//! Coinboard Market Data Crate
//!
//! Fetches crypto market listings from an upstream provider and normalizes
//! them into a stable shape.
//!
//! # Overview
//!
//! ```text
//!   VsCurrency  ──►  MarketDataProvider  ──►  Snapshot
//!  (allow-list)       (CoinGecko, ...)        (ranked MarketItems + fetch time)
//! ```
//!
//! # Core Types
//!
//! - [`VsCurrency`] - Supported display currencies
//! - [`MarketItem`] - One coin's rank, price, market cap and 24h change
//! - [`Snapshot`] - Ordered items plus the instant they were fetched
//! - [`MarketDataError`] - Validation and upstream failure classification

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{MarketItem, Snapshot, VsCurrency};
pub use provider::coingecko::CoinGeckoProvider;
pub use provider::MarketDataProvider;
