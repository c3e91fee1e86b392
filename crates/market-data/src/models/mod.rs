//! Market data models
//!
//! This module contains the core data types for market data operations:
//! - `currency` - The display currency allow-list (VsCurrency)
//! - `market` - Normalized market rows and fetched snapshots (MarketItem, Snapshot)

mod currency;
mod market;

pub use currency::VsCurrency;
pub use market::{MarketItem, Snapshot};
