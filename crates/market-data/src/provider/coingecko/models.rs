//! CoinGecko API response models.
//!
//! Only the fields of `/coins/markets` that end up in a [`MarketItem`] are
//! decoded; everything else in the payload is ignored.
//!
//! [`MarketItem`]: crate::models::MarketItem

use rust_decimal::Decimal;
use serde::Deserialize;

/// One record of the `/coins/markets` listing.
#[derive(Debug, Clone, Deserialize)]
pub struct CoinGeckoMarket {
    pub id: String,
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    #[serde(default)]
    pub market_cap: Option<Decimal>,
    /// Null for coins CoinGecko has not ranked
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<Decimal>,
}
