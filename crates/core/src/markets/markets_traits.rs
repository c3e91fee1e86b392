use async_trait::async_trait;
use coinboard_market_data::{MarketDataError, VsCurrency};

use super::markets_model::MarketsView;

#[async_trait]
pub trait MarketServiceTrait: Send + Sync {
    /// Current listing for `vs`, from cache while fresh, otherwise refreshed
    /// from the provider.
    async fn get_markets(&self, vs: VsCurrency) -> Result<MarketsView, MarketDataError>;
}
