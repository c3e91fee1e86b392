//! Market data provider trait definitions.
//!
//! This module defines the core `MarketDataProvider` trait that all
//! market data providers must implement.

use async_trait::async_trait;

use crate::errors::MarketDataError;
use crate::models::{Snapshot, VsCurrency};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source, or to
/// stand in for the real one in tests.
///
/// # Example
///
/// ```ignore
/// use async_trait::async_trait;
/// use coinboard_market_data::{MarketDataError, MarketDataProvider, Snapshot, VsCurrency};
///
/// struct FixedProvider(Snapshot);
///
/// #[async_trait]
/// impl MarketDataProvider for FixedProvider {
///     fn id(&self) -> &'static str {
///         "FIXED"
///     }
///
///     async fn fetch_markets(&self, _vs: VsCurrency) -> Result<Snapshot, MarketDataError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "COINGECKO". Used for logging.
    fn id(&self) -> &'static str;

    /// Fetch the current market listing priced in `vs`.
    ///
    /// # Returns
    ///
    /// A snapshot whose items keep the provider's ranking order, or a
    /// `MarketDataError` describing why the listing could not be fetched.
    async fn fetch_markets(&self, vs: VsCurrency) -> Result<Snapshot, MarketDataError>;
}
