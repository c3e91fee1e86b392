use std::sync::Arc;

use chrono::SecondsFormat;
use coinboard_core::markets::{DataSource, MarketsView};
use coinboard_market_data::{MarketItem, VsCurrency};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct MarketsQuery {
    pub vs: Option<String>,
}

/// Body of a successful `GET /api/markets`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketsResponse {
    pub vs: VsCurrency,
    pub source: DataSource,
    /// ISO-8601 with millisecond precision, e.g. `2024-05-01T12:00:00.000Z`
    pub last_updated: String,
    pub items: Arc<[MarketItem]>,
}

impl From<MarketsView> for MarketsResponse {
    fn from(view: MarketsView) -> Self {
        Self {
            vs: view.vs,
            source: view.source,
            last_updated: view
                .last_updated
                .to_rfc3339_opts(SecondsFormat::Millis, true),
            items: view.items,
        }
    }
}
