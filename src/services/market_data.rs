use async_trait::async_trait;

use crate::{error::MarketDataError, models::PriceSeries};

/// Source of daily trading history for a ticker.
#[async_trait]
pub trait MarketDataGateway: Send + Sync {
    /// Returns at most `lookback_sessions` daily closes, oldest first.
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        lookback_sessions: usize,
    ) -> Result<PriceSeries, MarketDataError>;
}
