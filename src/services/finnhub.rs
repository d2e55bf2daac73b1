use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    error::MarketDataError,
    models::{PricePoint, PriceSeries},
};

use super::market_data::MarketDataGateway;

pub const FINNHUB_BASE_URL: &str = "https://finnhub.io/api/v1";

#[derive(Clone)]
pub struct FinnhubClient {
    http: Client,
    api_key: String,
    base_url: String,
}

impl FinnhubClient {
    pub fn new(api_key: String, timeout: Duration) -> Self {
        Self::with_base_url(api_key, FINNHUB_BASE_URL.to_string(), timeout)
    }

    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> Self {
        let http = match Client::builder().timeout(timeout).build() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "finnhub http client without timeout, builder failed");
                Client::new()
            }
        };

        Self {
            http,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    pub async fn daily_candles(
        &self,
        symbol: &str,
        from: i64,
        to: i64,
    ) -> Result<CandleResponse, MarketDataError> {
        if !self.has_key() {
            return Err(MarketDataError::UpstreamUnavailable(
                "FINNHUB_API_KEY is missing in .env".to_string(),
            ));
        }

        let url = format!("{}/stock/candle", self.base_url);
        let res = self
            .http
            .get(url)
            .query(&[
                ("symbol", symbol.to_string()),
                ("resolution", "D".to_string()),
                ("from", from.to_string()),
                ("to", to.to_string()),
                ("token", self.api_key.clone()),
            ])
            .send()
            .await
            .map_err(|e| MarketDataError::UpstreamUnavailable(e.to_string()))?;

        let status = res.status();
        if status == StatusCode::NOT_FOUND {
            return Err(MarketDataError::NotFound(symbol.to_string()));
        }
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(MarketDataError::UpstreamUnavailable(format!(
                "Finnhub candle failed: {status} {body}"
            )));
        }

        res.json::<CandleResponse>()
            .await
            .map_err(|e| MarketDataError::UpstreamUnavailable(e.to_string()))
    }
}

/// Calendar days to request so that `sessions` trading days survive weekends
/// and market holidays.
pub fn history_window_days(sessions: usize) -> i64 {
    i64::try_from(sessions)
        .unwrap_or(i64::MAX)
        .saturating_mul(2)
        .saturating_add(7)
}

#[async_trait]
impl MarketDataGateway for FinnhubClient {
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        lookback_sessions: usize,
    ) -> Result<PriceSeries, MarketDataError> {
        let to = Utc::now().timestamp();
        let from = to.saturating_sub(history_window_days(lookback_sessions).saturating_mul(86_400));

        let candles = self.daily_candles(ticker, from, to).await?;
        let series = candles.into_series(ticker, lookback_sessions)?;

        debug!(ticker, sessions = series.points.len(), "fetched daily history");
        Ok(series)
    }
}

/// Raw `/stock/candle` payload. Every field is optional so a short or
/// malformed body is reported as a missing ticker instead of a decode error.
#[derive(Debug, Deserialize)]
pub struct CandleResponse {
    // "ok" | "no_data"
    #[serde(rename = "s")]
    pub status: Option<String>,

    // closes
    #[serde(rename = "c")]
    pub close: Option<Vec<f64>>,

    // session timestamps
    #[serde(rename = "t")]
    pub timestamp: Option<Vec<i64>>,
}

impl CandleResponse {
    pub fn into_series(
        self,
        ticker: &str,
        lookback_sessions: usize,
    ) -> Result<PriceSeries, MarketDataError> {
        let not_found = |why: &str| MarketDataError::NotFound(format!("{ticker}: {why}"));

        match self.status.as_deref() {
            Some("ok") => {}
            Some("no_data") => return Err(not_found("no data")),
            Some(other) => return Err(not_found(&format!("unexpected status {other:?}"))),
            None => return Err(not_found("missing status")),
        }

        let closes = self.close.ok_or_else(|| not_found("missing closes"))?;
        let stamps = self.timestamp.ok_or_else(|| not_found("missing timestamps"))?;
        if closes.len() != stamps.len() {
            return Err(not_found("closes and timestamps differ in length"));
        }

        let mut points: Vec<PricePoint> = stamps
            .into_iter()
            .zip(closes)
            .map(|(timestamp, close)| PricePoint { timestamp, close })
            .collect();
        points.sort_by_key(|p| p.timestamp);

        if points.len() > lookback_sessions {
            points.drain(..points.len() - lookback_sessions);
        }

        Ok(PriceSeries {
            ticker: ticker.to_string(),
            points,
        })
    }
}
