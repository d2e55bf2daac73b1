//! One pass over every enabled subscription.
//!
//! Loading the subscriptions is the only step allowed to fail the run. Every
//! later failure (unknown ticker, provider outage, short or degenerate
//! history, rejected email) is logged and confined to its own subscription.
//! Emails already sent stay sent if the process dies mid-run.

use std::{sync::Arc, time::Duration};

use chrono::Utc;
use futures_util::{stream, StreamExt};
use serde::Serialize;
use tokio::time::timeout;
use tracing::{debug, error, info, info_span, warn, Instrument};

use crate::{
    config::Settings,
    error::StoreError,
    models::{AlertDecision, EnabledSubscription},
};

use super::{
    market_data::MarketDataGateway,
    notifier::{self, Notifier},
    subscription_store::SubscriptionStore,
    trend::{self, TrendConfig},
};

#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub trend: TrendConfig,
    // subscriptions evaluated at once
    pub concurrency: usize,
    // per gateway fetch and per email send
    pub call_timeout: Duration,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            trend: TrendConfig::default(),
            concurrency: 4,
            call_timeout: Duration::from_secs(20),
        }
    }
}

impl ScanOptions {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            trend: TrendConfig {
                trailing_window: settings.alert_trailing_window,
                threshold_percent: settings.alert_threshold_percent,
            },
            concurrency: settings.scan_concurrency.max(1),
            call_timeout: Duration::from_secs(settings.call_timeout_secs),
        }
    }
}

/// Handles a scan needs, built once by the caller and passed down.
#[derive(Clone)]
pub struct ScanContext {
    pub store: Arc<dyn SubscriptionStore>,
    pub market: Arc<dyn MarketDataGateway>,
    pub notifier: Arc<dyn Notifier>,
    pub options: ScanOptions,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    Notified,
    BelowThreshold,
    MarketDataFailed,
    SeriesRejected,
    DeliveryFailed,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanReport {
    pub run_id: i64,
    pub scanned: usize,
    pub skipped_disabled: usize,
    pub notified: usize,
    pub below_threshold: usize,
    pub market_data_failures: usize,
    pub series_failures: usize,
    pub delivery_failures: usize,
}

impl ScanReport {
    fn record(&mut self, outcome: ScanOutcome) {
        match outcome {
            ScanOutcome::Notified => self.notified += 1,
            ScanOutcome::BelowThreshold => self.below_threshold += 1,
            ScanOutcome::MarketDataFailed => self.market_data_failures += 1,
            ScanOutcome::SeriesRejected => self.series_failures += 1,
            ScanOutcome::DeliveryFailed => self.delivery_failures += 1,
        }
    }
}

pub async fn run_alert_scan(ctx: &ScanContext) -> Result<ScanReport, StoreError> {
    let run_id = Utc::now().timestamp_millis();

    scan(ctx, run_id)
        .instrument(info_span!("alert_scan", run_id))
        .await
}

async fn scan(ctx: &ScanContext, run_id: i64) -> Result<ScanReport, StoreError> {
    info!("alert scan started");

    let pairs = ctx.store.enabled_subscriptions().await.map_err(|e| {
        error!(error = %e, "could not load enabled subscriptions, aborting scan");
        e
    })?;

    // disabled rows never reach the evaluator
    let (enabled, disabled): (Vec<_>, Vec<_>) =
        pairs.into_iter().partition(|p| p.subscription.enabled);

    for pair in &disabled {
        debug!(subscription_id = pair.subscription.id, "subscription disabled, skipping");
    }

    let mut report = ScanReport {
        run_id,
        scanned: enabled.len(),
        skipped_disabled: disabled.len(),
        ..Default::default()
    };

    let outcomes: Vec<ScanOutcome> = stream::iter(enabled)
        .map(|pair| async move { process_subscription(ctx, &pair).await })
        .buffer_unordered(ctx.options.concurrency.max(1))
        .collect()
        .await;

    for outcome in outcomes {
        report.record(outcome);
    }

    info!(
        scanned = report.scanned,
        notified = report.notified,
        below_threshold = report.below_threshold,
        market_data_failures = report.market_data_failures,
        series_failures = report.series_failures,
        delivery_failures = report.delivery_failures,
        "alert scan completed"
    );

    Ok(report)
}

pub async fn process_subscription(ctx: &ScanContext, pair: &EnabledSubscription) -> ScanOutcome {
    let sub = &pair.subscription;
    let span = info_span!("subscription", subscription_id = sub.id, ticker = %sub.ticker);

    async move {
        let lookback = ctx.options.trend.required_sessions();

        let fetch = ctx.market.fetch_daily_history(&sub.ticker, lookback);
        let series = match timeout(ctx.options.call_timeout, fetch).await {
            Ok(Ok(series)) => series,
            Ok(Err(e)) => {
                warn!(error = %e, "market data fetch failed, skipping");
                return ScanOutcome::MarketDataFailed;
            }
            Err(_) => {
                warn!(timeout = ?ctx.options.call_timeout, "market data fetch timed out, skipping");
                return ScanOutcome::MarketDataFailed;
            }
        };

        let signal = match trend::evaluate(&series.closes(), &ctx.options.trend) {
            Ok(signal) => signal,
            Err(e) => {
                warn!(error = %e, "cannot evaluate price series, skipping");
                return ScanOutcome::SeriesRejected;
            }
        };

        let decision = AlertDecision::from_signal(sub, signal);
        if !decision.should_notify {
            debug!(
                deviation_percent = decision.deviation_percent,
                "below threshold"
            );
            return ScanOutcome::BelowThreshold;
        }

        let message = notifier::compose_alert(&decision);
        let send = ctx
            .notifier
            .send(&pair.user.email, &message.subject, &message.body);

        match timeout(ctx.options.call_timeout, send).await {
            Ok(Ok(())) => {
                info!(
                    user_id = pair.user.id,
                    deviation_percent = decision.deviation_percent,
                    "alert sent"
                );
                ScanOutcome::Notified
            }
            Ok(Err(e)) => {
                warn!(error = %e, user_id = pair.user.id, "alert delivery failed");
                ScanOutcome::DeliveryFailed
            }
            Err(_) => {
                warn!(user_id = pair.user.id, "alert delivery timed out");
                ScanOutcome::DeliveryFailed
            }
        }
    }
    .instrument(span)
    .await
}
