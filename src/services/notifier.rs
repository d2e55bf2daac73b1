use async_trait::async_trait;
use tracing::info;

use crate::{error::DeliveryError, models::AlertDecision};

/// Outbound email channel. Delivery is best effort: a failed send is reported
/// once and never retried within the same scan.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, to_email: &str, subject: &str, body: &str) -> Result<(), DeliveryError>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlertMessage {
    pub subject: String,
    pub body: String,
}

pub fn compose_alert(decision: &AlertDecision) -> AlertMessage {
    let subject = format!(
        "[Alert] {} rose {:.2}%",
        decision.ticker, decision.deviation_percent
    );

    let body = format!(
        "{ticker} closed at {current:.2}, {dev:.2}% above its trailing average of {mean:.2}.\n\n\
         You are receiving this because you subscribed to price alerts for {ticker}.\n",
        ticker = decision.ticker,
        current = decision.current_price,
        dev = decision.deviation_percent,
        mean = decision.trailing_mean,
    );

    AlertMessage { subject, body }
}

/// Writes alerts to the log instead of sending them.
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, to_email: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        info!(to = to_email, subject, body, "dry run: alert email not sent");
        Ok(())
    }
}
