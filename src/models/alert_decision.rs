use crate::services::trend::TrendSignal;

use super::Subscription;

/// Outcome of evaluating one subscription during a scan.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertDecision {
    pub subscription_id: i64,
    pub ticker: String,
    pub current_price: f64,
    pub trailing_mean: f64,
    pub deviation_percent: f64,
    pub should_notify: bool,
}

impl AlertDecision {
    pub fn from_signal(subscription: &Subscription, signal: TrendSignal) -> Self {
        Self {
            subscription_id: subscription.id,
            ticker: subscription.ticker.clone(),
            current_price: signal.current_price,
            trailing_mean: signal.trailing_mean,
            deviation_percent: signal.deviation_percent,
            should_notify: signal.should_notify,
        }
    }
}
