//! Trailing-mean trend signal.
//!
//! The latest close is compared with the mean of the sessions right before it.
//! With the default window of 7 that is the closes at offsets -8..-2 from the
//! end of the series; the latest session never contributes to its own mean.

use crate::error::TrendError;

/// Sessions averaged to build the trailing mean.
pub const DEFAULT_TRAILING_WINDOW: usize = 7;

/// Minimum rise over the trailing mean, in percent, that triggers an alert.
pub const DEFAULT_THRESHOLD_PERCENT: f64 = 1.0;

/// Largest trailing window accepted from configuration, about one trading year.
pub const MAX_TRAILING_WINDOW: usize = 250;

/// Slack on the threshold comparison. A rise of exactly 1% computes as
/// 0.9999999999999964 for closes like `[10 x 7, 10.1]`; it still alerts.
pub const THRESHOLD_EPSILON: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendConfig {
    pub trailing_window: usize,
    pub threshold_percent: f64,
}

impl Default for TrendConfig {
    fn default() -> Self {
        Self {
            trailing_window: DEFAULT_TRAILING_WINDOW,
            threshold_percent: DEFAULT_THRESHOLD_PERCENT,
        }
    }
}

impl TrendConfig {
    /// Trailing window plus the latest session.
    pub fn required_sessions(&self) -> usize {
        self.trailing_window.saturating_add(1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendSignal {
    pub current_price: f64,
    pub trailing_mean: f64,
    pub deviation_percent: f64,
    pub should_notify: bool,
}

/// Evaluates `closes` (oldest first). Only the last `required_sessions()`
/// values are read, longer series are fine.
pub fn evaluate(closes: &[f64], config: &TrendConfig) -> Result<TrendSignal, TrendError> {
    if config.trailing_window == 0 {
        return Err(TrendError::DegenerateSeries(
            "trailing window must cover at least one session".to_string(),
        ));
    }

    let needed = config.required_sessions();
    if closes.len() < needed {
        return Err(TrendError::InsufficientHistory {
            needed,
            got: closes.len(),
        });
    }

    let latest = closes.len() - 1;
    let window = &closes[latest - config.trailing_window..latest];
    let current_price = closes[latest];

    if !current_price.is_finite() || window.iter().any(|c| !c.is_finite()) {
        return Err(TrendError::DegenerateSeries(
            "series contains a non-finite close".to_string(),
        ));
    }

    let trailing_mean = window.iter().sum::<f64>() / window.len() as f64;
    if trailing_mean == 0.0 {
        return Err(TrendError::DegenerateSeries(
            "trailing mean is zero".to_string(),
        ));
    }

    let deviation_percent = 100.0 * (current_price - trailing_mean) / trailing_mean;
    if !deviation_percent.is_finite() {
        return Err(TrendError::DegenerateSeries(format!(
            "deviation is not finite (mean {trailing_mean})"
        )));
    }

    Ok(TrendSignal {
        current_price,
        trailing_mean,
        deviation_percent,
        should_notify: deviation_percent >= config.threshold_percent - THRESHOLD_EPSILON,
    })
}
