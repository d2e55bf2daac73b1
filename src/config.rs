use std::{env, str::FromStr};

use crate::services::trend::{
    DEFAULT_THRESHOLD_PERCENT, DEFAULT_TRAILING_WINDOW, MAX_TRAILING_WINDOW,
};

#[derive(Debug, Clone)]
pub struct Settings {
    pub mongodb_uri: String,
    pub mongodb_db: String,
    pub host: String,
    pub port: u16,

    pub finnhub_api_key: String,
    pub sendgrid_api_key: String,
    pub mail_from: String,
    // log the alert instead of sending it
    pub mail_dry_run: bool,

    pub alert_threshold_percent: f64,
    pub alert_trailing_window: usize,
    pub scan_concurrency: usize,
    pub call_timeout_secs: u64,
    pub http_timeout_secs: u64,
    pub alert_scan_interval_secs: Option<u64>,
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Parses `ALERT_TRAILING_WINDOW`, bounded to `1..=MAX_TRAILING_WINDOW`.
pub fn trailing_window(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .unwrap_or(DEFAULT_TRAILING_WINDOW)
        .clamp(1, MAX_TRAILING_WINDOW)
}

pub fn load() -> Settings {
    // Loads .env if present (no crash if missing)
    dotenvy::dotenv().ok();

    let mongodb_uri = env::var("MONGODB_URI")
        .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

    let mongodb_db = env::var("MONGODB_DB")
        .unwrap_or_else(|_| "stockwatch".to_string());

    let host = env::var("HOST")
        .unwrap_or_else(|_| "127.0.0.1".to_string());

    let port = env_or("PORT", 3000u16);

    let finnhub_api_key = env::var("FINNHUB_API_KEY").unwrap_or_default();
    let sendgrid_api_key = env::var("SENDGRID_API_KEY").unwrap_or_default();
    let mail_from = env::var("MAIL_FROM").unwrap_or_else(|_| "alerts@example.com".to_string());
    let mail_dry_run = env_or("MAIL_DRY_RUN", false);

    let alert_threshold_percent = env_or("ALERT_THRESHOLD_PERCENT", DEFAULT_THRESHOLD_PERCENT);
    let alert_trailing_window = trailing_window(env::var("ALERT_TRAILING_WINDOW").ok().as_deref());
    let scan_concurrency = env_or("SCAN_CONCURRENCY", 4usize).max(1);
    let call_timeout_secs = env_or("CALL_TIMEOUT_SECS", 20u64);
    let http_timeout_secs = env_or("HTTP_TIMEOUT_SECS", 15u64);

    let alert_scan_interval_secs = env::var("ALERT_SCAN_INTERVAL_SECS")
        .ok()
        .and_then(|s| s.trim().parse::<u64>().ok())
        .filter(|secs| *secs > 0);

    Settings {
        mongodb_uri,
        mongodb_db,
        host,
        port,
        finnhub_api_key,
        sendgrid_api_key,
        mail_from,
        mail_dry_run,
        alert_threshold_percent,
        alert_trailing_window,
        scan_concurrency,
        call_timeout_secs,
        http_timeout_secs,
        alert_scan_interval_secs,
    }
}
