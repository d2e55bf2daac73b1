//! Library entrypoint for StockWatch.
//!
//! Both binaries (the HTTP server and the one-shot `alert_scan`) and the
//! integration tests under `tests/` build on the items exported here.

use std::{sync::Arc, time::Duration};

pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;

pub mod services;

pub mod controllers;
pub mod routes;

use services::{
    alert_scan::{ScanContext, ScanOptions},
    finnhub::FinnhubClient,
    notifier::{LogNotifier, Notifier},
    sendgrid::SendGridClient,
    subscription_store::MongoSubscriptionStore,
};

#[derive(Clone)]
pub struct AppState {
    pub db: mongodb::Database,
    pub settings: config::Settings,
    pub scan: Arc<ScanContext>,
}

impl AppState {
    pub fn new(db: mongodb::Database, settings: config::Settings) -> Self {
        let scan = Arc::new(build_scan_context(&db, &settings));
        Self { db, settings, scan }
    }
}

/// Wires the production store, Finnhub and the configured mailer.
pub fn build_scan_context(db: &mongodb::Database, settings: &config::Settings) -> ScanContext {
    let http_timeout = Duration::from_secs(settings.http_timeout_secs);

    let notifier: Arc<dyn Notifier> = if settings.mail_dry_run {
        Arc::new(LogNotifier)
    } else {
        Arc::new(SendGridClient::new(
            settings.sendgrid_api_key.clone(),
            settings.mail_from.clone(),
            http_timeout,
        ))
    };

    ScanContext {
        store: Arc::new(MongoSubscriptionStore::new(db.clone())),
        market: Arc::new(FinnhubClient::new(settings.finnhub_api_key.clone(), http_timeout)),
        notifier,
        options: ScanOptions::from_settings(settings),
    }
}
