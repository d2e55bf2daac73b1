//! Runs a single alert scan and exits. Meant for cron or any external
//! scheduler; a non-zero exit means the subscriptions could not be loaded.

use std::process::ExitCode;

use chrono::Utc;
use mongodb::Client;
use tracing::{error, info};

use stockwatch::{build_scan_context, config, services::alert_scan, telemetry};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init();

    let settings = config::load();

    let client = match Client::with_uri_str(&settings.mongodb_uri).await {
        Ok(c) => c,
        Err(e) => {
            error!(error = %e, "failed to create MongoDB client");
            return ExitCode::FAILURE;
        }
    };
    let db = client.database(&settings.mongodb_db);
    let ctx = build_scan_context(&db, &settings);

    info!("--- stock check task start {} ---", Utc::now());

    match alert_scan::run_alert_scan(&ctx).await {
        Ok(report) => {
            info!(
                notified = report.notified,
                scanned = report.scanned,
                "--- stock check task completed {} ---",
                Utc::now()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "--- stock check task aborted ---");
            ExitCode::FAILURE
        }
    }
}
