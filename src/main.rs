use std::{net::SocketAddr, process::ExitCode, time::Duration};

use mongodb::Client;
use tracing::{error, info, warn};

use stockwatch::{
    config, routes, services::{alert_monitor, db_init}, telemetry, AppState,
};

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

    if let Err(e) = db_init::ensure_indexes(&db).await {
        warn!(error = %e, "could not ensure indexes");
    }

    let state = AppState::new(db, settings.clone());

    if let Some(secs) = settings.alert_scan_interval_secs {
        alert_monitor::spawn_alert_scan_scheduler(state.scan.clone(), Duration::from_secs(secs));
    }

    let ip = match settings.host.parse::<std::net::IpAddr>() {
        Ok(ip) => ip,
        Err(e) => {
            error!(host = %settings.host, error = %e, "invalid HOST");
            return ExitCode::FAILURE;
        }
    };
    let addr = SocketAddr::from((ip, settings.port));

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };
    info!("listening on http://{}", addr);

    if let Err(e) = axum::serve(listener, routes::app(state)).await {
        error!(error = %e, "server error");
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
