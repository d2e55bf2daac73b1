use std::{sync::Arc, time::Duration};

use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use super::alert_scan::{run_alert_scan, ScanContext};

/// Runs the alert scan every `every` until the process exits. A scan that
/// overruns its slot delays the next one instead of stacking runs.
pub fn spawn_alert_scan_scheduler(ctx: Arc<ScanContext>, every: Duration) {
    info!(every = ?every, "alert scan scheduler enabled");

    tokio::spawn(async move {
        let mut interval = time::interval(every);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;

            if let Err(e) = run_alert_scan(&ctx).await {
                error!(error = %e, "[alert-scan] run failed");
            }
        }
    });
}
