use axum::{extract::State, Json};

use crate::{
    error::ApiError,
    services::alert_scan::{self, ScanReport},
    AppState,
};

// POST /tasks/alert-scan
//
// Takes no input. Each call is an independent run over the current
// subscriptions, so a scheduler may call it as often as it likes.
pub async fn post_alert_scan(State(state): State<AppState>) -> Result<Json<ScanReport>, ApiError> {
    let report = alert_scan::run_alert_scan(&state.scan)
        .await
        .map_err(|e| ApiError::Unavailable(format!("alert scan aborted: {e}")))?;

    Ok(Json(report))
}
