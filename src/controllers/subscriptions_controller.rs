use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::Subscription,
    services::subscription_service,
    AppState,
};

#[derive(Deserialize)]
pub struct SetEnabledRequest {
    pub enabled: bool,
}

// POST /subscriptions/:id/enabled
pub async fn post_subscription_enabled(
    State(state): State<AppState>,
    Path(subscription_id): Path<i64>,
    Json(req): Json<SetEnabledRequest>,
) -> Result<Json<Subscription>, ApiError> {
    let sub = subscription_service::set_enabled(&state, subscription_id, req.enabled).await?;
    Ok(Json(sub))
}
