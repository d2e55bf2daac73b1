use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use crate::{
    error::ApiError,
    models::{Subscription, User},
    services::{subscription_service, user_service},
    AppState,
};

#[derive(Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct CreateSubscriptionRequest {
    pub ticker: String,
}

// POST /users
pub async fn post_user(
    State(state): State<AppState>,
    Json(req): Json<RegisterUserRequest>,
) -> Result<(StatusCode, Json<User>), ApiError> {
    let email = req.email.trim();
    if !user_service::is_valid_email(email) {
        return Err(ApiError::BadRequest("Please enter a valid email.".into()));
    }

    let user = user_service::register_user(&state, email).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

// GET /users/:id/subscriptions
pub async fn get_user_subscriptions(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
) -> Result<Json<Vec<Subscription>>, ApiError> {
    if user_service::find_user(&state, user_id).await?.is_none() {
        return Err(ApiError::NotFound(format!("user {user_id} not found")));
    }

    let items = subscription_service::list_user_subscriptions(&state, user_id).await?;
    Ok(Json(items))
}

// POST /users/:id/subscriptions
pub async fn post_user_subscription(
    State(state): State<AppState>,
    Path(user_id): Path<i64>,
    Json(req): Json<CreateSubscriptionRequest>,
) -> Result<(StatusCode, Json<Subscription>), ApiError> {
    let Some(ticker) = subscription_service::normalize_ticker(&req.ticker) else {
        return Err(ApiError::BadRequest("Please enter a valid ticker.".into()));
    };

    let sub = subscription_service::create_subscription(&state, user_id, &ticker).await?;
    Ok((StatusCode::CREATED, Json(sub)))
}
