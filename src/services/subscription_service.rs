use std::sync::LazyLock;

use chrono::Utc;
use futures_util::StreamExt;
use mongodb::{
    bson::doc,
    options::{FindOneAndUpdateOptions, FindOptions, ReturnDocument},
};
use regex::Regex;
use tracing::info;

use crate::{error::StoreError, models::Subscription, AppState};

use super::{sequence, user_service};

static TICKER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9][A-Z0-9.\-]{0,14}$").expect("ticker regex"));

/// Trims and upper-cases a ticker, `None` when it is not a plausible symbol.
pub fn normalize_ticker(raw: &str) -> Option<String> {
    let sym = raw.trim().to_uppercase();
    TICKER_RE.is_match(&sym).then_some(sym)
}

pub async fn create_subscription(
    state: &AppState,
    user_id: i64,
    ticker: &str,
) -> Result<Subscription, StoreError> {
    if user_service::find_user(state, user_id).await?.is_none() {
        return Err(StoreError::NotFound(format!("user {user_id}")));
    }

    let subscriptions = state.db.collection::<Subscription>("subscriptions");

    let subscription = Subscription {
        id: sequence::next_id(&state.db, "subscriptions").await?,
        user_id,
        ticker: ticker.to_uppercase(),
        enabled: true,
        created_at: Utc::now().timestamp(),
    };

    subscriptions.insert_one(&subscription, None).await?;

    info!(
        subscription_id = subscription.id,
        user_id,
        ticker = %subscription.ticker,
        "created subscription"
    );
    Ok(subscription)
}

pub async fn list_user_subscriptions(
    state: &AppState,
    user_id: i64,
) -> Result<Vec<Subscription>, StoreError> {
    let subscriptions = state.db.collection::<Subscription>("subscriptions");

    let find_opts = FindOptions::builder()
        .sort(doc! { "created_at": -1 })
        .build();

    let mut cursor = subscriptions
        .find(doc! { "user_id": user_id }, find_opts)
        .await?;

    let mut items: Vec<Subscription> = Vec::new();
    while let Some(res) = cursor.next().await {
        items.push(res?);
    }

    Ok(items)
}

pub async fn set_enabled(
    state: &AppState,
    subscription_id: i64,
    enabled: bool,
) -> Result<Subscription, StoreError> {
    let subscriptions = state.db.collection::<Subscription>("subscriptions");

    let opts = FindOneAndUpdateOptions::builder()
        .return_document(ReturnDocument::After)
        .build();

    let updated = subscriptions
        .find_one_and_update(
            doc! { "_id": subscription_id },
            doc! { "$set": { "enabled": enabled } },
            opts,
        )
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("subscription {subscription_id}")))?;

    info!(subscription_id, enabled, "updated subscription");
    Ok(updated)
}
