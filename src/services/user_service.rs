use std::sync::LazyLock;

use chrono::Utc;
use mongodb::bson::doc;
use regex::Regex;
use tracing::info;

use crate::{error::StoreError, models::User, AppState};

use super::sequence;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub async fn register_user(state: &AppState, email: &str) -> Result<User, StoreError> {
    let users = state.db.collection::<User>("users");

    let user = User {
        id: sequence::next_id(&state.db, "users").await?,
        email: email.trim().to_lowercase(),
        created_at: Utc::now().timestamp(),
    };

    users.insert_one(&user, None).await.map_err(|e| match StoreError::from(e) {
        StoreError::Conflict(_) => StoreError::Conflict("This email is already registered.".into()),
        other => other,
    })?;

    info!(user_id = user.id, "registered user");
    Ok(user)
}

pub async fn find_user(state: &AppState, user_id: i64) -> Result<Option<User>, StoreError> {
    let users = state.db.collection::<User>("users");
    Ok(users.find_one(doc! { "_id": user_id }, None).await?)
}
