use serde::{Deserialize, Serialize};

use super::User;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscription {
    #[serde(rename = "_id")]
    pub id: i64,

    pub user_id: i64,

    // stored upper-cased
    pub ticker: String,

    pub enabled: bool,

    #[serde(default)]
    pub created_at: i64,
}

/// A subscription joined with the user that owns it.
#[derive(Debug, Clone, PartialEq)]
pub struct EnabledSubscription {
    pub subscription: Subscription,
    pub user: User,
}
