use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use futures_util::StreamExt;
use mongodb::{bson::doc, options::FindOptions, Database};
use tracing::warn;

use crate::{
    error::StoreError,
    models::{EnabledSubscription, Subscription, User},
};

/// Read side of the store used by the alert scan.
#[async_trait]
pub trait SubscriptionStore: Send + Sync {
    /// All enabled subscriptions joined with their owning user.
    async fn enabled_subscriptions(&self) -> Result<Vec<EnabledSubscription>, StoreError>;
}

#[derive(Clone)]
pub struct MongoSubscriptionStore {
    db: Database,
}

impl MongoSubscriptionStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SubscriptionStore for MongoSubscriptionStore {
    async fn enabled_subscriptions(&self) -> Result<Vec<EnabledSubscription>, StoreError> {
        let subscriptions = self.db.collection::<Subscription>("subscriptions");

        let find_opts = FindOptions::builder().sort(doc! { "_id": 1 }).build();
        let mut cursor = subscriptions
            .find(doc! { "enabled": true }, find_opts)
            .await?;

        let mut items: Vec<Subscription> = Vec::new();
        while let Some(res) = cursor.next().await {
            items.push(res?);
        }

        if items.is_empty() {
            return Ok(Vec::new());
        }

        let user_ids: Vec<i64> = items
            .iter()
            .map(|s| s.user_id)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let users = self.db.collection::<User>("users");
        let mut cursor = users.find(doc! { "_id": { "$in": user_ids } }, None).await?;

        let mut by_id: HashMap<i64, User> = HashMap::new();
        while let Some(res) = cursor.next().await {
            let u = res?;
            by_id.insert(u.id, u);
        }

        let mut joined = Vec::with_capacity(items.len());
        for subscription in items {
            match by_id.get(&subscription.user_id) {
                Some(user) => joined.push(EnabledSubscription {
                    subscription,
                    user: user.clone(),
                }),
                None => warn!(
                    subscription_id = subscription.id,
                    user_id = subscription.user_id,
                    "subscription references a missing user, skipping"
                ),
            }
        }

        Ok(joined)
    }
}
