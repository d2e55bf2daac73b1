#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use stockwatch::{
    error::{DeliveryError, MarketDataError, StoreError},
    models::{EnabledSubscription, PricePoint, PriceSeries, Subscription, User},
    services::{
        alert_scan::{ScanContext, ScanOptions},
        market_data::MarketDataGateway,
        notifier::Notifier,
        subscription_store::SubscriptionStore,
    },
};

pub fn pair(id: i64, user_id: i64, ticker: &str, enabled: bool) -> EnabledSubscription {
    EnabledSubscription {
        subscription: Subscription {
            id,
            user_id,
            ticker: ticker.to_string(),
            enabled,
            created_at: 0,
        },
        user: User {
            id: user_id,
            email: format!("user{user_id}@example.com"),
            created_at: 0,
        },
    }
}

/// Seven flat sessions followed by `last`.
pub fn flat_then(last: f64) -> Vec<f64> {
    let mut closes = vec![10.0; 7];
    closes.push(last);
    closes
}

pub struct MockStore {
    pub rows: Vec<EnabledSubscription>,
    pub fail: bool,
}

impl MockStore {
    pub fn with_rows(rows: Vec<EnabledSubscription>) -> Self {
        Self { rows, fail: false }
    }

    pub fn failing() -> Self {
        Self {
            rows: Vec::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl SubscriptionStore for MockStore {
    async fn enabled_subscriptions(&self) -> Result<Vec<EnabledSubscription>, StoreError> {
        if self.fail {
            return Err(StoreError::Database("connection refused".to_string()));
        }
        Ok(self.rows.clone())
    }
}

pub enum Feed {
    Closes(Vec<f64>),
    NotFound,
    Unavailable,
    Hang,
}

#[derive(Default)]
pub struct MockMarket {
    pub feeds: HashMap<String, Feed>,
    pub calls: Mutex<Vec<String>>,
}

impl MockMarket {
    pub fn feed(mut self, ticker: &str, feed: Feed) -> Self {
        self.feeds.insert(ticker.to_string(), feed);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        let mut calls = self.calls.lock().unwrap().clone();
        calls.sort();
        calls
    }
}

#[async_trait]
impl MarketDataGateway for MockMarket {
    async fn fetch_daily_history(
        &self,
        ticker: &str,
        _lookback_sessions: usize,
    ) -> Result<PriceSeries, MarketDataError> {
        self.calls.lock().unwrap().push(ticker.to_string());

        match self.feeds.get(ticker) {
            Some(Feed::Closes(closes)) => Ok(PriceSeries {
                ticker: ticker.to_string(),
                points: closes
                    .iter()
                    .enumerate()
                    .map(|(i, c)| PricePoint {
                        timestamp: i as i64 * 86_400,
                        close: *c,
                    })
                    .collect(),
            }),
            Some(Feed::Unavailable) => Err(MarketDataError::UpstreamUnavailable(
                "provider down".to_string(),
            )),
            Some(Feed::Hang) => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Err(MarketDataError::UpstreamUnavailable("hung".to_string()))
            }
            Some(Feed::NotFound) | None => Err(MarketDataError::NotFound(ticker.to_string())),
        }
    }
}

#[derive(Default)]
pub struct MockNotifier {
    pub failing: HashSet<String>,
    pub attempts: Mutex<Vec<String>>,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl MockNotifier {
    pub fn failing_for(emails: &[&str]) -> Self {
        Self {
            failing: emails.iter().map(|e| e.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        let mut sent = self.sent.lock().unwrap().clone();
        sent.sort();
        sent
    }
}

#[async_trait]
impl Notifier for MockNotifier {
    async fn send(&self, to_email: &str, subject: &str, _body: &str) -> Result<(), DeliveryError> {
        self.attempts.lock().unwrap().push(to_email.to_string());

        if self.failing.contains(to_email) {
            return Err(DeliveryError("provider rejected message".to_string()));
        }

        self.sent
            .lock()
            .unwrap()
            .push((to_email.to_string(), subject.to_string()));
        Ok(())
    }
}

pub fn context(
    store: MockStore,
    market: Arc<MockMarket>,
    notifier: Arc<MockNotifier>,
    options: ScanOptions,
) -> ScanContext {
    ScanContext {
        store: Arc::new(store),
        market,
        notifier,
        options,
    }
}
