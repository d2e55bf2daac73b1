use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::{debug, warn};

use crate::error::DeliveryError;

use super::notifier::Notifier;

pub const SENDGRID_SEND_URL: &str = "https://api.sendgrid.com/v3/mail/send";

#[derive(Clone)]
pub struct SendGridClient {
    http: Client,
    api_key: String,
    from_email: String,
    send_url: String,
}

impl SendGridClient {
    pub fn new(api_key: String, from_email: String, timeout: Duration) -> Self {
        Self::with_send_url(api_key, from_email, SENDGRID_SEND_URL.to_string(), timeout)
    }

    pub fn with_send_url(
        api_key: String,
        from_email: String,
        send_url: String,
        timeout: Duration,
    ) -> Self {
        let http = match Client::builder().timeout(timeout).build() {
            Ok(c) => c,
            Err(e) => {
                warn!(error = %e, "sendgrid http client without timeout, builder failed");
                Client::new()
            }
        };

        Self {
            http,
            api_key,
            from_email,
            send_url,
        }
    }

    fn has_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Body of a v3 `mail/send` request with a single plain-text part.
    pub fn payload(&self, to_email: &str, subject: &str, body: &str) -> serde_json::Value {
        json!({
            "personalizations": [
                { "to": [ { "email": to_email } ] }
            ],
            "from": { "email": self.from_email },
            "subject": subject,
            "content": [
                { "type": "text/plain", "value": body }
            ]
        })
    }
}

#[async_trait]
impl Notifier for SendGridClient {
    async fn send(&self, to_email: &str, subject: &str, body: &str) -> Result<(), DeliveryError> {
        if !self.has_key() {
            return Err(DeliveryError("SENDGRID_API_KEY is missing in .env".to_string()));
        }

        let res = self
            .http
            .post(&self.send_url)
            .bearer_auth(&self.api_key)
            .json(&self.payload(to_email, subject, body))
            .send()
            .await
            .map_err(|e| DeliveryError(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let body = res.text().await.unwrap_or_default();
            return Err(DeliveryError(format!("SendGrid send failed: {status} {body}")));
        }

        debug!(status = %res.status(), "sendgrid accepted message");
        Ok(())
    }
}
