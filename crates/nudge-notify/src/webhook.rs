use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{NotifyError, Result};
use crate::Notifier;

/// Delivers reminder messages as a JSON POST to a configured endpoint.
///
/// Body: `{"message": "..."}`. Any non-2xx response is a typed failure.
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            url,
        }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    fn name(&self) -> &str {
        "webhook"
    }

    async fn deliver(&self, message: &str) -> Result<()> {
        debug!(url = %self.url, "delivering reminder via webhook");

        let resp = self
            .client
            .post(&self.url)
            .json(&serde_json::json!({ "message": message }))
            .send()
            .await?;

        let status = resp.status().as_u16();
        if !resp.status().is_success() {
            let text = resp.text().await.unwrap_or_default();
            warn!(status, body = %text, "webhook delivery rejected");
            return Err(NotifyError::Rejected {
                status,
                message: text,
            });
        }
        Ok(())
    }
}
