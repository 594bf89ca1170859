use async_trait::async_trait;
use reqwest::Url;
use serde::Serialize;

use super::{read_body, transport_error};
use crate::coordinator::collaborators::{CollaboratorError, Notification, Notifier};

const SERVICE: &str = "notification";

/// Chat webhook message
#[derive(Debug, Serialize)]
struct WebhookMessage {
    content: String,
}

/// Posts announcements to a chat webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: Url,
}

impl WebhookNotifier {
    pub fn new(client: reqwest::Client, url: Url) -> Self {
        Self { client, url }
    }
}

#[async_trait]
impl Notifier for WebhookNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), CollaboratorError> {
        let message = WebhookMessage {
            content: notification.render(),
        };
        let response = self
            .client
            .post(self.url.clone())
            .json(&message)
            .send()
            .await
            .map_err(|err| transport_error(SERVICE, err))?;

        read_body(SERVICE, || "notification webhook".to_string(), response).await?;
        Ok(())
    }
}

/// Writes announcements to the log instead of a chat channel
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn notify(&self, notification: &Notification) -> Result<(), CollaboratorError> {
        tracing::info!("Announcement: {}", notification.render());
        Ok(())
    }
}
