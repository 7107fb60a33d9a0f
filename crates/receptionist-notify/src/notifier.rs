//! Notifier trait and its implementations.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;

use receptionist_core::config::EmailConfig;

use crate::error::NotifyError;

/// A single outgoing message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// A channel that can deliver notifications.
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Short backend name for logs.
    fn name(&self) -> &'static str;

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError>;
}

/// Notifier that only writes to the log. Used when email is disabled or no
/// relay is configured.
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    fn name(&self) -> &'static str {
        "log"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if notification.to.trim().is_empty() {
            return Err(NotifyError::MissingRecipient);
        }
        tracing::info!(
            to = %notification.to,
            subject = %notification.subject,
            body_len = notification.body.len(),
            "Notification logged (no delivery backend)"
        );
        Ok(())
    }
}

#[derive(Serialize)]
struct RelayPayload<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

/// Notifier that hands messages to an HTTP mail relay as JSON.
pub struct RelayNotifier {
    url: String,
    from: String,
    client: reqwest::Client,
}

impl RelayNotifier {
    pub fn new(url: impl Into<String>, from: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            url: url.into(),
            from: from.into(),
            client,
        }
    }
}

#[async_trait]
impl Notifier for RelayNotifier {
    fn name(&self) -> &'static str {
        "relay"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        if notification.to.trim().is_empty() {
            return Err(NotifyError::MissingRecipient);
        }

        let payload = RelayPayload {
            from: &self.from,
            to: &notification.to,
            subject: &notification.subject,
            body: &notification.body,
        };

        let res = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| NotifyError::Transport(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            let body = res.text().await.unwrap_or_default();
            return Err(NotifyError::Rejected { status, body });
        }

        tracing::info!(to = %notification.to, subject = %notification.subject, "Notification relayed");
        Ok(())
    }
}

/// Pick a notifier for the given email settings.
pub fn notifier_from_config(config: &EmailConfig) -> Arc<dyn Notifier> {
    match (&config.relay_url, config.enabled) {
        (Some(url), true) if !url.trim().is_empty() => {
            Arc::new(RelayNotifier::new(url.trim(), config.from.clone()))
        }
        (_, false) => {
            tracing::warn!("Email disabled in settings - notifications will only be logged");
            Arc::new(LogNotifier)
        }
        _ => {
            tracing::warn!("No email relay configured - notifications will only be logged");
            Arc::new(LogNotifier)
        }
    }
}

/// Send a notification in the background.
///
/// Delivery failures are logged and never reach the caller.
pub fn dispatch(notifier: Arc<dyn Notifier>, notification: Notification) -> JoinHandle<()> {
    tokio::spawn(async move {
        if let Err(e) = notifier.send(&notification).await {
            tracing::warn!(
                backend = notifier.name(),
                to = %notification.to,
                subject = %notification.subject,
                error = %e,
                "Notification delivery failed"
            );
        }
    })
}
