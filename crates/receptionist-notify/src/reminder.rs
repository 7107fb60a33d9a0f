//! Delayed callback reminders for new leads.
//!
//! Each scheduled reminder is its own task that sleeps for the configured
//! delay and then notifies the company address. `shutdown` cancels every
//! reminder that has not fired yet.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use receptionist_core::config::CompanyConfig;

use crate::notifier::Notifier;
use crate::templates;

/// Who to call back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackLead {
    pub name: String,
    pub phone: Option<String>,
    pub email: String,
}

/// Schedules callback reminders on the tokio runtime.
pub struct CallbackReminder {
    notifier: Arc<dyn Notifier>,
    company: CompanyConfig,
    delay: Duration,
    shutdown_tx: watch::Sender<bool>,
}

impl CallbackReminder {
    pub fn new(notifier: Arc<dyn Notifier>, company: CompanyConfig, delay: Duration) -> Self {
        let (shutdown_tx, _) = watch::channel(false);
        Self {
            notifier,
            company,
            delay,
            shutdown_tx,
        }
    }

    /// Schedule a reminder for `lead`.
    ///
    /// The returned handle resolves once the reminder has been sent or
    /// cancelled. Callers are free to drop it.
    pub fn schedule(&self, lead: CallbackLead) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        let notification = templates::callback_reminder(&self.company, &lead);
        let delay = self.delay;
        let shutdown_rx = self.shutdown_tx.subscribe();

        tracing::info!(lead = %lead.name, delay_secs = delay.as_secs(), "Callback reminder scheduled");

        tokio::spawn(async move {
            tokio::select! {
                biased;
                _ = wait_for_shutdown(shutdown_rx) => {
                    tracing::debug!(lead = %lead.name, "Callback reminder cancelled");
                }
                _ = tokio::time::sleep(delay) => {
                    if let Err(e) = notifier.send(&notification).await {
                        tracing::warn!(lead = %lead.name, error = %e, "Callback reminder failed");
                    } else {
                        tracing::info!(lead = %lead.name, "Callback reminder sent");
                    }
                }
            }
        })
    }

    /// Cancel all pending reminders, including any scheduled afterwards.
    pub fn shutdown(&self) {
        self.shutdown_tx.send_replace(true);
    }
}

/// Resolves once shutdown has been requested. Never resolves if the
/// scheduler itself is dropped without a shutdown.
async fn wait_for_shutdown(mut rx: watch::Receiver<bool>) {
    loop {
        if *rx.borrow_and_update() {
            return;
        }
        if rx.changed().await.is_err() {
            std::future::pending::<()>().await;
        }
    }
}
