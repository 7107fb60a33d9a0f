//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::{Duration, Instant};

use receptionist_chat::ChatOrchestrator;
use receptionist_core::config::ReceptionistConfig;
use receptionist_notify::{notifier_from_config, CallbackReminder, Notifier};
use receptionist_storage::{Database, RecordStore};

/// Shared application state. Every field is cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ReceptionistConfig>,
    pub orchestrator: Arc<ChatOrchestrator>,
    pub records: Arc<RecordStore>,
    pub notifier: Arc<dyn Notifier>,
    pub reminder: Arc<CallbackReminder>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        config: ReceptionistConfig,
        orchestrator: ChatOrchestrator,
        database: Database,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let reminder = CallbackReminder::new(
            Arc::clone(&notifier),
            config.company.clone(),
            Duration::from_secs(config.email.callback_reminder_secs),
        );
        Self {
            config: Arc::new(config),
            orchestrator: Arc::new(orchestrator),
            records: Arc::new(RecordStore::new(Arc::new(database))),
            notifier,
            reminder: Arc::new(reminder),
            start_time: Instant::now(),
        }
    }

    /// Wire every service from settings alone.
    pub fn from_config(config: ReceptionistConfig, database: Database) -> Self {
        let orchestrator = ChatOrchestrator::from_config(&config);
        let notifier = notifier_from_config(&config.email);
        Self::new(config, orchestrator, database, notifier)
    }
}
