//! Outgoing notifications for the receptionist backend.
//!
//! Defines the `Notifier` trait with log-only and HTTP-relay
//! implementations, the message templates for leads and auto-replies, and
//! the delayed callback reminder.

pub mod error;
pub mod notifier;
pub mod reminder;
pub mod templates;

pub use error::NotifyError;
pub use notifier::{dispatch, notifier_from_config, LogNotifier, Notification, Notifier, RelayNotifier};
pub use reminder::{CallbackLead, CallbackReminder};
