//! Receptionist storage crate - SQLite persistence for visitor submissions.
//!
//! Provides a WAL-mode SQLite database with migrations and repository
//! implementations for appointments, inquiries and contacts.

pub mod db;
pub mod migrations;
pub mod repository;

pub use db::Database;
pub use repository::{AppointmentRepository, ContactRepository, InquiryRepository, RecordStore};
