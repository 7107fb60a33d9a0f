//! Database schema migrations.
//!
//! Applies the schema for the appointments, inquiries, contacts and
//! schema_migrations tables.

use rusqlite::Connection;
use tracing::info;

use receptionist_core::error::ReceptionistError;

/// Run all pending database migrations.
pub fn run_migrations(conn: &Connection) -> Result<(), ReceptionistError> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version     INTEGER PRIMARY KEY NOT NULL,
            name        TEXT NOT NULL,
            applied_at  INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        );",
    )
    .map_err(|e| {
        ReceptionistError::Storage(format!("Failed to create migrations table: {}", e))
    })?;

    let current_version: i64 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .map_err(|e| {
            ReceptionistError::Storage(format!("Failed to query migration version: {}", e))
        })?;

    if current_version < 1 {
        apply_v1(conn)?;
        info!("Applied migration v1: initial_schema");
    }

    Ok(())
}

/// Version 1: Initial schema.
fn apply_v1(conn: &Connection) -> Result<(), ReceptionistError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS contacts (
            id              TEXT PRIMARY KEY NOT NULL,
            name            TEXT NOT NULL,
            email           TEXT NOT NULL,
            phone           TEXT,
            company         TEXT,
            notes           TEXT,
            created_at      INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_contacts_created_at
            ON contacts (created_at DESC);

        CREATE INDEX IF NOT EXISTS idx_contacts_email
            ON contacts (email);

        CREATE TABLE IF NOT EXISTS appointments (
            id              TEXT PRIMARY KEY NOT NULL,
            contact_name    TEXT NOT NULL,
            contact_email   TEXT NOT NULL,
            contact_phone   TEXT,
            contact_company TEXT,
            scheduled_date  TEXT NOT NULL,
            scheduled_time  TEXT NOT NULL,
            duration        INTEGER NOT NULL DEFAULT 30,
            purpose         TEXT NOT NULL,
            status          TEXT NOT NULL DEFAULT 'pending'
                            CHECK (status IN ('pending', 'confirmed', 'cancelled', 'completed')),
            notes           TEXT,
            created_at      INTEGER NOT NULL,
            updated_at      INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_appointments_created_at
            ON appointments (created_at DESC);

        CREATE TABLE IF NOT EXISTS inquiries (
            id                       TEXT PRIMARY KEY NOT NULL,
            contact_name             TEXT NOT NULL,
            contact_email            TEXT NOT NULL,
            contact_phone            TEXT,
            contact_company          TEXT,
            contact_notes            TEXT,
            inquiry_type             TEXT NOT NULL DEFAULT 'general'
                                     CHECK (inquiry_type IN ('support', 'sales', 'technical', 'general', 'appointment')),
            subject                  TEXT NOT NULL,
            description              TEXT NOT NULL,
            priority                 TEXT NOT NULL DEFAULT 'medium'
                                     CHECK (priority IN ('low', 'medium', 'high', 'urgent')),
            status                   TEXT NOT NULL DEFAULT 'open',
            preferred_contact_method TEXT,
            created_at               INTEGER NOT NULL,
            updated_at               INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_inquiries_created_at
            ON inquiries (created_at DESC);

        INSERT INTO schema_migrations (version, name) VALUES (1, 'initial_schema');
        ",
    )
    .map_err(|e| ReceptionistError::Storage(format!("Migration v1 failed: {}", e)))?;

    Ok(())
}
