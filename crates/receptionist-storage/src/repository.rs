//! Repository implementations for SQLite-backed persistence.
//!
//! Provides ContactRepository, AppointmentRepository and InquiryRepository
//! that operate on the Database struct using raw SQL, plus `RecordStore`
//! which bundles the three for the API layer.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use rusqlite::OptionalExtension;
use uuid::Uuid;

use receptionist_core::error::ReceptionistError;
use receptionist_core::types::{
    Appointment, AppointmentStatus, Contact, ContactInfo, Inquiry, InquiryPriority, InquiryStatus,
    InquiryType, SaveStatus,
};

use crate::db::Database;

const CONTACT_COLUMNS: &str = "id, name, email, phone, company, notes, created_at";

const APPOINTMENT_COLUMNS: &str = "id, contact_name, contact_email, contact_phone, contact_company,
     scheduled_date, scheduled_time, duration, purpose, status, notes, created_at, updated_at";

const INQUIRY_COLUMNS: &str = "id, contact_name, contact_email, contact_phone, contact_company,
     contact_notes, inquiry_type, subject, description, priority, status,
     preferred_contact_method, created_at, updated_at";

/// Repository for contact leads.
pub struct ContactRepository {
    db: Arc<Database>,
}

impl ContactRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a new contact.
    pub fn save(&self, contact: &Contact) -> Result<SaveStatus, ReceptionistError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO contacts (id, name, email, phone, company, notes, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                rusqlite::params![
                    contact.id.to_string(),
                    contact.info.name,
                    contact.info.email,
                    contact.info.phone,
                    contact.info.company,
                    contact.info.notes,
                    contact.created_at.timestamp(),
                ],
            )
            .map_err(|e| ReceptionistError::Storage(format!("Failed to save contact: {}", e)))?;
            Ok(SaveStatus {
                table: "contacts".to_string(),
                id: contact.id,
            })
        })
    }

    /// Find a contact by ID.
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Contact>, ReceptionistError> {
        self.db.with_conn(|conn| {
            let sql = format!("SELECT {} FROM contacts WHERE id = ?1", CONTACT_COLUMNS);
            let row = conn
                .query_row(&sql, rusqlite::params![id.to_string()], |row| {
                    Ok(row_to_contact(row))
                })
                .optional()
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;
            row.transpose()
        })
    }

    /// List the most recent contacts, newest first.
    pub fn list(&self, limit: u64) -> Result<Vec<Contact>, ReceptionistError> {
        self.db.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM contacts ORDER BY created_at DESC, rowid DESC LIMIT ?1",
                CONTACT_COLUMNS
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;
            let rows = stmt
                .query_map(rusqlite::params![sql_limit(limit)], |row| Ok(row_to_contact(row)))
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;

            let mut contacts = Vec::new();
            for row in rows {
                contacts.push(row.map_err(|e| ReceptionistError::Storage(e.to_string()))??);
            }
            Ok(contacts)
        })
    }

    /// Count stored contacts.
    pub fn count(&self) -> Result<u64, ReceptionistError> {
        count_table(&self.db, "contacts")
    }
}

/// Repository for appointment requests.
pub struct AppointmentRepository {
    db: Arc<Database>,
}

impl AppointmentRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a new appointment.
    pub fn save(&self, appt: &Appointment) -> Result<SaveStatus, ReceptionistError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO appointments (id, contact_name, contact_email, contact_phone,
                                           contact_company, scheduled_date, scheduled_time,
                                           duration, purpose, status, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                rusqlite::params![
                    appt.id.to_string(),
                    appt.contact.name,
                    appt.contact.email,
                    appt.contact.phone,
                    appt.contact.company,
                    appt.scheduled_date,
                    appt.scheduled_time,
                    appt.duration,
                    appt.purpose,
                    appt.status.as_str(),
                    appt.notes,
                    appt.created_at.timestamp(),
                    appt.updated_at.timestamp(),
                ],
            )
            .map_err(|e| {
                ReceptionistError::Storage(format!("Failed to save appointment: {}", e))
            })?;
            Ok(SaveStatus {
                table: "appointments".to_string(),
                id: appt.id,
            })
        })
    }

    /// Find an appointment by ID.
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Appointment>, ReceptionistError> {
        self.db.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM appointments WHERE id = ?1",
                APPOINTMENT_COLUMNS
            );
            let row = conn
                .query_row(&sql, rusqlite::params![id.to_string()], |row| {
                    Ok(row_to_appointment(row))
                })
                .optional()
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;
            row.transpose()
        })
    }

    /// List the most recent appointments, newest first.
    pub fn list(&self, limit: u64) -> Result<Vec<Appointment>, ReceptionistError> {
        self.db.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM appointments ORDER BY created_at DESC, rowid DESC LIMIT ?1",
                APPOINTMENT_COLUMNS
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;
            let rows = stmt
                .query_map(rusqlite::params![sql_limit(limit)], |row| Ok(row_to_appointment(row)))
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;

            let mut appointments = Vec::new();
            for row in rows {
                appointments.push(row.map_err(|e| ReceptionistError::Storage(e.to_string()))??);
            }
            Ok(appointments)
        })
    }

    /// Count stored appointments.
    pub fn count(&self) -> Result<u64, ReceptionistError> {
        count_table(&self.db, "appointments")
    }
}

/// Repository for visitor inquiries.
pub struct InquiryRepository {
    db: Arc<Database>,
}

impl InquiryRepository {
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Store a new inquiry.
    pub fn save(&self, inquiry: &Inquiry) -> Result<SaveStatus, ReceptionistError> {
        self.db.with_conn(|conn| {
            conn.execute(
                "INSERT INTO inquiries (id, contact_name, contact_email, contact_phone,
                                        contact_company, contact_notes, inquiry_type, subject,
                                        description, priority, status, preferred_contact_method,
                                        created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                rusqlite::params![
                    inquiry.id.to_string(),
                    inquiry.contact.name,
                    inquiry.contact.email,
                    inquiry.contact.phone,
                    inquiry.contact.company,
                    inquiry.contact.notes,
                    inquiry.inquiry_type.as_str(),
                    inquiry.subject,
                    inquiry.description,
                    inquiry.priority.as_str(),
                    inquiry.status.as_str(),
                    inquiry.preferred_contact_method,
                    inquiry.created_at.timestamp(),
                    inquiry.updated_at.timestamp(),
                ],
            )
            .map_err(|e| ReceptionistError::Storage(format!("Failed to save inquiry: {}", e)))?;
            Ok(SaveStatus {
                table: "inquiries".to_string(),
                id: inquiry.id,
            })
        })
    }

    /// Find an inquiry by ID.
    pub fn find_by_id(&self, id: Uuid) -> Result<Option<Inquiry>, ReceptionistError> {
        self.db.with_conn(|conn| {
            let sql = format!("SELECT {} FROM inquiries WHERE id = ?1", INQUIRY_COLUMNS);
            let row = conn
                .query_row(&sql, rusqlite::params![id.to_string()], |row| {
                    Ok(row_to_inquiry(row))
                })
                .optional()
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;
            row.transpose()
        })
    }

    /// List the most recent inquiries, newest first.
    pub fn list(&self, limit: u64) -> Result<Vec<Inquiry>, ReceptionistError> {
        self.db.with_conn(|conn| {
            let sql = format!(
                "SELECT {} FROM inquiries ORDER BY created_at DESC, rowid DESC LIMIT ?1",
                INQUIRY_COLUMNS
            );
            let mut stmt = conn
                .prepare(&sql)
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;
            let rows = stmt
                .query_map(rusqlite::params![sql_limit(limit)], |row| Ok(row_to_inquiry(row)))
                .map_err(|e| ReceptionistError::Storage(e.to_string()))?;

            let mut inquiries = Vec::new();
            for row in rows {
                inquiries.push(row.map_err(|e| ReceptionistError::Storage(e.to_string()))??);
            }
            Ok(inquiries)
        })
    }

    /// Count stored inquiries.
    pub fn count(&self) -> Result<u64, ReceptionistError> {
        count_table(&self.db, "inquiries")
    }
}

/// All three repositories over one shared database.
pub struct RecordStore {
    pub contacts: ContactRepository,
    pub appointments: AppointmentRepository,
    pub inquiries: InquiryRepository,
}

impl RecordStore {
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            contacts: ContactRepository::new(Arc::clone(&db)),
            appointments: AppointmentRepository::new(Arc::clone(&db)),
            inquiries: InquiryRepository::new(db),
        }
    }
}

// ============================================================================
// Helper functions for row-to-entity conversion.
// ============================================================================

fn count_table(db: &Database, table: &str) -> Result<u64, ReceptionistError> {
    db.with_conn(|conn| {
        let count: i64 = conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                row.get(0)
            })
            .map_err(|e| ReceptionistError::Storage(e.to_string()))?;
        Ok(count as u64)
    })
}

fn sql_limit(limit: u64) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn get<T: rusqlite::types::FromSql>(
    row: &rusqlite::Row<'_>,
    idx: usize,
) -> Result<T, ReceptionistError> {
    row.get(idx)
        .map_err(|e| ReceptionistError::Storage(e.to_string()))
}

fn parse_id(raw: &str) -> Result<Uuid, ReceptionistError> {
    Uuid::parse_str(raw).map_err(|e| ReceptionistError::Storage(format!("Invalid UUID: {}", e)))
}

fn from_epoch(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).single().unwrap_or_default()
}

fn row_to_contact(row: &rusqlite::Row<'_>) -> Result<Contact, ReceptionistError> {
    let id: String = get(row, 0)?;
    Ok(Contact {
        id: parse_id(&id)?,
        info: ContactInfo {
            name: get(row, 1)?,
            email: get(row, 2)?,
            phone: get(row, 3)?,
            company: get(row, 4)?,
            notes: get(row, 5)?,
        },
        created_at: from_epoch(get(row, 6)?),
    })
}

fn row_to_appointment(row: &rusqlite::Row<'_>) -> Result<Appointment, ReceptionistError> {
    let id: String = get(row, 0)?;
    let status: String = get(row, 9)?;
    Ok(Appointment {
        id: parse_id(&id)?,
        contact: ContactInfo {
            name: get(row, 1)?,
            email: get(row, 2)?,
            phone: get(row, 3)?,
            company: get(row, 4)?,
            notes: None,
        },
        scheduled_date: get(row, 5)?,
        scheduled_time: get(row, 6)?,
        duration: get(row, 7)?,
        purpose: get(row, 8)?,
        status: AppointmentStatus::parse(&status),
        notes: get(row, 10)?,
        created_at: from_epoch(get(row, 11)?),
        updated_at: from_epoch(get(row, 12)?),
    })
}

fn row_to_inquiry(row: &rusqlite::Row<'_>) -> Result<Inquiry, ReceptionistError> {
    let id: String = get(row, 0)?;
    let inquiry_type: String = get(row, 6)?;
    let priority: String = get(row, 9)?;
    let status: String = get(row, 10)?;
    Ok(Inquiry {
        id: parse_id(&id)?,
        contact: ContactInfo {
            name: get(row, 1)?,
            email: get(row, 2)?,
            phone: get(row, 3)?,
            company: get(row, 4)?,
            notes: get(row, 5)?,
        },
        inquiry_type: InquiryType::parse(&inquiry_type),
        subject: get(row, 7)?,
        description: get(row, 8)?,
        priority: InquiryPriority::parse(&priority),
        status: InquiryStatus::parse(&status),
        preferred_contact_method: get(row, 11)?,
        created_at: from_epoch(get(row, 12)?),
        updated_at: from_epoch(get(row, 13)?),
    })
}
