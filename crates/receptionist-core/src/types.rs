use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// =============================================================================
// Enums
// =============================================================================

/// Lifecycle of a booked appointment.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    /// Requested by the visitor, not yet confirmed by staff.
    #[default]
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Confirmed => "confirmed",
            AppointmentStatus::Cancelled => "cancelled",
            AppointmentStatus::Completed => "completed",
        }
    }

    /// Parse a stored status, falling back to `Pending` for unknown values.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "confirmed" => AppointmentStatus::Confirmed,
            "cancelled" => AppointmentStatus::Cancelled,
            "completed" => AppointmentStatus::Completed,
            _ => AppointmentStatus::Pending,
        }
    }
}

/// Category of a visitor inquiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryType {
    Support,
    Sales,
    Technical,
    #[default]
    General,
    Appointment,
}

impl InquiryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryType::Support => "support",
            InquiryType::Sales => "sales",
            InquiryType::Technical => "technical",
            InquiryType::General => "general",
            InquiryType::Appointment => "appointment",
        }
    }

    /// Parse a stored type, falling back to `General`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "support" => InquiryType::Support,
            "sales" => InquiryType::Sales,
            "technical" => InquiryType::Technical,
            "appointment" => InquiryType::Appointment,
            _ => InquiryType::General,
        }
    }
}

/// Priority of a visitor inquiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryPriority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl InquiryPriority {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryPriority::Low => "low",
            InquiryPriority::Medium => "medium",
            InquiryPriority::High => "high",
            InquiryPriority::Urgent => "urgent",
        }
    }

    /// Parse a stored priority, falling back to `Medium`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "low" => InquiryPriority::Low,
            "high" => InquiryPriority::High,
            "urgent" => InquiryPriority::Urgent,
            _ => InquiryPriority::Medium,
        }
    }
}

/// Handling state of an inquiry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InquiryStatus {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl InquiryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryStatus::Open => "open",
            InquiryStatus::InProgress => "in_progress",
            InquiryStatus::Resolved => "resolved",
            InquiryStatus::Closed => "closed",
        }
    }

    /// Parse a stored status, falling back to `Open`.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "in_progress" => InquiryStatus::InProgress,
            "resolved" => InquiryStatus::Resolved,
            "closed" => InquiryStatus::Closed,
            _ => InquiryStatus::Open,
        }
    }
}

// =============================================================================
// Records
// =============================================================================

/// Contact details submitted by a visitor.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A stored contact lead.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: Uuid,
    #[serde(flatten)]
    pub info: ContactInfo,
    pub created_at: DateTime<Utc>,
}

/// A requested appointment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Appointment {
    pub id: Uuid,
    pub contact: ContactInfo,
    /// Date as entered by the visitor (e.g. `2026-10-20`).
    pub scheduled_date: String,
    /// Time as entered by the visitor (e.g. `14:30`).
    pub scheduled_time: String,
    /// Duration in minutes.
    pub duration: u32,
    pub purpose: String,
    pub status: AppointmentStatus,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A visitor inquiry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Inquiry {
    pub id: Uuid,
    pub contact: ContactInfo,
    pub inquiry_type: InquiryType,
    pub subject: String,
    pub description: String,
    pub priority: InquiryPriority,
    pub status: InquiryStatus,
    pub preferred_contact_method: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Opaque acknowledgement returned by the record store on a save.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveStatus {
    /// Table the record landed in.
    pub table: String,
    pub id: Uuid,
}
