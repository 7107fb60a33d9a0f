//! Route handler functions for all API endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use receptionist_chat::{ChatOrchestrator, ResponseBundle};
use receptionist_core::types::{
    Appointment, AppointmentStatus, Contact, ContactInfo, Inquiry, InquiryPriority,
    InquiryStatus, InquiryType,
};
use receptionist_notify::{dispatch, templates, CallbackLead};

use crate::error::ApiError;
use crate::state::AppState;

const DEFAULT_INQUIRY_LIMIT: u64 = 50;
const MAX_INQUIRY_LIMIT: u64 = 1000;

// =============================================================================
// Request / response types
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default)]
    pub conversation_id: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
    #[serde(default)]
    pub user_email: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}

fn default_duration() -> u32 {
    30
}

#[derive(Debug, Deserialize)]
pub struct AppointmentRequest {
    pub contact: ContactInfo,
    pub preferred_date: String,
    pub preferred_time: String,
    #[serde(default = "default_duration")]
    pub duration: u32,
    pub purpose: String,
    #[serde(default)]
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct InquiryRequest {
    pub contact: ContactInfo,
    #[serde(default)]
    pub inquiry_type: InquiryType,
    pub subject: String,
    pub description: String,
    #[serde(default)]
    pub priority: InquiryPriority,
    #[serde(default)]
    pub preferred_contact_method: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<u64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
    pub ai_enabled: bool,
    pub active_sessions: usize,
}

// =============================================================================
// Validation
// =============================================================================

fn require(field: &str, value: &str) -> Result<(), ApiError> {
    if value.trim().is_empty() {
        return Err(ApiError::BadRequest(format!("{} is required", field)));
    }
    Ok(())
}

fn require_email(field: &str, value: &str) -> Result<(), ApiError> {
    require(field, value)?;
    if !value.contains('@') {
        return Err(ApiError::BadRequest(format!("{} is not a valid email address", field)));
    }
    Ok(())
}

fn validate_contact(contact: &ContactInfo) -> Result<(), ApiError> {
    require("contact.name", &contact.name)?;
    require_email("contact.email", &contact.email)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

// =============================================================================
// Chat
// =============================================================================

/// POST /chat - send one message to the receptionist.
pub async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ResponseBundle>, ApiError> {
    ChatOrchestrator::validate_message(&req.message)?;

    let bundle = state
        .orchestrator
        .chat(
            &req.message,
            req.conversation_id,
            req.user_name.as_deref(),
            req.user_email.as_deref(),
        )
        .await;
    Ok(Json(bundle))
}

/// DELETE /chat/{conversation_id} - forget a conversation.
pub async fn clear_chat(
    State(state): State<AppState>,
    Path(conversation_id): Path<String>,
) -> Json<MessageResponse> {
    state.orchestrator.clear_session(&conversation_id);
    Json(MessageResponse {
        message: "Conversation cleared successfully".to_string(),
    })
}

// =============================================================================
// Appointments
// =============================================================================

/// POST /appointments - record an appointment request and notify everyone.
pub async fn create_appointment(
    State(state): State<AppState>,
    Json(req): Json<AppointmentRequest>,
) -> Result<Json<Appointment>, ApiError> {
    validate_contact(&req.contact)?;
    require("preferred_date", &req.preferred_date)?;
    require("preferred_time", &req.preferred_time)?;
    require("purpose", &req.purpose)?;

    let now = Utc::now();
    let appointment = Appointment {
        id: Uuid::new_v4(),
        contact: ContactInfo {
            notes: None,
            ..req.contact.clone()
        },
        scheduled_date: req.preferred_date,
        scheduled_time: req.preferred_time,
        duration: req.duration,
        purpose: req.purpose,
        status: AppointmentStatus::Pending,
        notes: non_empty(req.notes),
        created_at: now,
        updated_at: now,
    };
    let contact = Contact {
        id: Uuid::new_v4(),
        info: ContactInfo {
            notes: Some(format!("Appointment request: {}", appointment.purpose)),
            ..appointment.contact.clone()
        },
        created_at: now,
    };

    let saved = state
        .records
        .appointments
        .save(&appointment)
        .and_then(|_| state.records.contacts.save(&contact));
    if let Err(e) = saved {
        tracing::error!(error = %e, "Failed to store appointment");
        return Err(ApiError::Internal(
            "Failed to create appointment. Please try again.".to_string(),
        ));
    }
    tracing::info!(appointment_id = %appointment.id, "Appointment created");

    let company = &state.config.company;
    dispatch(
        Arc::clone(&state.notifier),
        templates::appointment_auto_reply(company, &appointment),
    );
    dispatch(
        Arc::clone(&state.notifier),
        templates::appointment_lead(company, &appointment),
    );
    state.reminder.schedule(CallbackLead {
        name: appointment.contact.name.clone(),
        phone: appointment.contact.phone.clone(),
        email: appointment.contact.email.clone(),
    });

    Ok(Json(appointment))
}

// =============================================================================
// Inquiries
// =============================================================================

/// POST /inquiries - record a customer inquiry.
pub async fn create_inquiry(
    State(state): State<AppState>,
    Json(req): Json<InquiryRequest>,
) -> Result<Json<Inquiry>, ApiError> {
    validate_contact(&req.contact)?;
    require("subject", &req.subject)?;
    require("description", &req.description)?;

    let now = Utc::now();
    let inquiry = Inquiry {
        id: Uuid::new_v4(),
        contact: req.contact.clone(),
        inquiry_type: req.inquiry_type,
        subject: req.subject,
        description: req.description,
        priority: req.priority,
        status: InquiryStatus::Open,
        preferred_contact_method: non_empty(req.preferred_contact_method),
        created_at: now,
        updated_at: now,
    };
    let contact = Contact {
        id: Uuid::new_v4(),
        info: ContactInfo {
            notes: Some(format!("Inquiry: {}", inquiry.subject)),
            ..req.contact
        },
        created_at: now,
    };

    state
        .records
        .inquiries
        .save(&inquiry)
        .and_then(|_| state.records.contacts.save(&contact))
        .map_err(|e| ApiError::Internal(format!("Error creating inquiry: {}", e)))?;
    tracing::info!(inquiry_id = %inquiry.id, "Inquiry created");

    Ok(Json(inquiry))
}

/// GET /inquiries?limit=N - newest first.
pub async fn list_inquiries(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Inquiry>>, ApiError> {
    let limit = params
        .limit
        .unwrap_or(DEFAULT_INQUIRY_LIMIT)
        .min(MAX_INQUIRY_LIMIT);
    let inquiries = state.records.inquiries.list(limit)?;
    Ok(Json(inquiries))
}

/// GET /inquiries/{id}
pub async fn get_inquiry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Inquiry>, ApiError> {
    let not_found = || ApiError::NotFound("Inquiry not found".to_string());
    let id = Uuid::parse_str(&id).map_err(|_| not_found())?;
    state
        .records
        .inquiries
        .find_by_id(id)?
        .map(Json)
        .ok_or_else(not_found)
}

// =============================================================================
// Contact form
// =============================================================================

/// POST /contact - store a contact-form lead and notify.
pub async fn create_contact(
    State(state): State<AppState>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    require("name", &req.name)?;
    require_email("email", &req.email)?;

    let contact = Contact {
        id: Uuid::new_v4(),
        info: ContactInfo {
            name: req.name,
            email: req.email,
            phone: non_empty(req.phone),
            company: non_empty(req.company),
            notes: non_empty(req.message),
        },
        created_at: Utc::now(),
    };

    if let Err(e) = state.records.contacts.save(&contact) {
        tracing::error!(error = %e, "Failed to store contact");
        return Err(ApiError::Internal("Contact submission failed".to_string()));
    }
    tracing::info!(contact_id = %contact.id, "Contact lead stored");

    let company = &state.config.company;
    dispatch(
        Arc::clone(&state.notifier),
        templates::contact_auto_reply(company, &contact.info),
    );
    dispatch(
        Arc::clone(&state.notifier),
        templates::contact_lead(company, &contact.info),
    );

    Ok(Json(StatusResponse {
        status: "success".to_string(),
    }))
}

// =============================================================================
// Health
// =============================================================================

/// GET /health
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        ai_enabled: state.orchestrator.is_ai_enabled(),
        active_sessions: state.orchestrator.active_sessions(),
    })
}
