//! Integration tests for the receptionist API.
//!
//! Each test builds its own in-memory state and drives the router with
//! `oneshot` requests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use receptionist_api::handlers::HealthResponse;
use receptionist_api::{create_router, AppState};
use receptionist_chat::{ChatOrchestrator, LlmBackend, LlmError, Turn};
use receptionist_core::config::ReceptionistConfig;
use receptionist_notify::{Notification, Notifier, NotifyError};
use receptionist_storage::Database;

// =============================================================================
// Helpers
// =============================================================================

struct EchoBackend;

#[async_trait]
impl LlmBackend for EchoBackend {
    async fn complete(&self, _model: &str, messages: &[Turn]) -> Result<String, LlmError> {
        let last = messages.last().map(|t| t.content.as_str()).unwrap_or("");
        Ok(format!("You said: {}", last))
    }
}

#[derive(Default)]
struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap().clone()
    }

    /// Background dispatch is asynchronous; wait until `n` messages arrive.
    async fn wait_for(&self, n: usize) -> Vec<Notification> {
        for _ in 0..100 {
            if self.sent.lock().unwrap().len() >= n {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    fn name(&self) -> &'static str {
        "recording"
    }

    async fn send(&self, notification: &Notification) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(notification.clone());
        Ok(())
    }
}

fn make_state_with(
    config: ReceptionistConfig,
    backend: Option<Arc<dyn LlmBackend>>,
    notifier: Arc<RecordingNotifier>,
) -> AppState {
    let orchestrator =
        ChatOrchestrator::new(&config.company, config.llm.model.clone(), backend);
    let db = Database::in_memory().unwrap();
    AppState::new(config, orchestrator, db, notifier)
}

fn make_state(backend: Option<Arc<dyn LlmBackend>>) -> (AppState, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::default());
    let state = make_state_with(ReceptionistConfig::default(), backend, notifier.clone());
    (state, notifier)
}

fn ai_state() -> (AppState, Arc<RecordingNotifier>) {
    make_state(Some(Arc::new(EchoBackend)))
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

fn delete(uri: &str) -> Request<Body> {
    Request::delete(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, json: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(json.to_string()))
        .unwrap()
}

async fn body_json(resp: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), 1024 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn appointment_body() -> Value {
    serde_json::json!({
        "contact": {
            "name": "Ada Lovelace",
            "email": "ada@example.com",
            "phone": "+44 20 7946 0000",
            "company": "Analytical Engines"
        },
        "preferred_date": "2026-10-21",
        "preferred_time": "10:00",
        "purpose": "Mobile app scoping"
    })
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_reports_degraded_mode() {
    let (state, _) = make_state(None);
    let resp = create_router(state).oneshot(get("/health")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let health: HealthResponse = serde_json::from_value(body_json(resp).await).unwrap();
    assert_eq!(health.status, "healthy");
    assert!(!health.ai_enabled);
    assert_eq!(health.active_sessions, 0);
}

// =============================================================================
// Chat
// =============================================================================

#[tokio::test]
async fn test_chat_degraded_returns_canned_reply() {
    let (state, _) = make_state(None);
    let resp = create_router(state)
        .oneshot(post_json("/chat", serde_json::json!({"message": "urgent appointment"})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(
        body["response"],
        "AI service is currently unavailable. Please contact us directly."
    );
    assert!(body["conversation_id"].is_null());
    assert_eq!(body["suggested_actions"], serde_json::json!([]));
    assert_eq!(body["requires_followup"], false);
}

#[tokio::test]
async fn test_chat_rejects_empty_message() {
    let (state, _) = ai_state();
    let resp = create_router(state)
        .oneshot(post_json("/chat", serde_json::json!({"message": "   "})))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(resp).await["error"], "bad_request");
}

#[tokio::test]
async fn test_chat_conversation_lifecycle() {
    let (state, _) = ai_state();
    let app = create_router(state.clone());

    let resp = app
        .clone()
        .oneshot(post_json(
            "/chat",
            serde_json::json!({"message": "what services do you offer?", "user_name": "Ada"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    let id = body["conversation_id"].as_str().unwrap().to_string();
    assert_eq!(
        body["response"],
        "You said: My name is Ada. what services do you offer?"
    );
    assert_eq!(body["suggested_actions"], serde_json::json!(["provide_service_info"]));
    assert_eq!(state.orchestrator.active_sessions(), 1);

    let resp = app
        .clone()
        .oneshot(delete(&format!("/chat/{}", id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        body_json(resp).await["message"],
        "Conversation cleared successfully"
    );
    assert_eq!(state.orchestrator.active_sessions(), 0);

    // clearing again is still a success
    let resp = app.oneshot(delete(&format!("/chat/{}", id))).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
}

// =============================================================================
// Appointments
// =============================================================================

#[tokio::test]
async fn test_create_appointment_stores_and_notifies() {
    let (state, notifier) = ai_state();
    let resp = create_router(state.clone())
        .oneshot(post_json("/appointments", appointment_body()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = body_json(resp).await;
    assert_eq!(body["status"], "pending");
    assert_eq!(body["duration"], 30);
    assert_eq!(body["scheduled_date"], "2026-10-21");

    assert_eq!(state.records.appointments.count().unwrap(), 1);
    let contacts = state.records.contacts.list(10).unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(
        contacts[0].info.notes.as_deref(),
        Some("Appointment request: Mobile app scoping")
    );

    let sent = notifier.wait_for(2).await;
    let recipients: Vec<&str> = sent.iter().map(|n| n.to.as_str()).collect();
    assert!(recipients.contains(&"ada@example.com"));
    assert!(recipients.contains(&state.config.company.email.as_str()));
}

#[tokio::test]
async fn test_create_appointment_schedules_callback_reminder() {
    let mut config = ReceptionistConfig::default();
    config.email.callback_reminder_secs = 0;
    let notifier = Arc::new(RecordingNotifier::default());
    let state = make_state_with(config, None, notifier.clone());

    let resp = create_router(state)
        .oneshot(post_json("/appointments", appointment_body()))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let sent = notifier.wait_for(3).await;
    assert!(sent
        .iter()
        .any(|n| n.subject == "Callback Reminder - New Lead" && n.body.contains("Ada Lovelace")));
}

#[tokio::test]
async fn test_create_appointment_rejects_bad_email() {
    let (state, notifier) = ai_state();
    let mut body = appointment_body();
    body["contact"]["email"] = Value::from("not-an-email");

    let resp = create_router(state.clone())
        .oneshot(post_json("/appointments", body))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(state.records.appointments.count().unwrap(), 0);
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_create_appointment_missing_field_is_rejected() {
    let (state, _) = ai_state();
    let resp = create_router(state)
        .oneshot(post_json(
            "/appointments",
            serde_json::json!({"contact": {"name": "Ada", "email": "ada@example.com"}}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// =============================================================================
// Inquiries
// =============================================================================

#[tokio::test]
async fn test_inquiry_create_list_and_get() {
    let (state, _) = ai_state();
    let app = create_router(state.clone());

    let resp = app
        .clone()
        .oneshot(post_json(
            "/inquiries",
            serde_json::json!({
                "contact": {"name": "Grace", "email": "grace@example.com"},
                "inquiry_type": "sales",
                "subject": "Pricing",
                "description": "How much for a mobile app?",
                "priority": "high"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let created = body_json(resp).await;
    assert_eq!(created["status"], "open");
    assert_eq!(created["inquiry_type"], "sales");
    let id = created["id"].as_str().unwrap().to_string();

    let contacts = state.records.contacts.list(10).unwrap();
    assert_eq!(contacts[0].info.notes.as_deref(), Some("Inquiry: Pricing"));

    let resp = app.clone().oneshot(get("/inquiries?limit=5")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let list = body_json(resp).await;
    assert_eq!(list.as_array().unwrap().len(), 1);
    assert_eq!(list[0]["subject"], "Pricing");

    let resp = app
        .oneshot(get(&format!("/inquiries/{}", id)))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await["priority"], "high");
}

#[tokio::test]
async fn test_get_inquiry_not_found() {
    let (state, _) = ai_state();
    let app = create_router(state);

    let resp = app
        .clone()
        .oneshot(get("/inquiries/00000000-0000-0000-0000-000000000000"))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(resp).await["message"], "Inquiry not found");

    let resp = app.oneshot(get("/inquiries/not-a-uuid")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_inquiries_empty() {
    let (state, _) = ai_state();
    let resp = create_router(state).oneshot(get("/inquiries")).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!([]));
}

// =============================================================================
// Contact form
// =============================================================================

#[tokio::test]
async fn test_contact_form_success() {
    let (state, notifier) = ai_state();
    let resp = create_router(state.clone())
        .oneshot(post_json(
            "/contact",
            serde_json::json!({
                "name": "Linus",
                "email": "linus@example.com",
                "message": "Call me back"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, serde_json::json!({"status": "success"}));

    let contacts = state.records.contacts.list(10).unwrap();
    assert_eq!(contacts.len(), 1);
    assert_eq!(contacts[0].info.notes.as_deref(), Some("Call me back"));

    let sent = notifier.wait_for(2).await;
    assert_eq!(sent.len(), 2);
    assert!(sent.iter().any(|n| n.subject == "New Contact Lead"));
}

#[tokio::test]
async fn test_contact_form_requires_name() {
    let (state, _) = ai_state();
    let resp = create_router(state)
        .oneshot(post_json(
            "/contact",
            serde_json::json!({"name": "", "email": "x@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}
