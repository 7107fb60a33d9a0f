//! Router setup with all API routes and middleware.

use std::future::Future;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderValue, Method};
use axum::routing::{delete, get, post};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use receptionist_core::error::ReceptionistError;

use crate::handlers;
use crate::state::AppState;

/// Build the CORS layer from the configured origin list. `*` allows any
/// origin; unparseable entries are skipped.
fn cors_layer(origins: &[String]) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    if origins.iter().any(|o| o == "*") {
        return base.allow_origin(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    base.allow_origin(AllowOrigin::list(allowed))
}

/// Create the axum Router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origins);

    Router::new()
        .route("/health", get(handlers::health))
        .route("/chat", post(handlers::chat))
        .route("/chat/{conversation_id}", delete(handlers::clear_chat))
        .route("/appointments", post(handlers::create_appointment))
        .route(
            "/inquiries",
            get(handlers::list_inquiries).post(handlers::create_inquiry),
        )
        .route("/inquiries/{id}", get(handlers::get_inquiry))
        .route("/contact", post(handlers::create_contact))
        .layer(DefaultBodyLimit::max(1024 * 1024)) // 1MB global limit
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the configured address and serve until `shutdown` resolves.
///
/// Pending callback reminders are cancelled once the server stops.
pub async fn start_server<F>(state: AppState, shutdown: F) -> Result<(), ReceptionistError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = format!("{}:{}", state.config.server.host, state.config.server.port);
    let reminder = state.reminder.clone();
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| ReceptionistError::Api(format!("Failed to bind {}: {}", addr, e)))?;
    tracing::info!("Receptionist API listening on http://{}", addr);

    let result = axum::serve(listener, router)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| ReceptionistError::Api(format!("Server error: {}", e)));

    reminder.shutdown();
    tracing::info!("Server stopped");
    result
}
