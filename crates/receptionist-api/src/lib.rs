//! HTTP surface for the receptionist: chat, appointments, inquiries,
//! contact form and health.

pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::ApiError;
pub use routes::{create_router, start_server};
pub use state::AppState;
