//! Conversation orchestration for the AI receptionist.
//!
//! Owns the in-memory session table, the persona preamble and the keyword
//! signals, and talks to an OpenAI-compatible completion endpoint.

pub mod error;
pub mod llm;
pub mod orchestrator;
pub mod persona;
pub mod session;
pub mod signals;
pub mod types;

pub use error::{ChatError, LlmError};
pub use llm::{LlmBackend, OpenAiClient};
pub use orchestrator::ChatOrchestrator;
pub use session::SessionStore;
pub use types::{ResponseBundle, Role, Turn};
