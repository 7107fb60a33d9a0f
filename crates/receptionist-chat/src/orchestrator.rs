//! Chat orchestrator: resolves sessions, calls the completion backend and
//! derives the side-channel signals returned with every reply.

use std::sync::Arc;

use tracing::{error, info, warn};
use uuid::Uuid;

use receptionist_core::config::{CompanyConfig, ReceptionistConfig};

use crate::error::{ChatError, LlmError};
use crate::llm::{LlmBackend, OpenAiClient};
use crate::persona::build_preamble;
use crate::session::SessionStore;
use crate::signals::{self, CONTACT_SUPPORT};
use crate::types::{ResponseBundle, Turn};

/// Maximum message length in characters.
pub const MAX_MESSAGE_LENGTH: usize = 4000;

const DEGRADED_RESPONSE: &str = "AI service is currently unavailable. Please contact us directly.";

/// Central coordinator for receptionist conversations.
///
/// The backend is fixed at construction. Without one the orchestrator stays
/// in degraded mode for its whole lifetime and never touches the session
/// table.
pub struct ChatOrchestrator {
    backend: Option<Arc<dyn LlmBackend>>,
    sessions: SessionStore,
    model: String,
    support_email: String,
}

impl ChatOrchestrator {
    pub fn new(
        company: &CompanyConfig,
        model: impl Into<String>,
        backend: Option<Arc<dyn LlmBackend>>,
    ) -> Self {
        Self {
            backend,
            sessions: SessionStore::new(build_preamble(company)),
            model: model.into(),
            support_email: company.email.clone(),
        }
    }

    /// Build an orchestrator backed by the configured OpenAI-compatible
    /// endpoint, or a degraded one if no API key is set.
    pub fn from_config(config: &ReceptionistConfig) -> Self {
        let backend: Option<Arc<dyn LlmBackend>> = match OpenAiClient::from_config(&config.llm) {
            Some(client) => {
                info!(model = %config.llm.model, base_url = %config.llm.base_url, "Completion client initialized");
                Some(Arc::new(client))
            }
            None => {
                warn!("No LLM API key configured - AI chat disabled");
                None
            }
        };
        Self::new(&config.company, config.llm.model.clone(), backend)
    }

    /// Reject messages the orchestrator should never see.
    pub fn validate_message(message: &str) -> Result<(), ChatError> {
        if message.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        if message.chars().count() > MAX_MESSAGE_LENGTH {
            return Err(ChatError::MessageTooLong(MAX_MESSAGE_LENGTH));
        }
        Ok(())
    }

    /// Handle one visitor message.
    ///
    /// Never fails: backend problems come back as a canned reply. The user
    /// turn stays in history even when no assistant reply was produced, so
    /// the next call on the same conversation re-sends it.
    pub async fn chat(
        &self,
        message: &str,
        conversation_id: Option<String>,
        user_name: Option<&str>,
        user_email: Option<&str>,
    ) -> ResponseBundle {
        let Some(backend) = self.backend.as_ref() else {
            warn!("Chat requested but AI is disabled");
            return ResponseBundle {
                response: DEGRADED_RESPONSE.to_string(),
                conversation_id,
                suggested_actions: Vec::new(),
                requires_followup: false,
            };
        };

        let conversation_id = match conversation_id.filter(|id| !id.is_empty()) {
            Some(id) => id,
            None => {
                let id = Uuid::new_v4().to_string();
                info!(conversation_id = %id, "Generated new conversation ID");
                id
            }
        };

        // The exchange runs as its own task so a dropped caller cannot cut it
        // short; the assistant turn is recorded either way.
        let handle = self.sessions.get_or_create(&conversation_id);
        let backend = Arc::clone(backend);
        let model = self.model.clone();
        let user_turn = Turn::user(compose_user_turn(message, user_name, user_email));
        let exchange = tokio::spawn(async move {
            let mut session = handle.lock().await;
            session.push(user_turn);
            let reply = backend.complete(&model, session.turns()).await?;
            session.push(Turn::assistant(reply.clone()));
            Ok::<_, LlmError>(reply)
        });

        let outcome = match exchange.await {
            Ok(result) => result.map_err(|e| e.to_string()),
            Err(e) => Err(format!("completion task aborted: {}", e)),
        };

        match outcome {
            Ok(reply) => {
                let suggested_actions = signals::extract_suggested_actions(message);
                let requires_followup = signals::requires_followup(message);
                info!(
                    conversation_id = %conversation_id,
                    ?suggested_actions,
                    requires_followup,
                    "Chat reply generated"
                );

                ResponseBundle {
                    response: reply,
                    conversation_id: Some(conversation_id),
                    suggested_actions,
                    requires_followup,
                }
            }
            Err(e) => {
                error!(conversation_id = %conversation_id, error = %e, "Completion request failed");
                ResponseBundle {
                    response: format!(
                        "AI service temporarily unavailable. Please contact us at {}",
                        self.support_email
                    ),
                    conversation_id: Some(conversation_id),
                    suggested_actions: vec![CONTACT_SUPPORT.to_string()],
                    requires_followup: true,
                }
            }
        }
    }

    /// Forget a conversation. Unknown ids are ignored.
    pub fn clear_session(&self, conversation_id: &str) {
        if self.sessions.remove(conversation_id) {
            info!(conversation_id = %conversation_id, "Conversation cleared");
        }
    }

    /// Snapshot of a conversation's history.
    pub async fn session_turns(&self, conversation_id: &str) -> Option<Vec<Turn>> {
        self.sessions.turns(conversation_id).await
    }

    pub fn is_ai_enabled(&self) -> bool {
        self.backend.is_some()
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// Prefix the visitor's words with whatever identity they gave us.
fn compose_user_turn(message: &str, user_name: Option<&str>, user_email: Option<&str>) -> String {
    let mut content = String::new();
    if let Some(name) = user_name.filter(|n| !n.is_empty()) {
        content.push_str(&format!("My name is {}. ", name));
    }
    if let Some(email) = user_email.filter(|e| !e.is_empty()) {
        content.push_str(&format!("My email is {}. ", email));
    }
    content.push_str(message);
    content
}
