//! In-memory session table.
//!
//! Sessions live in a sharded map. Each one sits behind its own async
//! mutex so a `chat` call can hold it across the completion request without
//! blocking any other conversation.

use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::debug;

use crate::types::{Role, Turn};

/// One conversation's history. Always starts with the system preamble.
#[derive(Debug, Clone)]
pub struct Session {
    turns: Vec<Turn>,
}

impl Session {
    fn new(preamble: &str) -> Self {
        Self {
            turns: vec![Turn::system(preamble)],
        }
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Append a user or assistant turn. System turns are rejected.
    pub(crate) fn push(&mut self, turn: Turn) {
        debug_assert!(turn.role != Role::System, "system turn appended mid-session");
        if turn.role != Role::System {
            self.turns.push(turn);
        }
    }
}

pub type SessionHandle = Arc<Mutex<Session>>;

/// Concurrent map from conversation id to session.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<String, SessionHandle>,
    preamble: String,
}

impl SessionStore {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            sessions: DashMap::new(),
            preamble: preamble.into(),
        }
    }

    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Fetch the session for `id`, seeding a new one if the id is unknown.
    pub fn get_or_create(&self, id: &str) -> SessionHandle {
        match self.sessions.entry(id.to_string()) {
            Entry::Occupied(entry) => Arc::clone(entry.get()),
            Entry::Vacant(entry) => {
                debug!(conversation_id = %id, "Creating new conversation");
                let handle = Arc::new(Mutex::new(Session::new(&self.preamble)));
                entry.insert(Arc::clone(&handle));
                handle
            }
        }
    }

    /// Drop a session. Returns whether it existed.
    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    /// Snapshot of a session's turns, waiting for any in-flight call on it.
    pub async fn turns(&self, id: &str) -> Option<Vec<Turn>> {
        let handle = self.sessions.get(id).map(|entry| Arc::clone(entry.value()))?;
        let session = handle.lock().await;
        Some(session.turns().to_vec())
    }

    pub fn contains(&self, id: &str) -> bool {
        self.sessions.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_session_is_seeded_with_preamble() {
        let store = SessionStore::new("persona");
        store.get_or_create("a");

        let turns = store.turns("a").await.unwrap();
        assert_eq!(turns, vec![Turn::system("persona")]);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_returns_same_session() {
        let store = SessionStore::new("persona");
        let first = store.get_or_create("a");
        first.lock().await.push(Turn::user("hi"));

        let second = store.get_or_create("a");
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(second.lock().await.turns().len(), 2);
    }

    #[tokio::test]
    async fn test_appended_turns_follow_preamble() {
        let store = SessionStore::new("persona");
        let handle = store.get_or_create("a");
        handle.lock().await.push(Turn::assistant("hello"));

        let turns = store.turns("a").await.unwrap();
        assert_eq!(turns[0].role, Role::System);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let store = SessionStore::new("persona");
        store.get_or_create("a");
        assert!(store.remove("a"));
        assert!(!store.remove("a"));
        assert!(!store.remove("never-existed"));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_turns_for_unknown_session() {
        let store = SessionStore::new("persona");
        assert!(store.turns("missing").await.is_none());
        assert!(!store.contains("missing"));
    }
}
