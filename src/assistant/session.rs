//! Per-session conversation history

use super::intent::{Action, Reply};
use chrono::{DateTime, Utc};
use moka::future::Cache;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Who sent a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One entry in a conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        Self {
            id: new_message_id(),
            role: Role::User,
            content: content.to_string(),
            timestamp: Utc::now(),
            suggestions: None,
            actions: None,
        }
    }

    pub fn assistant(reply: Reply) -> Self {
        Self {
            id: new_message_id(),
            role: Role::Assistant,
            content: reply.content,
            timestamp: Utc::now(),
            suggestions: Some(reply.suggestions),
            actions: Some(reply.actions),
        }
    }
}

fn new_message_id() -> String {
    format!("msg_{}", Uuid::new_v4().simple())
}

/// Fresh session identifier
pub fn new_session_id() -> String {
    format!("session_{}", Uuid::new_v4().simple())
}

/// Conversation histories keyed by session id.
///
/// Each session keeps only its most recent `history_limit` messages and
/// expires after the configured idle time.
pub struct ConversationStore {
    sessions: Cache<String, Vec<ChatMessage>>,
    history_limit: usize,
}

impl ConversationStore {
    pub fn new(history_limit: usize, ttl_seconds: u64, max_sessions: u64) -> Self {
        let sessions = Cache::builder()
            .time_to_idle(Duration::from_secs(ttl_seconds))
            .max_capacity(max_sessions)
            .build();

        Self {
            sessions,
            history_limit,
        }
    }

    /// Append messages to a session, returning the retained history length
    pub async fn append(&self, session_id: &str, messages: Vec<ChatMessage>) -> usize {
        let limit = self.history_limit;
        let entry = self
            .sessions
            .entry(session_id.to_string())
            .and_upsert_with(|existing| {
                let mut history = existing.map(|e| e.into_value()).unwrap_or_default();
                history.extend(messages);
                let excess = history.len().saturating_sub(limit);
                history.drain(..excess);
                std::future::ready(history)
            })
            .await;

        entry.value().len()
    }

    /// Full retained history of a session, oldest first
    pub async fn history(&self, session_id: &str) -> Vec<ChatMessage> {
        self.sessions.get(session_id).await.unwrap_or_default()
    }

    /// Forget a session
    pub async fn clear(&self, session_id: &str) {
        self.sessions.invalidate(session_id).await;
    }

    /// Number of live sessions
    pub fn session_count(&self) -> u64 {
        self.sessions.entry_count()
    }
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self::new(20, 86_400, 10_000)
    }
}
