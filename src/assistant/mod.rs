//! Shopping assistant
//!
//! Answers chat messages by keyword intent and keeps a short history per
//! session. Voice input is accepted but transcription is mocked.

pub mod intent;
mod registry;
mod session;

pub use intent::{Action, Intent, Keyword, KeywordIntent, Reply};
pub use registry::IntentRegistry;
pub use session::{new_session_id, ChatMessage, ConversationStore, Role};

use crate::config::ChatSettings;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

const MOCK_TRANSCRIPTION: &str = "Hello, I'm looking for handmade pottery items";
const MOCK_TRANSCRIPTION_CONFIDENCE: f64 = 0.94;

/// Outcome of one user message
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exchange {
    pub message: ChatMessage,
    pub session_id: String,
    pub conversation_length: usize,
}

/// A slice of a session's history
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct History {
    pub messages: Vec<ChatMessage>,
    pub session_id: String,
    pub total_messages: usize,
}

/// Speech-to-text output
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcription {
    pub transcription: String,
    pub confidence: f64,
    pub language: String,
    pub processed_at: DateTime<Utc>,
}

/// Chat front end combining intents and session storage
pub struct Assistant {
    intents: IntentRegistry,
    sessions: ConversationStore,
}

impl Assistant {
    pub fn new(intents: IntentRegistry, sessions: ConversationStore) -> Self {
        Self { intents, sessions }
    }

    pub fn from_settings(settings: &ChatSettings) -> Self {
        Self::new(
            IntentRegistry::with_defaults(),
            ConversationStore::new(
                settings.history_limit,
                settings.session_ttl_secs,
                settings.max_sessions,
            ),
        )
    }

    /// Record a user message and the assistant's reply. A missing session id
    /// starts a new session.
    pub async fn send(&self, session_id: Option<String>, message: &str) -> Exchange {
        let session_id = session_id
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(new_session_id);
        let message = message.trim();

        let user = ChatMessage::user(message);
        let reply = ChatMessage::assistant(self.intents.respond(message));
        let conversation_length = self
            .sessions
            .append(&session_id, vec![user, reply.clone()])
            .await;

        Exchange {
            message: reply,
            session_id,
            conversation_length,
        }
    }

    /// The most recent `limit` messages of a session
    pub async fn history(&self, session_id: &str, limit: usize) -> History {
        let mut messages = self.sessions.history(session_id).await;
        let total_messages = messages.len();
        messages.drain(..total_messages.saturating_sub(limit));

        History {
            messages,
            session_id: session_id.to_string(),
            total_messages,
        }
    }

    /// Drop a session's history
    pub async fn clear(&self, session_id: &str) {
        self.sessions.clear(session_id).await;
        info!("Cleared chat session {}", session_id);
    }

    /// Transcribe recorded audio
    pub fn transcribe(&self, _audio: &str, language: &str) -> Transcription {
        Transcription {
            transcription: MOCK_TRANSCRIPTION.to_string(),
            confidence: MOCK_TRANSCRIPTION_CONFIDENCE,
            language: language.to_string(),
            processed_at: Utc::now(),
        }
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::new(IntentRegistry::with_defaults(), ConversationStore::default())
    }
}
