//! Ordered registry of assistant intents

use super::intent::{self, Intent, Reply};
use std::sync::Arc;
use tracing::debug;

/// Intents consulted in registration order; the first match answers
pub struct IntentRegistry {
    intents: Vec<Arc<dyn Intent>>,
    fallback: Reply,
}

impl IntentRegistry {
    /// Create an empty registry that always answers with `fallback`
    pub fn new(fallback: Reply) -> Self {
        Self {
            intents: Vec::new(),
            fallback,
        }
    }

    /// Create registry with the built-in intents
    pub fn with_defaults() -> Self {
        let mut registry = Self::new(intent::fallback());
        for builtin in intent::builtin() {
            registry.register(Arc::new(builtin));
        }
        registry
    }

    /// Register an intent after the existing ones
    pub fn register(&mut self, intent: Arc<dyn Intent>) {
        self.intents.push(intent);
    }

    /// Answer a user message
    pub fn respond(&self, message: &str) -> Reply {
        let lower = message.to_lowercase();
        match self.intents.iter().find(|i| i.matches(&lower)) {
            Some(intent) => {
                debug!("Message matched intent {}", intent.name());
                intent.reply(message)
            }
            None => self.fallback.clone(),
        }
    }

    /// Names of registered intents in priority order
    pub fn names(&self) -> Vec<&str> {
        self.intents.iter().map(|i| i.name()).collect()
    }
}

impl Default for IntentRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
