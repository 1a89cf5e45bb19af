//! Per-session conversation state
//!
//! Created once per session, mutated after every turn, discarded with the
//! session. History is append-only; readers get immutable slices.

use std::collections::HashMap;

use uuid::Uuid;

use advisor_core::{Language, Turn};

/// Session-scoped conversation state
#[derive(Debug)]
pub struct SessionContext {
    session_id: Uuid,
    /// Language detected on the most recent turn
    pub language: Language,
    history: Vec<Turn>,
    memory: HashMap<String, String>,
    interests: Vec<String>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self {
            session_id: Uuid::new_v4(),
            language: Language::English,
            history: Vec::new(),
            memory: HashMap::new(),
            interests: Vec::new(),
        }
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Append a turn to the history
    pub fn record_turn(&mut self, turn: Turn) {
        self.history.push(turn);
    }

    pub fn turn_count(&self) -> usize {
        self.history.len()
    }

    /// Immutable view of the last `n` turns
    pub fn recent(&self, n: usize) -> &[Turn] {
        let skip = self.history.len().saturating_sub(n);
        &self.history[skip..]
    }

    /// Store a fact for later turns
    pub fn remember(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.memory.insert(key.into(), value.into());
    }

    /// Recall a stored fact
    pub fn recall(&self, key: &str) -> Option<&str> {
        self.memory.get(key).map(String::as_str)
    }

    /// Track interest in a product; duplicates are ignored
    pub fn note_interest(&mut self, product_key: impl Into<String>) {
        let key = product_key.into();
        if !self.interests.contains(&key) {
            self.interests.push(key);
        }
    }

    pub fn interests(&self) -> &[String] {
        &self.interests
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}
