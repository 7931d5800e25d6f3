//! The core models for managing a stateful chat with an LLM.
use serde::{Deserialize, Serialize};

/// A user message and the reply to it. `assistant` is `None` only
/// while the reply is being fetched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub user: String,
    pub assistant: Option<String>,
}

impl Turn {
    pub fn new(user: &str, assistant: &str) -> Self {
        Self {
            user: user.to_string(),
            assistant: Some(assistant.to_string()),
        }
    }

    pub fn pending(user: &str) -> Self {
        Self {
            user: user.to_string(),
            assistant: None,
        }
    }
}

/// Ordered turns of one session. Only the last turn's reply can
/// change after it is set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Transcript(Vec<Turn>);

impl Transcript {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn new_with_turns(turns: Vec<Turn>) -> Self {
        Self(turns)
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn last(&self) -> Option<&Turn> {
        self.0.last()
    }

    pub fn push(&mut self, turn: Turn) {
        self.0.push(turn)
    }

    /// Replace the reply of the most recent turn. Does nothing on an
    /// empty transcript.
    pub fn set_last_reply(&mut self, reply: String) {
        if let Some(turn) = self.0.last_mut() {
            turn.assistant = Some(reply);
        }
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }
}
