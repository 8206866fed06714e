//! Conversation state carried across oracle calls.

use serde::{Deserialize, Serialize};

/// Speaker of one conversation turn, serialized in wire form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Standing instruction that frames the whole exchange.
    System,
    /// Requests from the pipeline, including corrective follow-ups.
    User,
    /// Oracle replies.
    Assistant,
}

/// One `{role, content}` turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Role,
    pub content: String,
}

impl Turn {
    /// Create a turn.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Append-only turn log for a single pipeline instance.
///
/// The whole history is resent on every oracle call; turns are never
/// rewritten or dropped. Each instance owns its conversation outright, so
/// no synchronization is involved.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conversation {
    turns: Vec<Turn>,
}

impl Conversation {
    /// Start a conversation seeded with the system instruction.
    pub fn with_system(instruction: impl Into<String>) -> Self {
        let mut conversation = Self::default();
        conversation.push(Role::System, instruction);
        conversation
    }

    /// Append a turn.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.turns.push(Turn::new(role, content));
    }

    /// Append a user turn.
    pub fn push_user(&mut self, content: impl Into<String>) {
        self.push(Role::User, content);
    }

    /// Append an assistant turn.
    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.push(Role::Assistant, content);
    }

    /// All turns in order of appearance.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of turns so far.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether no turns have been recorded.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    /// Content of the most recent assistant turn, if any.
    pub fn last_assistant(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.role == Role::Assistant)
            .map(|turn| turn.content.as_str())
    }
}
