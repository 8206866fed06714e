//! Mock oracle for testing.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Conversation;
use crate::domain::ports::Oracle;

/// One scripted mock reply.
#[derive(Debug, Clone)]
pub struct MockReply {
    /// Assistant text returned on success
    pub content: String,
    /// Whether to simulate a transport failure instead
    pub fail: bool,
    /// Error message if failing
    pub error_message: Option<String>,
}

impl MockReply {
    /// A successful assistant reply.
    pub fn success(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            fail: false,
            error_message: None,
        }
    }

    /// A simulated transport failure.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            content: String::new(),
            fail: true,
            error_message: Some(error.into()),
        }
    }
}

/// Mock oracle serving scripted replies in order.
///
/// Running past the end of the script fails the same way a dead endpoint
/// would, which keeps accidental extra calls visible in tests.
pub struct MockOracle {
    script: Mutex<VecDeque<MockReply>>,
    calls: AtomicUsize,
    seen_turns: Mutex<Vec<usize>>,
}

impl MockOracle {
    /// An oracle with an empty script; every call fails.
    pub fn new() -> Self {
        Self {
            script: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            seen_turns: Mutex::new(Vec::new()),
        }
    }

    /// An oracle scripted with successful replies, served in order.
    pub fn with_replies<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            script: Mutex::new(replies.into_iter().map(MockReply::success).collect()),
            calls: AtomicUsize::new(0),
            seen_turns: Mutex::new(Vec::new()),
        }
    }

    /// Append one scripted reply.
    pub async fn queue_reply(&self, reply: MockReply) {
        self.script.lock().await.push_back(reply);
    }

    /// How many times `converse` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Conversation length observed at each call, in call order.
    pub async fn seen_turns(&self) -> Vec<usize> {
        self.seen_turns.lock().await.clone()
    }
}

impl Default for MockOracle {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Oracle for MockOracle {
    fn name(&self) -> &str {
        "mock"
    }

    async fn converse(&self, conversation: &mut Conversation) -> DomainResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_turns.lock().await.push(conversation.len());

        let reply = self.script.lock().await.pop_front().ok_or_else(|| {
            DomainError::OracleUnavailable("mock reply script exhausted".to_string())
        })?;

        if reply.fail {
            return Err(DomainError::OracleUnavailable(
                reply
                    .error_message
                    .unwrap_or_else(|| "mock transport failure".to_string()),
            ));
        }

        conversation.push_assistant(reply.content.clone());
        Ok(reply.content)
    }
}
