//! Oracle port: conversational exchanges with the generation service.

use async_trait::async_trait;

use crate::domain::errors::DomainResult;
use crate::domain::models::Conversation;

/// External code-generation service.
///
/// Implementations send the full turn history, append the assistant reply
/// to the conversation, and return the reply text. Exactly one call mutates
/// one conversation at a time; the exclusive borrow enforces that, and
/// conversations are never shared across pipeline instances.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Adapter name for log fields.
    fn name(&self) -> &str;

    /// Send the conversation so far; append and return the assistant reply.
    ///
    /// Transport and API failures surface as
    /// [`DomainError::OracleUnavailable`](crate::domain::errors::DomainError::OracleUnavailable).
    /// Callers classify the affected instance and move on; there is no retry
    /// at this seam.
    async fn converse(&self, conversation: &mut Conversation) -> DomainResult<String>;
}
