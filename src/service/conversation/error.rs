//! Error types for the conversation agent

use thiserror::Error;

use crate::service::llm::LlmError;

/// Error type for conversation turns.
///
/// Only transport-level model failures surface here; malformed model content
/// is absorbed into a degraded result and is not an error.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConversationError {
    #[error("model call failed: {0}")]
    Completion(#[from] LlmError),
}
