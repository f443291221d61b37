//! Error types for diagram generation

use thiserror::Error;

use crate::service::llm::LlmError;

/// Error type for diagram generation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DiagramError {
    #[error("model call failed: {0}")]
    Completion(#[from] LlmError),
}
