//! Error types for process optimization

use thiserror::Error;

use crate::service::diagram::DiagramError;
use crate::service::llm::LlmError;

/// Error type for optimization runs.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OptimizationError {
    #[error("model call failed: {0}")]
    Completion(#[from] LlmError),

    #[error("diagram generation failed: {0}")]
    Diagram(#[from] DiagramError),
}
