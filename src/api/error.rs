//! Unified API error handling
//!
//! This module provides a consistent error response format across all API
//! endpoints. Only transport-level failures reach this layer; degraded model
//! content is returned as a normal 200 body by design.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::Serialize;
use uuid::Uuid;

use crate::service::conversation::ConversationError;
use crate::service::diagram::DiagramError;
use crate::service::llm::LlmError;
use crate::service::optimization::OptimizationError;

/// Standard error response format
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error type/code
    pub error: String,
    /// Human-readable error message
    pub message: String,
    /// Unique request ID for tracing
    pub request_id: String,
}

/// Unified API error type
///
/// All API endpoints should return `Result<T, ApiError>` for consistent
/// error handling.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ApiError {
    /// Bad request / validation error (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Upstream model service error (502)
    #[error("Model service error: {0}")]
    ModelService(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ModelService(_) => StatusCode::BAD_GATEWAY,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let error_type = match self {
            ApiError::BadRequest(_) => "bad_request",
            ApiError::ModelService(_) => "model_service_error",
            ApiError::Internal(_) => "internal_error",
        };

        tracing::error!(
            error_type = error_type,
            status = status.as_u16(),
            message = %self,
            "API error"
        );

        HttpResponse::build(status).json(ErrorResponse {
            error: error_type.to_string(),
            message: self.to_string(),
            request_id: Uuid::new_v4().to_string(),
        })
    }
}

// ============================================================================
// From conversions for service errors
// ============================================================================

impl From<ConversationError> for ApiError {
    fn from(err: ConversationError) -> Self {
        match err {
            ConversationError::Completion(e) => e.into(),
        }
    }
}

impl From<DiagramError> for ApiError {
    fn from(err: DiagramError) -> Self {
        match err {
            DiagramError::Completion(e) => e.into(),
        }
    }
}

impl From<OptimizationError> for ApiError {
    fn from(err: OptimizationError) -> Self {
        match err {
            OptimizationError::Completion(e) => e.into(),
            OptimizationError::Diagram(e) => e.into(),
        }
    }
}

impl From<LlmError> for ApiError {
    fn from(err: LlmError) -> Self {
        // Every model-call failure is an upstream problem from the caller's
        // point of view.
        ApiError::ModelService(err.to_string())
    }
}
