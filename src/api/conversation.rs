//! REST API endpoint for conversational diagram interaction

use std::collections::HashMap;

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::{ConversationAction, ConversationResult, Outcome};
use crate::service::ConversationService;

/// Request body for a conversation turn
#[derive(Debug, Deserialize, ToSchema)]
pub struct ConversationRequest {
    /// User's question or modification request
    pub prompt: String,
    /// Current BPMN XML diagram data
    pub diagram_data: String,
    /// Current conversational memory string
    #[serde(default)]
    pub memory: String,
}

/// Response body for a conversation turn
///
/// Always schema-complete; `status` distinguishes real model output from a
/// fallback, and a degraded turn explains itself in `answer`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ConversationResponse {
    /// Action taken: answer_question or modify_diagram
    pub action: ConversationAction,
    /// BPMN XML data (modified, or the original when unchanged)
    pub diagram_data: String,
    /// Node id to description mapping
    pub detail_descriptions: HashMap<String, String>,
    /// Answer to the user's question or a summary of the changes
    pub answer: String,
    /// Updated memory string
    pub memory: String,
    /// Whether the model output was usable or a fallback was returned
    pub status: Outcome,
}

impl From<ConversationResult> for ConversationResponse {
    fn from(result: ConversationResult) -> Self {
        Self {
            action: result.action,
            diagram_data: result.diagram_data,
            detail_descriptions: result.detail_descriptions,
            answer: result.answer,
            memory: result.memory,
            status: result.outcome,
        }
    }
}

/// Run one conversation turn over an existing diagram
#[utoipa::path(
    post,
    path = "/v1/conversation",
    request_body = ConversationRequest,
    responses(
        (status = 200, description = "Conversation turn completed (possibly degraded, see status)", body = ConversationResponse),
        (status = 502, description = "Model service unavailable")
    ),
    tag = "conversation"
)]
#[post("/v1/conversation")]
pub async fn converse(
    service: web::Data<ConversationService>,
    body: web::Json<ConversationRequest>,
) -> Result<HttpResponse, ApiError> {
    let result = service
        .converse(&body.prompt, &body.diagram_data, &body.memory)
        .await?;

    Ok(HttpResponse::Ok().json(ConversationResponse::from(result)))
}

/// Configure conversation routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(converse);
}
