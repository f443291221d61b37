//! REST API endpoint for process optimization

use std::collections::HashMap;

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::{OptimizationResult, Outcome};
use crate::service::OptimizationService;

/// Request body for process optimization
#[derive(Debug, Deserialize, ToSchema)]
pub struct OptimizeRequest {
    /// BPMN 2.0 XML of the current process
    pub diagram_data: String,
    /// Conversation memory carried by the caller
    #[serde(default)]
    pub memory: String,
}

/// Response body for process optimization
#[derive(Debug, Serialize, ToSchema)]
pub struct OptimizeResponse {
    /// BPMN 2.0 XML of the improved process, or the original when degraded
    pub diagram_data: String,
    /// Summary of the proposed changes, or the failure explanation when degraded
    pub answer: String,
    /// Node id to description mapping for the improved diagram
    pub detail_descriptions: HashMap<String, String>,
    /// Improvement title to detailed description
    pub optimization_detail: HashMap<String, String>,
    /// Updated conversation memory for the caller to carry forward
    pub memory: String,
    /// Whether the model output was usable or a fallback was returned
    pub status: Outcome,
}

impl From<OptimizationResult> for OptimizeResponse {
    fn from(result: OptimizationResult) -> Self {
        Self {
            diagram_data: result.diagram_data,
            answer: result.answer,
            detail_descriptions: result.detail_descriptions,
            optimization_detail: result.optimization_detail,
            memory: result.memory,
            status: result.outcome,
        }
    }
}

/// Analyze a BPMN diagram and propose an improved process
#[utoipa::path(
    post,
    path = "/v1/optimize",
    request_body = OptimizeRequest,
    responses(
        (status = 200, description = "Optimization completed (possibly degraded, see status)", body = OptimizeResponse),
        (status = 400, description = "Invalid request"),
        (status = 502, description = "Model service unavailable")
    ),
    tag = "optimization"
)]
#[post("/v1/optimize")]
pub async fn optimize_process(
    service: web::Data<OptimizationService>,
    body: web::Json<OptimizeRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.diagram_data.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "diagram_data must not be empty".to_string(),
        ));
    }

    let result = service.optimize(&body.diagram_data, &body.memory).await?;

    Ok(HttpResponse::Ok().json(OptimizeResponse::from(result)))
}

/// Configure optimization routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(optimize_process);
}
