//! REST API endpoint for BPMN diagram generation

use std::collections::HashMap;

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::api::error::ApiError;
use crate::model::{DiagramResult, Outcome};
use crate::service::DiagramGenerationService;
use crate::service::diagram::DiagramSpec;

/// Request body for diagram generation
#[derive(Debug, Deserialize, ToSchema)]
pub struct GenerateDiagramRequest {
    /// Name of the process
    pub process_name: String,
    /// Sequential process steps
    pub process_steps: Vec<String>,
    /// Additional description of the process
    #[serde(default)]
    pub process_description: String,
    /// Context from uploaded files
    #[serde(default)]
    pub file_context: String,
}

/// Response body for diagram generation
#[derive(Debug, Serialize, ToSchema)]
pub struct GenerateDiagramResponse {
    /// BPMN 2.0 XML payload
    pub diagram_data: String,
    pub diagram_name: String,
    /// Description of the diagram, or the failure explanation when degraded
    pub diagram_description: String,
    /// Node id to description mapping
    pub detail_descriptions: HashMap<String, String>,
    /// Whether the model output was usable or a fallback was returned
    pub status: Outcome,
}

impl From<DiagramResult> for GenerateDiagramResponse {
    fn from(result: DiagramResult) -> Self {
        Self {
            diagram_data: result.diagram_data,
            diagram_name: result.diagram_name,
            diagram_description: result.diagram_description,
            detail_descriptions: result.detail_descriptions,
            status: result.outcome,
        }
    }
}

/// Generate a BPMN diagram from a process description
#[utoipa::path(
    post,
    path = "/v1/diagrams",
    request_body = GenerateDiagramRequest,
    responses(
        (status = 200, description = "Diagram generated (possibly degraded, see status)", body = GenerateDiagramResponse),
        (status = 400, description = "Invalid request"),
        (status = 502, description = "Model service unavailable")
    ),
    tag = "diagrams"
)]
#[post("/v1/diagrams")]
pub async fn generate_diagram(
    service: web::Data<DiagramGenerationService>,
    body: web::Json<GenerateDiagramRequest>,
) -> Result<HttpResponse, ApiError> {
    if body.process_name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "process_name must not be empty".to_string(),
        ));
    }

    let spec = DiagramSpec {
        process_name: body.process_name.clone(),
        process_steps: body.process_steps.clone(),
        process_description: body.process_description.clone(),
        file_context: body.file_context.clone(),
    };

    let result = service.generate(&spec).await?;

    Ok(HttpResponse::Ok().json(GenerateDiagramResponse::from(result)))
}

/// Configure diagram routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_diagram);
}
