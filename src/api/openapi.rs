//! OpenAPI specification endpoints

use actix_web::{HttpResponse, Responder, get};
use utoipa::OpenApi;

use crate::api::error::ApiError;

/// OpenAPI document for the service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "BPMN Copilot API",
        description = "Conversational BPMN diagram generation and modification"
    ),
    paths(
        crate::api::conversation::converse,
        crate::api::diagram::generate_diagram,
        crate::api::optimize::optimize_process,
        crate::api::health::liveness,
        crate::api::health::readiness,
    ),
    components(schemas(
        crate::api::conversation::ConversationRequest,
        crate::api::conversation::ConversationResponse,
        crate::api::diagram::GenerateDiagramRequest,
        crate::api::diagram::GenerateDiagramResponse,
        crate::api::optimize::OptimizeRequest,
        crate::api::optimize::OptimizeResponse,
        crate::model::ConversationAction,
        crate::model::Outcome,
    )),
    tags(
        (name = "conversation", description = "Conversational diagram interaction"),
        (name = "diagrams", description = "Diagram generation"),
        (name = "optimization", description = "Process improvement proposals"),
        (name = "health", description = "Service health probes")
    )
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
#[get("/openapi.json")]
pub async fn openapi_json() -> impl Responder {
    HttpResponse::Ok().json(ApiDoc::openapi())
}

/// Serve OpenAPI YAML specification
#[get("/openapi.yaml")]
pub async fn openapi_yaml() -> Result<HttpResponse, ApiError> {
    let yaml = ApiDoc::openapi()
        .to_yaml()
        .map_err(|e| ApiError::Internal(format!("Failed to render OpenAPI YAML: {}", e)))?;

    Ok(HttpResponse::Ok().content_type("text/yaml").body(yaml))
}

/// Configure OpenAPI routes
pub fn configure(cfg: &mut actix_web::web::ServiceConfig) {
    cfg.service(openapi_json).service(openapi_yaml);
}
