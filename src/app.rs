//! Application state and service initialization
//!
//! Centralizes service construction and dependency injection. The Gemini
//! client is built exactly once here and handed to the agent services
//! explicitly; nothing in the codebase holds an ambient client or
//! orchestrator instance.

use std::sync::Arc;

use actix_web::web;

use crate::model::Config;
use crate::service::llm::TextCompletion;
use crate::service::{
    ConversationService, DiagramGenerationService, GeminiClient, OptimizationService,
};

/// Application state containing all services and shared configuration
///
/// The services are wrapped in `web::Data` so the `HttpServer` closure can
/// clone them per worker.
pub struct AppState {
    pub config: web::Data<Config>,
    pub conversation_service: web::Data<ConversationService>,
    pub diagram_service: web::Data<DiagramGenerationService>,
    pub optimization_service: web::Data<OptimizationService>,
}

impl AppState {
    /// Build the service graph from configuration.
    pub fn new(config: Config) -> Self {
        if !config.gemini.is_configured() {
            tracing::warn!("GEMINI_API_KEY is not set; model calls will fail until configured");
        }

        let llm: Arc<dyn TextCompletion> = Arc::new(GeminiClient::new(&config.gemini));

        tracing::info!(
            model = %config.gemini.model,
            "Initialized Gemini client"
        );

        Self {
            conversation_service: web::Data::new(ConversationService::new(Arc::clone(&llm))),
            diagram_service: web::Data::new(DiagramGenerationService::new(Arc::clone(&llm))),
            optimization_service: web::Data::new(OptimizationService::new(llm)),
            config: web::Data::new(config),
        }
    }
}
