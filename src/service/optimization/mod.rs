//! Process optimization agent
//!
//! Proposes improvements to an existing BPMN process in three stages: a
//! plain-prose summary of the current diagram, an improvement call that
//! identifies bottlenecks and the improved step sequence, and a diagram
//! generation pass that visualizes the new process. Session-free; the
//! updated memory string is returned to the caller, never stored.
//!
//! When the improvement reply cannot be trusted the original diagram is
//! returned unchanged with the failure explained in `answer`; when only the
//! visualization degrades, the caller still gets the improvement summary
//! plus a skeleton diagram of the improved steps.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};

use crate::model::{OptimizationResult, Outcome};
use crate::service::diagram::{DiagramGenerationService, DiagramSpec};
use crate::service::llm::{GenerationParams, TextCompletion};
use crate::service::response::{self, FieldKind, FieldSpec, ResponseExtractor};

pub mod converters;
pub mod error;
pub mod prompts;

pub use error::OptimizationError;

use converters::to_improvement_plan;
use prompts::{build_improvement_prompt, build_summary_prompt};

/// Response schema for the improvement call.
const IMPROVEMENT_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("process_name", FieldKind::Text),
    FieldSpec::required("improved_steps", FieldKind::TextList),
    FieldSpec::required("summary_of_changes", FieldKind::Text),
    FieldSpec::required("optimization_detail", FieldKind::TextMap),
];

/// Explanatory field of a degraded improvement reply.
const EXPLANATORY_FIELD: &str = "summary_of_changes";

/// Process summary: short prose reply.
const SUMMARY_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.3,
    max_output_tokens: 512,
};

/// Improvement generation: runs hotter, solutions benefit from variety.
const IMPROVEMENT_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.7,
    max_output_tokens: 2048,
};

/// Service for proposing process improvements over an existing diagram
pub struct OptimizationService {
    llm: Arc<dyn TextCompletion>,
    extractor: ResponseExtractor,
    diagrams: DiagramGenerationService,
}

impl OptimizationService {
    /// Creates a new optimization service around an injected completer. The
    /// internal diagram generation stage shares the same completer.
    pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
        Self {
            extractor: ResponseExtractor::new(),
            diagrams: DiagramGenerationService::new(Arc::clone(&llm)),
            llm,
        }
    }

    /// Analyze the diagram, propose improvements and visualize the improved
    /// process.
    pub async fn optimize(
        &self,
        diagram_data: &str,
        memory: &str,
    ) -> Result<OptimizationResult, OptimizationError> {
        let start_time = std::time::Instant::now();

        let summary = self
            .llm
            .complete(&build_summary_prompt(diagram_data, memory), SUMMARY_PARAMS)
            .await?;
        tracing::debug!(summary_length = summary.len(), "Summarized current process");

        let raw = self
            .llm
            .complete(
                &build_improvement_prompt(&summary, diagram_data),
                IMPROVEMENT_PARAMS,
            )
            .await?;

        let resolution = response::resolve(
            &self.extractor,
            &raw,
            IMPROVEMENT_SCHEMA,
            &improvement_overrides(),
            EXPLANATORY_FIELD,
        );
        let plan = to_improvement_plan(resolution);

        if plan.outcome == Outcome::Degraded {
            // No trustworthy improvement plan: hand the original diagram back
            // unchanged with the explanation, matching the conversation
            // fallback semantics.
            tracing::info!(
                elapsed_ms = start_time.elapsed().as_millis(),
                "Optimization degraded at the improvement stage"
            );
            return Ok(OptimizationResult {
                diagram_data: diagram_data.to_string(),
                answer: plan.summary_of_changes,
                detail_descriptions: HashMap::new(),
                optimization_detail: plan.optimization_detail,
                memory: memory.to_string(),
                outcome: Outcome::Degraded,
            });
        }

        let diagram = self
            .diagrams
            .generate(&DiagramSpec {
                process_name: plan.process_name.clone(),
                process_steps: plan.improved_steps.clone(),
                process_description: plan.summary_of_changes.clone(),
                file_context: String::new(),
            })
            .await?;

        let updated_memory = format!(
            "{}\n\n[Optimization Summary]\n{}",
            memory, plan.summary_of_changes
        );

        tracing::info!(
            improvements = plan.optimization_detail.len(),
            steps = plan.improved_steps.len(),
            outcome = ?diagram.outcome,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Optimization completed"
        );

        Ok(OptimizationResult {
            diagram_data: diagram.diagram_data,
            answer: plan.summary_of_changes,
            detail_descriptions: diagram.detail_descriptions,
            optimization_detail: plan.optimization_detail,
            memory: updated_memory,
            outcome: diagram.outcome,
        })
    }
}

/// Fallback originals for the improvement call. Nothing from the caller maps
/// onto the improvement fields directly, so only the name gets a placeholder.
fn improvement_overrides() -> Map<String, Value> {
    let mut overrides = Map::new();
    overrides.insert(
        "process_name".to_string(),
        Value::String("Process from Diagram".to_string()),
    );
    overrides
}
