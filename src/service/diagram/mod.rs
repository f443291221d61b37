//! Diagram generation agent
//!
//! Turns a process description into a BPMN 2.0 diagram via one model call.
//! When the reply cannot be trusted the fallback is not empty: a skeleton
//! diagram is synthesized from the supplied steps so the caller still gets a
//! renderable result, with the failure explained in the description field.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::model::DiagramResult;
use crate::service::llm::{GenerationParams, TextCompletion};
use crate::service::response::{self, FieldKind, FieldSpec, ResponseExtractor};

pub mod converters;
pub mod error;
pub mod prompts;

pub use error::DiagramError;

use converters::to_diagram_result;
use prompts::build_generation_prompt;

/// Response schema for diagram generation.
const DIAGRAM_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required("diagram_data", FieldKind::Text),
    FieldSpec::required("diagram_name", FieldKind::Text),
    FieldSpec::required("diagram_description", FieldKind::Text),
    FieldSpec::required("detail_descriptions", FieldKind::TextMap),
];

/// Explanatory field of a degraded diagram result.
const EXPLANATORY_FIELD: &str = "diagram_description";

/// Diagram generation: full BPMN XML in the reply.
const GENERATION_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.2,
    max_output_tokens: 4096,
};

/// Inputs for one diagram generation.
#[derive(Debug, Clone)]
pub struct DiagramSpec {
    pub process_name: String,
    pub process_steps: Vec<String>,
    pub process_description: String,
    pub file_context: String,
}

/// Service for generating BPMN diagrams from process descriptions
pub struct DiagramGenerationService {
    llm: Arc<dyn TextCompletion>,
    extractor: ResponseExtractor,
}

impl DiagramGenerationService {
    /// Creates a new diagram generation service around an injected completer.
    pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
        Self {
            llm,
            extractor: ResponseExtractor::new(),
        }
    }

    /// Generate a BPMN diagram for the described process.
    pub async fn generate(&self, spec: &DiagramSpec) -> Result<DiagramResult, DiagramError> {
        let start_time = std::time::Instant::now();

        let prompt = build_generation_prompt(
            &spec.process_name,
            &spec.process_steps,
            &spec.process_description,
            &spec.file_context,
        );

        let raw = self.llm.complete(&prompt, GENERATION_PARAMS).await?;

        let resolution = response::resolve(
            &self.extractor,
            &raw,
            DIAGRAM_SCHEMA,
            &skeleton_overrides(&spec.process_name, &spec.process_steps),
            EXPLANATORY_FIELD,
        );

        let result = to_diagram_result(resolution);

        tracing::info!(
            process = %spec.process_name,
            steps = spec.process_steps.len(),
            outcome = ?result.outcome,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Diagram generation completed"
        );

        Ok(result)
    }
}

/// Fallback originals: a minimal BPMN skeleton built from the steps, so a
/// degraded result still renders.
fn skeleton_overrides(process_name: &str, process_steps: &[String]) -> Map<String, Value> {
    let tasks: String = process_steps
        .iter()
        .enumerate()
        .map(|(i, step)| {
            format!(
                "    <bpmn:task id=\"Task_{}\" name=\"{}\" />\n",
                i + 1,
                escape_xml_attr(step)
            )
        })
        .collect();

    let mut skeleton = String::new();
    skeleton
        .push_str("<bpmn:definitions xmlns:bpmn=\"http://www.omg.org/spec/BPMN/20100524/MODEL\">\n");
    skeleton.push_str(&format!(
        "  <bpmn:process id=\"Process_{}\" name=\"{}\">\n",
        escape_xml_attr(&process_name.replace(' ', "_")),
        escape_xml_attr(process_name)
    ));
    skeleton.push_str("    <bpmn:startEvent id=\"StartEvent_1\" name=\"Start\" />\n");
    skeleton.push_str(&tasks);
    skeleton.push_str("    <bpmn:endEvent id=\"EndEvent_1\" name=\"End\" />\n");
    skeleton.push_str("  </bpmn:process>\n</bpmn:definitions>");

    let mut descriptions = Map::new();
    descriptions.insert(
        "StartEvent_1".to_string(),
        Value::String("Process starts".to_string()),
    );
    for (i, step) in process_steps.iter().enumerate() {
        descriptions.insert(format!("Task_{}", i + 1), Value::String(step.clone()));
    }
    descriptions.insert(
        "EndEvent_1".to_string(),
        Value::String("Process ends".to_string()),
    );

    let mut overrides = Map::new();
    overrides.insert("diagram_data".to_string(), Value::String(skeleton));
    overrides.insert(
        "diagram_name".to_string(),
        Value::String(format!("{} Diagram", process_name)),
    );
    overrides.insert(
        "detail_descriptions".to_string(),
        Value::Object(descriptions),
    );
    overrides
}

/// Escape the XML-significant characters for use in an attribute value.
fn escape_xml_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;
    use crate::service::llm::LlmError;
    use async_trait::async_trait;

    struct FixedCompleter {
        reply: String,
    }

    #[async_trait]
    impl TextCompletion for FixedCompleter {
        async fn complete(
            &self,
            _prompt: &str,
            _params: GenerationParams,
        ) -> Result<String, LlmError> {
            Ok(self.reply.clone())
        }
    }

    fn spec() -> DiagramSpec {
        DiagramSpec {
            process_name: "Order Intake".to_string(),
            process_steps: vec!["Receive order".to_string(), "Check stock".to_string()],
            process_description: String::new(),
            file_context: String::new(),
        }
    }

    #[tokio::test]
    async fn test_well_formed_reply_succeeds() {
        let reply = r#"```json
{"diagram_data": "<bpmn:definitions/>", "diagram_name": "Order Intake Diagram", "diagram_description": "Intake flow", "detail_descriptions": {"Task_1": "Receive order"}}
```"#;
        let service = DiagramGenerationService::new(Arc::new(FixedCompleter {
            reply: reply.to_string(),
        }));

        let result = service.generate(&spec()).await.unwrap();
        assert_eq!(result.outcome, Outcome::Succeeded);
        assert_eq!(result.diagram_data, "<bpmn:definitions/>");
        assert_eq!(result.diagram_name, "Order Intake Diagram");
        assert_eq!(result.detail_descriptions["Task_1"], "Receive order");
    }

    #[tokio::test]
    async fn test_unparseable_reply_degrades_to_skeleton() {
        let service = DiagramGenerationService::new(Arc::new(FixedCompleter {
            reply: "Sorry, I can only describe processes in prose.".to_string(),
        }));

        let result = service.generate(&spec()).await.unwrap();
        assert_eq!(result.outcome, Outcome::Degraded);
        assert!(result.diagram_data.contains("Process_Order_Intake"));
        assert!(result.diagram_data.contains("name=\"Receive order\""));
        assert!(result.diagram_data.contains("name=\"Check stock\""));
        assert_eq!(result.diagram_name, "Order Intake Diagram");
        assert_eq!(result.detail_descriptions["Task_2"], "Check stock");
        assert!(result.diagram_description.contains("no parseable JSON"));
    }

    #[tokio::test]
    async fn test_skeleton_escapes_xml_attribute_characters() {
        let service = DiagramGenerationService::new(Arc::new(FixedCompleter {
            reply: "no json here".to_string(),
        }));

        let spec = DiagramSpec {
            process_name: "Q&A \"Fast\" Track".to_string(),
            process_steps: vec!["Check <stock> & reserve".to_string()],
            process_description: String::new(),
            file_context: String::new(),
        };

        let result = service.generate(&spec).await.unwrap();
        assert!(result.diagram_data.contains("name=\"Q&amp;A &quot;Fast&quot; Track\""));
        assert!(result
            .diagram_data
            .contains("name=\"Check &lt;stock&gt; &amp; reserve\""));
        assert!(!result.diagram_data.contains("name=\"Check <stock>"));
        // Descriptions are JSON values, not XML; they stay verbatim.
        assert_eq!(result.detail_descriptions["Task_1"], "Check <stock> & reserve");
    }

    #[tokio::test]
    async fn test_incomplete_reply_degrades_naming_missing_fields() {
        let service = DiagramGenerationService::new(Arc::new(FixedCompleter {
            reply: "{'diagram_data': '<x/>', 'detail_descriptions': {},}".to_string(),
        }));

        let result = service.generate(&spec()).await.unwrap();
        assert_eq!(result.outcome, Outcome::Degraded);
        assert!(result.diagram_description.contains("'diagram_name'"));
        assert!(result.diagram_description.contains("'diagram_description'"));
    }
}
