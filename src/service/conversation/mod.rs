//! Conversation agent
//!
//! Handles one conversational turn over an existing BPMN diagram: a short
//! classification sub-call decides whether the user wants an answer or a
//! diagram modification, the matching prompt runs against the model, and the
//! raw reply goes through the response resolution pipeline. The caller
//! always receives a schema-complete [`ConversationResult`]; only transport
//! failures become errors.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::model::{ConversationAction, ConversationResult};
use crate::service::llm::{GenerationParams, TextCompletion};
use crate::service::response::{self, FieldKind, FieldSpec, ResponseExtractor};

pub mod converters;
pub mod error;
pub mod prompts;

pub use error::ConversationError;

use converters::to_conversation_result;
use prompts::{build_intent_prompt, build_turn_prompt};

/// Response schema for a conversation turn.
const CONVERSATION_SCHEMA: &[FieldSpec] = &[
    FieldSpec::required(
        "action",
        FieldKind::OneOf(&["answer_question", "modify_diagram"]),
    ),
    FieldSpec::required("diagram_data", FieldKind::Text),
    FieldSpec::required("detail_descriptions", FieldKind::TextMap),
    FieldSpec::required("answer", FieldKind::Text),
    FieldSpec::required("memory", FieldKind::Text),
];

/// Explanatory field of a degraded conversation result.
const EXPLANATORY_FIELD: &str = "answer";

/// Intent classification: deterministic, a handful of tokens.
const INTENT_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.0,
    max_output_tokens: 16,
};

/// Question answering over an unchanged diagram.
const ANSWER_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.2,
    max_output_tokens: 1024,
};

/// Diagram modification: the reply carries full BPMN XML.
const MODIFY_PARAMS: GenerationParams = GenerationParams {
    temperature: 0.3,
    max_output_tokens: 4096,
};

/// Service for conversational question answering and diagram modification
pub struct ConversationService {
    llm: Arc<dyn TextCompletion>,
    extractor: ResponseExtractor,
}

impl ConversationService {
    /// Creates a new conversation service around an injected completer.
    pub fn new(llm: Arc<dyn TextCompletion>) -> Self {
        Self {
            llm,
            extractor: ResponseExtractor::new(),
        }
    }

    /// Run one conversation turn.
    pub async fn converse(
        &self,
        user_prompt: &str,
        diagram_data: &str,
        memory: &str,
    ) -> Result<ConversationResult, ConversationError> {
        let start_time = std::time::Instant::now();

        let action = self.classify_intent(user_prompt).await;
        tracing::debug!(action = action.as_str(), "Classified conversation intent");

        let prompt = build_turn_prompt(action, user_prompt, diagram_data, memory);
        let params = match action {
            ConversationAction::AnswerQuestion => ANSWER_PARAMS,
            ConversationAction::ModifyDiagram => MODIFY_PARAMS,
        };

        let raw = self.llm.complete(&prompt, params).await?;

        let resolution = response::resolve(
            &self.extractor,
            &raw,
            CONVERSATION_SCHEMA,
            &turn_overrides(action, diagram_data, memory),
            EXPLANATORY_FIELD,
        );

        let result = to_conversation_result(resolution, action);

        tracing::info!(
            action = result.action.as_str(),
            outcome = ?result.outcome,
            elapsed_ms = start_time.elapsed().as_millis(),
            "Conversation turn completed"
        );

        Ok(result)
    }

    /// Classification sub-call. The reply is a bare label; an unrecognized
    /// one defaults to answering, matching the substring rule the prompt
    /// implies. Classification failure is not fatal either: the turn
    /// proceeds as a question, only the main turn call can fail the request.
    async fn classify_intent(&self, user_prompt: &str) -> ConversationAction {
        let reply = match self
            .llm
            .complete(&build_intent_prompt(user_prompt), INTENT_PARAMS)
            .await
        {
            Ok(reply) => reply,
            Err(e) => {
                tracing::warn!(error = %e, "Intent classification failed, defaulting to answering");
                return ConversationAction::AnswerQuestion;
            }
        };

        if reply.trim().to_lowercase().contains("modify") {
            ConversationAction::ModifyDiagram
        } else {
            ConversationAction::AnswerQuestion
        }
    }
}

/// Caller originals used when the turn degrades: the diagram and memory pass
/// through unchanged and the action reflects the classified intent.
fn turn_overrides(
    action: ConversationAction,
    diagram_data: &str,
    memory: &str,
) -> Map<String, Value> {
    let mut overrides = Map::new();
    overrides.insert(
        "action".to_string(),
        Value::String(action.as_str().to_string()),
    );
    overrides.insert(
        "diagram_data".to_string(),
        Value::String(diagram_data.to_string()),
    );
    overrides.insert("memory".to_string(), Value::String(memory.to_string()));
    overrides
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Outcome;
    use crate::service::llm::LlmError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Completer that plays back canned replies in order.
    struct ScriptedCompleter {
        replies: Mutex<VecDeque<Result<String, LlmError>>>,
    }

    impl ScriptedCompleter {
        fn new(replies: Vec<Result<String, LlmError>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
            })
        }
    }

    #[async_trait]
    impl TextCompletion for ScriptedCompleter {
        async fn complete(
            &self,
            _prompt: &str,
            _params: GenerationParams,
        ) -> Result<String, LlmError> {
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(LlmError::EmptyReply))
        }
    }

    #[tokio::test]
    async fn test_modify_turn_succeeds_with_model_fields() {
        let llm = ScriptedCompleter::new(vec![
            Ok("modify_diagram".to_string()),
            Ok(r#"```json
{"action": "modify_diagram", "diagram_data": "<new/>", "detail_descriptions": {"Task_1": "review"}, "answer": "Added a review task.", "memory": "added review"}
```"#
                .to_string()),
        ]);

        let service = ConversationService::new(llm);
        let result = service
            .converse("add a review step", "<old/>", "")
            .await
            .unwrap();

        assert_eq!(result.action, ConversationAction::ModifyDiagram);
        assert_eq!(result.outcome, Outcome::Succeeded);
        assert_eq!(result.diagram_data, "<new/>");
        assert_eq!(result.detail_descriptions["Task_1"], "review");
        assert_eq!(result.answer, "Added a review task.");
        assert_eq!(result.memory, "added review");
    }

    #[tokio::test]
    async fn test_refusal_degrades_keeping_original_diagram() {
        let llm = ScriptedCompleter::new(vec![
            Ok("answer_question".to_string()),
            Ok("I cannot help with that.".to_string()),
        ]);

        let service = ConversationService::new(llm);
        let result = service
            .converse("what does Task_1 do?", "<original/>", "prior notes")
            .await
            .unwrap();

        assert_eq!(result.outcome, Outcome::Degraded);
        assert_eq!(result.action, ConversationAction::AnswerQuestion);
        assert_eq!(result.diagram_data, "<original/>");
        assert_eq!(result.memory, "prior notes");
        assert!(result.answer.contains("no parseable JSON"));
    }

    #[tokio::test]
    async fn test_invalid_fields_degrade_naming_errors() {
        // detail_descriptions as a list instead of a map
        let llm = ScriptedCompleter::new(vec![
            Ok("answer_question".to_string()),
            Ok(r#"{"action": "answer_question", "diagram_data": "<x/>", "detail_descriptions": ["a"], "answer": "hi", "memory": ""}"#.to_string()),
        ]);

        let service = ConversationService::new(llm);
        let result = service.converse("question", "<orig/>", "m").await.unwrap();

        assert_eq!(result.outcome, Outcome::Degraded);
        assert_eq!(result.diagram_data, "<orig/>");
        assert!(result.answer.contains("'detail_descriptions'"));
    }

    #[tokio::test]
    async fn test_unrecognized_intent_defaults_to_answering() {
        let llm = ScriptedCompleter::new(vec![
            Ok("no idea".to_string()),
            Ok(r#"{"action": "answer_question", "diagram_data": "<x/>", "detail_descriptions": {}, "answer": "hi", "memory": ""}"#.to_string()),
        ]);

        let service = ConversationService::new(llm);
        let result = service.converse("hello", "<x/>", "").await.unwrap();
        assert_eq!(result.action, ConversationAction::AnswerQuestion);
    }

    #[tokio::test]
    async fn test_classification_failure_defaults_to_answering() {
        let llm = ScriptedCompleter::new(vec![
            Err(LlmError::Api {
                status: 429,
                message: "quota exceeded".to_string(),
            }),
            Ok(r#"{"action": "answer_question", "diagram_data": "<x/>", "detail_descriptions": {}, "answer": "hi", "memory": ""}"#.to_string()),
        ]);

        let service = ConversationService::new(llm);
        let result = service.converse("hello", "<x/>", "").await.unwrap();
        assert_eq!(result.action, ConversationAction::AnswerQuestion);
        assert_eq!(result.outcome, Outcome::Succeeded);
        assert_eq!(result.answer, "hi");
    }

    #[tokio::test]
    async fn test_turn_transport_failure_propagates() {
        let llm = ScriptedCompleter::new(vec![
            Ok("answer_question".to_string()),
            Err(LlmError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            }),
        ]);

        let service = ConversationService::new(llm);
        let err = service.converse("hello", "<x/>", "").await.unwrap_err();
        assert!(matches!(err, ConversationError::Completion(_)));
    }
}
