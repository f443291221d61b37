//! Conversion from validated response fields to the domain result

use crate::model::{ConversationAction, ConversationResult, Outcome};
use crate::service::response::Resolution;

/// Map a resolved conversation reply onto [`ConversationResult`].
///
/// The fields are schema-complete by the resolution invariant; `fallback`
/// values only paper over the impossible case of an accessor miss so no
/// panic can reach a request handler.
pub fn to_conversation_result(
    resolution: Resolution,
    classified: ConversationAction,
) -> ConversationResult {
    let fields = &resolution.fields;

    let action = fields
        .text("action")
        .and_then(ConversationAction::parse)
        .unwrap_or(classified);

    ConversationResult {
        action,
        diagram_data: fields.text("diagram_data").unwrap_or_default().to_string(),
        detail_descriptions: fields.text_map("detail_descriptions"),
        answer: fields.text("answer").unwrap_or_default().to_string(),
        memory: fields.text("memory").unwrap_or_default().to_string(),
        outcome: resolution.outcome,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::response::{FieldKind, FieldSpec, build_fallback};
    use serde_json::{Map, json};

    const SCHEMA: &[FieldSpec] = &[
        FieldSpec::required(
            "action",
            FieldKind::OneOf(&["answer_question", "modify_diagram"]),
        ),
        FieldSpec::required("diagram_data", FieldKind::Text),
        FieldSpec::required("detail_descriptions", FieldKind::TextMap),
        FieldSpec::required("answer", FieldKind::Text),
        FieldSpec::required("memory", FieldKind::Text),
    ];

    #[test]
    fn test_degraded_fields_convert_with_classified_action() {
        let mut overrides = Map::new();
        overrides.insert("action".to_string(), json!("modify_diagram"));
        overrides.insert("diagram_data".to_string(), json!("<original/>"));
        overrides.insert("memory".to_string(), json!("m"));

        let resolution = Resolution {
            fields: build_fallback(SCHEMA, &overrides, "answer", "model refused"),
            outcome: Outcome::Degraded,
        };

        let result = to_conversation_result(resolution, ConversationAction::ModifyDiagram);
        assert_eq!(result.action, ConversationAction::ModifyDiagram);
        assert_eq!(result.diagram_data, "<original/>");
        assert_eq!(result.answer, "model refused");
        assert_eq!(result.memory, "m");
        assert_eq!(result.outcome, Outcome::Degraded);
    }
}
