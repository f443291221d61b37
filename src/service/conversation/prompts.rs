//! Prompts for the conversation agent

use crate::model::ConversationAction;

/// Prompt for the intent classification sub-call. The model answers with a
/// bare intent string, not JSON.
pub fn build_intent_prompt(user_prompt: &str) -> String {
    format!(
        "Classify the user's intent as either 'answer_question' or 'modify_diagram'.\n\
         User prompt: {user_prompt}\n\
         If the user wants to change, add, remove, or update the diagram/process, classify as 'modify_diagram'.\n\
         If the user is asking about the process or diagram, classify as 'answer_question'.\n\
         Respond with only the intent string."
    )
}

/// Prompt for a single conversation turn once the intent is known.
///
/// Both intents request the same JSON object shape so one schema covers the
/// reply; the instructions differ in what the model is asked to do with the
/// diagram.
pub fn build_turn_prompt(
    action: ConversationAction,
    user_prompt: &str,
    diagram_data: &str,
    memory: &str,
) -> String {
    let task = match action {
        ConversationAction::AnswerQuestion => {
            "Answer the user's question about the process. Return the diagram unchanged in \
             'diagram_data' and put your answer in 'answer'."
        }
        ConversationAction::ModifyDiagram => {
            "Modify the BPMN diagram as requested. Put the complete modified BPMN 2.0 XML in \
             'diagram_data', describe each node in 'detail_descriptions', and summarize the \
             changes naturally in 'answer'."
        }
    };

    format!(
        r#"You are an expert on BPMN business processes.

Here is the current BPMN XML diagram:
{diagram_data}

Conversation memory: {memory}

User request: "{user_prompt}"

{task}

Return ONLY the following JSON object. Do not include any explanation or text outside the JSON.
{{
    "action": "{action}",
    "diagram_data": "<bpmn:definitions>...</bpmn:definitions>",
    "detail_descriptions": {{
        "StartEvent_1": "Process starts",
        "Task_1": "Description of the first task",
        "EndEvent_1": "Process ends"
    }},
    "answer": "Your answer or a description of the changes",
    "memory": "Updated conversational memory string"
}}

Ensure the JSON is perfectly valid and any BPMN XML follows BPMN 2.0 standards."#,
        action = action.as_str(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_prompt_embeds_user_prompt() {
        let prompt = build_intent_prompt("add a review step");
        assert!(prompt.contains("add a review step"));
        assert!(prompt.contains("modify_diagram"));
    }

    #[test]
    fn test_turn_prompt_carries_context_and_action() {
        let prompt = build_turn_prompt(
            ConversationAction::ModifyDiagram,
            "add a review step",
            "<x/>",
            "earlier: order flow",
        );
        assert!(prompt.contains("<x/>"));
        assert!(prompt.contains("earlier: order flow"));
        assert!(prompt.contains("\"action\": \"modify_diagram\""));
    }
}
