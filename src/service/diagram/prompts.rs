//! Prompts for diagram generation

/// Prompt for generating a BPMN 2.0 diagram from process information.
pub fn build_generation_prompt(
    process_name: &str,
    process_steps: &[String],
    process_description: &str,
    file_context: &str,
) -> String {
    let steps_text: String = process_steps
        .iter()
        .enumerate()
        .map(|(i, step)| format!("{}. {}\n", i + 1, step))
        .collect();

    format!(
        r#"Generate a BPMN (Business Process Model and Notation) 2.0 XML diagram for the following process.

Process Name: {process_name}
Process Description: {process_description}
Process Steps:
{steps_text}
File Context: {file_context}

Create a valid BPMN 2.0 XML diagram that includes:
1. A start event
2. Tasks for each process step
3. Sequence flows between tasks
4. An end event
5. Proper BPMN XML structure with namespaces

Return the response in this exact JSON format:
{{
    "diagram_data": "<bpmn:definitions xmlns:bpmn='http://www.omg.org/spec/BPMN/20100524/MODEL'>...</bpmn:definitions>",
    "diagram_name": "{process_name} Diagram",
    "diagram_description": "BPMN diagram representing the {process_name} process",
    "detail_descriptions": {{
        "StartEvent_1": "Process starts",
        "Task_1": "First task",
        "EndEvent_1": "Process ends"
    }}
}}

Ensure the BPMN XML is valid and follows BPMN 2.0 standards. Do not add any extra text outside the JSON."#
    )
}
