//! Prompts for process optimization

/// Prompt for the process-summary sub-call. The model answers in plain
/// prose, not JSON.
pub fn build_summary_prompt(diagram_data: &str, memory: &str) -> String {
    format!(
        r#"You are an expert on BPMN business processes.

Here is a BPMN XML diagram:
{diagram_data}

Conversation memory: {memory}

Summarize the business process this diagram describes: its purpose, its
sequential steps in order, its inputs and outputs, and any pain points or
inefficiencies visible in the flow. Answer in plain prose, no JSON."#
    )
}

/// Prompt for the improvement call: identify bottlenecks and propose the
/// improved process in one JSON reply.
pub fn build_improvement_prompt(process_summary: &str, diagram_data: &str) -> String {
    format!(
        r#"You are an expert business process consultant.

Here is a summary of the current process:
{process_summary}

Here is the current BPMN XML diagram:
{diagram_data}

Identify bottlenecks, inefficiencies, or areas for improvement in this process,
then propose concrete, actionable solutions and describe the sequential steps
of the new, improved process.

Return ONLY the following JSON object. Do not include any explanation or text outside the JSON.
{{
    "process_name": "Name of the improved process",
    "improved_steps": ["Step 1 of improved process", "Step 2 of improved process"],
    "summary_of_changes": "A high-level summary of all proposed changes and their overall impact",
    "optimization_detail": {{
        "Short improvement title": "Detailed description of the change and its expected impact"
    }}
}}

Ensure the JSON is perfectly valid and 'improved_steps' is a clear, concise,
sequential list representing the new flow."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_prompt_embeds_diagram_and_memory() {
        let prompt = build_summary_prompt("<x/>", "earlier notes");
        assert!(prompt.contains("<x/>"));
        assert!(prompt.contains("earlier notes"));
    }

    #[test]
    fn test_improvement_prompt_requests_expected_fields() {
        let prompt = build_improvement_prompt("orders flow in and out", "<x/>");
        assert!(prompt.contains("orders flow in and out"));
        assert!(prompt.contains("\"improved_steps\""));
        assert!(prompt.contains("\"summary_of_changes\""));
        assert!(prompt.contains("\"optimization_detail\""));
    }
}
