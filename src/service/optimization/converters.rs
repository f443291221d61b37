//! Conversion from validated response fields to the improvement plan

use std::collections::HashMap;

use crate::model::Outcome;
use crate::service::response::Resolution;

/// Intermediate result of the improvement call, before the improved process
/// is visualized.
#[derive(Debug, Clone, PartialEq)]
pub struct ImprovementPlan {
    pub process_name: String,
    pub improved_steps: Vec<String>,
    pub summary_of_changes: String,
    pub optimization_detail: HashMap<String, String>,
    pub outcome: Outcome,
}

/// Map a resolved improvement reply onto [`ImprovementPlan`].
pub fn to_improvement_plan(resolution: Resolution) -> ImprovementPlan {
    let fields = &resolution.fields;

    ImprovementPlan {
        process_name: fields.text("process_name").unwrap_or_default().to_string(),
        improved_steps: fields.text_list("improved_steps"),
        summary_of_changes: fields
            .text("summary_of_changes")
            .unwrap_or_default()
            .to_string(),
        optimization_detail: fields.text_map("optimization_detail"),
        outcome: resolution.outcome,
    }
}
