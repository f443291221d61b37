//! Conversion from validated response fields to the domain result

use crate::model::DiagramResult;
use crate::service::response::Resolution;

/// Map a resolved diagram-generation reply onto [`DiagramResult`].
pub fn to_diagram_result(resolution: Resolution) -> DiagramResult {
    let fields = &resolution.fields;

    DiagramResult {
        diagram_data: fields.text("diagram_data").unwrap_or_default().to_string(),
        diagram_name: fields.text("diagram_name").unwrap_or_default().to_string(),
        diagram_description: fields
            .text("diagram_description")
            .unwrap_or_default()
            .to_string(),
        detail_descriptions: fields.text_map("detail_descriptions"),
        outcome: resolution.outcome,
    }
}
