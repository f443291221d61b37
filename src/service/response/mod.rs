//! LLM response resolution protocol
//!
//! Every agent call funnels its raw model output through the same pipeline:
//! extract an embedded JSON object, validate it against the agent's schema,
//! and on any content failure fall back to a schema-complete degraded result.
//! Callers therefore always receive a structurally valid value; only the
//! transport to the model itself can fail a request.

use serde_json::{Map, Value};

use crate::model::Outcome;

pub mod extract;
pub mod fallback;
pub mod schema;

pub use extract::ResponseExtractor;
pub use fallback::build_fallback;
pub use schema::{FieldKind, FieldSpec, ValidatedFields, ValidationFailure, validate};

/// Terminal result of resolving one raw model reply.
#[derive(Debug)]
pub struct Resolution {
    pub fields: ValidatedFields,
    pub outcome: Outcome,
}

/// Run extract → validate → fallback over one raw model reply.
///
/// Content failures (no parseable JSON, schema violations) are logged and
/// absorbed into a degraded result built from `overrides`; there is no retry
/// against the model.
pub fn resolve(
    extractor: &ResponseExtractor,
    raw: &str,
    schema: &[FieldSpec],
    overrides: &Map<String, Value>,
    explanatory_field: &str,
) -> Resolution {
    let extracted = match extractor.extract(raw) {
        Some(object) => object,
        None => {
            tracing::warn!(
                raw_length = raw.len(),
                "No parseable JSON object in model output, returning fallback"
            );
            return degraded(
                schema,
                overrides,
                explanatory_field,
                "The model reply contained no parseable JSON object.",
            );
        }
    };

    match validate(extracted, schema) {
        Ok(fields) => Resolution {
            fields,
            outcome: Outcome::Succeeded,
        },
        Err(failure) => {
            tracing::warn!(
                errors = failure.errors.len(),
                detail = %failure.describe(),
                "Model output failed schema validation, returning fallback"
            );
            let description = failure.describe();
            degraded(schema, overrides, explanatory_field, &description)
        }
    }
}

fn degraded(
    schema: &[FieldSpec],
    overrides: &Map<String, Value>,
    explanatory_field: &str,
    description: &str,
) -> Resolution {
    Resolution {
        fields: build_fallback(schema, overrides, explanatory_field, description),
        outcome: Outcome::Degraded,
    }
}
