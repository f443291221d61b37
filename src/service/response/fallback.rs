//! Degraded-result construction
//!
//! When extraction or validation fails the caller still gets a
//! schema-complete result: originals passed through where a correspondence
//! exists (an unmodified diagram, the incoming memory string), schema
//! defaults everywhere else, and the failure explanation placed in a
//! designated field.

use serde_json::{Map, Value};

use super::schema::{FieldSpec, ValidatedFields};

/// Build a schema-complete degraded result.
///
/// `overrides` carries caller-supplied originals keyed by field name; an
/// override is only used when it conforms to the field's declared kind.
/// `explanatory_field` receives `error_description` so the caller can see
/// why the result is degraded. Deterministic: identical inputs produce
/// identical output.
pub fn build_fallback(
    schema: &[FieldSpec],
    overrides: &Map<String, Value>,
    explanatory_field: &str,
    error_description: &str,
) -> ValidatedFields {
    let mut fields = Map::new();

    for spec in schema {
        let value = if spec.name == explanatory_field {
            Value::String(error_description.to_string())
        } else {
            match overrides.get(spec.name) {
                Some(original) if spec.kind.accepts(original) => original.clone(),
                _ => spec.kind.default_value(),
            }
        };
        fields.insert(spec.name.to_string(), value);
    }

    ValidatedFields::from_map(fields)
}
