//! Schema validation for extracted model output
//!
//! The extractor hands back an untyped JSON map; this is the boundary where
//! that map either becomes a fully typed [`ValidatedFields`] or is rejected
//! with field-level errors. Untyped data never flows past this module.

use std::collections::HashMap;
use std::fmt;

use serde_json::{Map, Value};

/// Semantic type expected for a response field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// A string value.
    Text,
    /// A list of strings. A bare scalar is an error, never auto-wrapped.
    TextList,
    /// A string-to-string mapping.
    TextMap,
    /// An integer. In practice only used for optional fields.
    Integer,
    /// A string restricted to a fixed set of literals.
    OneOf(&'static [&'static str]),
}

impl FieldKind {
    /// Default value used for optional fields absent from the output and for
    /// fallback construction.
    pub fn default_value(&self) -> Value {
        match self {
            FieldKind::Text => Value::String(String::new()),
            FieldKind::TextList => Value::Array(Vec::new()),
            FieldKind::TextMap => Value::Object(Map::new()),
            FieldKind::Integer => Value::Null,
            FieldKind::OneOf(choices) => {
                Value::String(choices.first().copied().unwrap_or_default().to_string())
            }
        }
    }

    /// Whether `value` conforms to this kind.
    pub fn accepts(&self, value: &Value) -> bool {
        match self {
            FieldKind::Text => value.is_string(),
            FieldKind::TextList => match value {
                Value::Array(items) => items.iter().all(Value::is_string),
                _ => false,
            },
            FieldKind::TextMap => match value {
                Value::Object(entries) => entries.values().all(Value::is_string),
                _ => false,
            },
            FieldKind::Integer => value.as_i64().is_some(),
            FieldKind::OneOf(choices) => match value.as_str() {
                Some(s) => choices.contains(&s),
                None => false,
            },
        }
    }

    fn describe(&self) -> &'static str {
        match self {
            FieldKind::Text => "string",
            FieldKind::TextList => "list of strings",
            FieldKind::TextMap => "mapping of string to string",
            FieldKind::Integer => "integer",
            FieldKind::OneOf(_) => "one of a fixed set of strings",
        }
    }
}

/// Declaration of a single response field.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
        }
    }
}

/// A single field-level validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    Missing { field: &'static str },
    WrongKind { field: &'static str, expected: FieldKind },
}

impl FieldError {
    pub fn field(&self) -> &'static str {
        match self {
            FieldError::Missing { field } | FieldError::WrongKind { field, .. } => field,
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldError::Missing { field } => write!(f, "required field '{}' is missing", field),
            FieldError::WrongKind { field, expected } => {
                write!(f, "field '{}' is not a {}", field, expected.describe())
            }
        }
    }
}

/// Validation outcome when any required field is missing or mistyped.
///
/// Carries the partially extracted data for diagnostics; it is logged, never
/// returned to callers.
#[derive(Debug)]
pub struct ValidationFailure {
    pub errors: Vec<FieldError>,
    pub partial: Map<String, Value>,
}

impl ValidationFailure {
    /// Human-readable summary naming each failed field, suitable for the
    /// explanatory field of a degraded result.
    pub fn describe(&self) -> String {
        let problems: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        format!("model output failed validation: {}", problems.join("; "))
    }
}

/// A schema-complete set of response fields.
///
/// Invariant: every required field of the schema it was validated (or built
/// as a fallback) against is present and conforms to its declared kind, and
/// every optional field is present with at least its default. Never
/// partially typed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedFields(Map<String, Value>);

impl ValidatedFields {
    pub(crate) fn from_map(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }

    pub fn text_list(&self, name: &str) -> Vec<String> {
        match self.0.get(name) {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect(),
            _ => Vec::new(),
        }
    }

    pub fn text_map(&self, name: &str) -> HashMap<String, String> {
        match self.0.get(name) {
            Some(Value::Object(entries)) => entries
                .iter()
                .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                .collect(),
            _ => HashMap::new(),
        }
    }

    pub fn integer(&self, name: &str) -> Option<i64> {
        self.0.get(name).and_then(Value::as_i64)
    }
}

/// Map an extracted object onto `schema`.
///
/// Missing or mistyped required fields accumulate into a
/// [`ValidationFailure`]; a success is always schema-complete, with optional
/// fields defaulted. Mistyped optional fields are replaced by their default
/// rather than failing the whole result.
pub fn validate(
    extracted: Map<String, Value>,
    schema: &[FieldSpec],
) -> Result<ValidatedFields, ValidationFailure> {
    let mut errors = Vec::new();
    let mut fields = Map::new();

    for spec in schema {
        match extracted.get(spec.name) {
            Some(value) if spec.kind.accepts(value) => {
                fields.insert(spec.name.to_string(), value.clone());
            }
            Some(_) if spec.required => errors.push(FieldError::WrongKind {
                field: spec.name,
                expected: spec.kind,
            }),
            None if spec.required => errors.push(FieldError::Missing { field: spec.name }),
            _ => {
                fields.insert(spec.name.to_string(), spec.kind.default_value());
            }
        }
    }

    if errors.is_empty() {
        Ok(ValidatedFields::from_map(fields))
    } else {
        Err(ValidationFailure {
            errors,
            partial: extracted,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const SCHEMA: &[FieldSpec] = &[
        FieldSpec::required("name", FieldKind::Text),
        FieldSpec::required("steps", FieldKind::TextList),
        FieldSpec::required("labels", FieldKind::TextMap),
        FieldSpec::required("mode", FieldKind::OneOf(&["fast", "thorough"])),
        FieldSpec::optional("note", FieldKind::Text),
        FieldSpec::optional("count", FieldKind::Integer),
    ];

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test input must be an object"),
        }
    }

    #[test]
    fn test_complete_object_validates() {
        let fields = validate(
            object(json!({
                "name": "order intake",
                "steps": ["receive", "check"],
                "labels": {"Task_1": "receive"},
                "mode": "fast",
                "note": "ok",
                "count": 2
            })),
            SCHEMA,
        )
        .unwrap();

        assert_eq!(fields.text("name"), Some("order intake"));
        assert_eq!(fields.text_list("steps"), vec!["receive", "check"]);
        assert_eq!(fields.text_map("labels")["Task_1"], "receive");
        assert_eq!(fields.text("mode"), Some("fast"));
        assert_eq!(fields.integer("count"), Some(2));
    }

    #[test]
    fn test_optional_fields_defaulted() {
        let fields = validate(
            object(json!({
                "name": "x",
                "steps": [],
                "labels": {},
                "mode": "thorough"
            })),
            SCHEMA,
        )
        .unwrap();

        assert_eq!(fields.text("note"), Some(""));
        assert_eq!(fields.integer("count"), None);
    }

    #[test]
    fn test_missing_required_fields_named_exactly() {
        let failure = validate(object(json!({"name": "x", "mode": "fast"})), SCHEMA).unwrap_err();

        let missing: Vec<&str> = failure.errors.iter().map(|e| e.field()).collect();
        assert_eq!(missing, vec!["steps", "labels"]);
        assert!(failure
            .errors
            .iter()
            .all(|e| matches!(e, FieldError::Missing { .. })));
    }

    #[test]
    fn test_scalar_for_required_list_is_an_error() {
        // A comma-joined string is not a list; it must be rejected, not
        // auto-wrapped.
        let failure = validate(
            object(json!({
                "name": "x",
                "steps": "receive, check",
                "labels": {},
                "mode": "fast"
            })),
            SCHEMA,
        )
        .unwrap_err();

        assert_eq!(
            failure.errors,
            vec![FieldError::WrongKind {
                field: "steps",
                expected: FieldKind::TextList
            }]
        );
    }

    #[test]
    fn test_list_with_non_string_items_is_an_error() {
        let failure = validate(
            object(json!({
                "name": "x",
                "steps": ["receive", 2],
                "labels": {},
                "mode": "fast"
            })),
            SCHEMA,
        )
        .unwrap_err();
        assert_eq!(failure.errors[0].field(), "steps");
    }

    #[test]
    fn test_map_with_non_string_value_is_an_error() {
        let failure = validate(
            object(json!({
                "name": "x",
                "steps": [],
                "labels": {"Task_1": 7},
                "mode": "fast"
            })),
            SCHEMA,
        )
        .unwrap_err();
        assert_eq!(failure.errors[0].field(), "labels");
    }

    #[test]
    fn test_one_of_rejects_unknown_literal() {
        let failure = validate(
            object(json!({
                "name": "x",
                "steps": [],
                "labels": {},
                "mode": "leisurely"
            })),
            SCHEMA,
        )
        .unwrap_err();
        assert_eq!(failure.errors[0].field(), "mode");
    }

    #[test]
    fn test_mistyped_optional_field_falls_back_to_default() {
        let fields = validate(
            object(json!({
                "name": "x",
                "steps": [],
                "labels": {},
                "mode": "fast",
                "count": "three"
            })),
            SCHEMA,
        )
        .unwrap();
        assert_eq!(fields.integer("count"), None);
    }

    #[test]
    fn test_failure_keeps_partial_data_for_diagnostics() {
        let failure = validate(object(json!({"name": "x"})), SCHEMA).unwrap_err();
        assert_eq!(failure.partial["name"], "x");
        assert!(failure.describe().contains("'steps'"));
        assert!(failure.describe().contains("'labels'"));
        assert!(failure.describe().contains("'mode'"));
    }
}
