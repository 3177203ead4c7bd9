//! Structural check of the model's JSON against the fixed resume schema.
//!
//! Only the top level is checked: every required key must be present, and its
//! value must have the expected shape or be null. Nested entries are passed
//! through untouched.

use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Expected JSON shape of a top-level field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Mapping,
    Text,
    List,
    /// Free text, or a list of bullet points.
    TextOrList,
    /// Contact details the model may render as a string, number, or list.
    Scalar,
    /// Like `Scalar`, but the model may also break it into named parts.
    Detail,
}

impl FieldKind {
    fn accepts(self, value: &Value) -> bool {
        if value.is_null() {
            return true;
        }
        match self {
            FieldKind::Mapping => value.is_object(),
            FieldKind::Text => value.is_string(),
            FieldKind::List => value.is_array(),
            FieldKind::TextOrList => value.is_string() || value.is_array(),
            FieldKind::Scalar => value.is_string() || value.is_number() || value.is_array(),
            FieldKind::Detail => !value.is_boolean(),
        }
    }

    fn describe(self) -> &'static str {
        match self {
            FieldKind::Mapping => "an object",
            FieldKind::Text => "a string",
            FieldKind::List => "a list",
            FieldKind::TextOrList => "a string or list",
            FieldKind::Scalar => "a string, number, or list",
            FieldKind::Detail => "a string, number, list, or object",
        }
    }
}

/// Top-level keys of the structured record, in prompt order.
pub const REQUIRED_FIELDS: &[(&str, FieldKind)] = &[
    ("Skills", FieldKind::Mapping),
    ("Title", FieldKind::Text),
    ("Education", FieldKind::List),
    ("Work experience", FieldKind::List),
    ("Languages", FieldKind::List),
    ("Bio", FieldKind::TextOrList),
    ("Hourly rate", FieldKind::Scalar),
    ("Phone number", FieldKind::Detail),
    ("Date of birth", FieldKind::Scalar),
    ("Address", FieldKind::Detail),
    ("Country", FieldKind::Scalar),
    ("State", FieldKind::Scalar),
    ("City/Province", FieldKind::Scalar),
    ("Zip/Postal code", FieldKind::Scalar),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchemaViolation {
    pub field: String,
    pub problem: String,
}

#[derive(Debug, Error)]
pub enum SchemaValidationError {
    #[error("Structured data must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    #[error("Structured data does not match the resume schema: {}", summarize(.0))]
    Violations(Vec<SchemaViolation>),
}

fn summarize(violations: &[SchemaViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("'{}' {}", v.field, v.problem))
        .collect::<Vec<_>>()
        .join("; ")
}

/// The validated resume record. Serializes as the model's object, unchanged.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StructuredRecord(Map<String, Value>);

impl StructuredRecord {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }
}

impl TryFrom<Value> for StructuredRecord {
    type Error = SchemaValidationError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        let object = match value {
            Value::Object(map) => map,
            other => return Err(SchemaValidationError::NotAnObject(json_type_name(&other))),
        };

        let violations: Vec<SchemaViolation> = REQUIRED_FIELDS
            .iter()
            .filter_map(|&(field, kind)| match object.get(field) {
                None => Some(SchemaViolation {
                    field: field.to_string(),
                    problem: "is missing".to_string(),
                }),
                Some(v) if !kind.accepts(v) => Some(SchemaViolation {
                    field: field.to_string(),
                    problem: format!("should be {}, got {}", kind.describe(), json_type_name(v)),
                }),
                Some(_) => None,
            })
            .collect();

        if violations.is_empty() {
            Ok(StructuredRecord(object))
        } else {
            Err(SchemaValidationError::Violations(violations))
        }
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
