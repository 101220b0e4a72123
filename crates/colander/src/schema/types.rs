//! Core type definitions for schema representation.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Inferred type tag for a field path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Explicit JSON null.
    Null,
    /// Ordered list of values.
    Array,
    /// Nested mapping.
    Object,
    /// Text value.
    String,
    /// Integer or float.
    Number,
    /// true/false.
    Boolean,
}

impl FieldKind {
    /// Tag a value. Null is checked first, then arrays, then objects,
    /// then the primitive type.
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => FieldKind::Null,
            Value::Array(_) => FieldKind::Array,
            Value::Object(_) => FieldKind::Object,
            Value::String(_) => FieldKind::String,
            Value::Number(_) => FieldKind::Number,
            Value::Bool(_) => FieldKind::Boolean,
        }
    }

    /// Lowercase tag name as used in serialized schemas.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::Null => "null",
            FieldKind::Array => "array",
            FieldKind::Object => "object",
            FieldKind::String => "string",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
