use serde::{Deserialize, Serialize};
use std::fmt;

/// Primitive kind of the value a path terminates at.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValueType {
    String,
    Integer,
    Float,
    Boolean,
    Date,
    DateTime,
    Geometry,
}

impl ValueType {
    /// Parses a target type name, ignoring case.
    pub fn from_name(name: &str) -> Option<ValueType> {
        let ty = match name.trim().to_ascii_lowercase().as_str() {
            "string" | "text" => ValueType::String,
            "integer" | "int" => ValueType::Integer,
            "float" | "double" | "decimal" => ValueType::Float,
            "boolean" | "bool" => ValueType::Boolean,
            "date" => ValueType::Date,
            "datetime" | "timestamp" => ValueType::DateTime,
            "geometry" => ValueType::Geometry,
            _ => return None,
        };

        Some(ty)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "STRING",
            ValueType::Integer => "INTEGER",
            ValueType::Float => "FLOAT",
            ValueType::Boolean => "BOOLEAN",
            ValueType::Date => "DATE",
            ValueType::DateTime => "DATETIME",
            ValueType::Geometry => "GEOMETRY",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
