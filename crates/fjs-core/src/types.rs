//! # JSON Schema Types
//!
//! The seven primitive draft-07 types and the `TypeSet` a node declares:
//! either a single type or an ordered union (the "mixed" form, serialized
//! as a JSON array).

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::str::FromStr;

use crate::error::SchemaError;

/// A draft-07 primitive type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    String,
    Number,
    Integer,
    Boolean,
    Object,
    Array,
    Null,
}

impl SchemaType {
    /// All primitive types in canonical order.
    pub fn all() -> &'static [SchemaType] {
        &[
            Self::String,
            Self::Number,
            Self::Integer,
            Self::Boolean,
            Self::Object,
            Self::Array,
            Self::Null,
        ]
    }

    /// The keyword value for this type.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Integer => "integer",
            Self::Boolean => "boolean",
            Self::Object => "object",
            Self::Array => "array",
            Self::Null => "null",
        }
    }

    /// Comma-separated list of valid type names, used in error messages.
    pub fn valid_names() -> String {
        Self::all()
            .iter()
            .map(|t| t.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for SchemaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaType {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "string" => Ok(Self::String),
            "number" => Ok(Self::Number),
            "integer" => Ok(Self::Integer),
            "boolean" => Ok(Self::Boolean),
            "object" => Ok(Self::Object),
            "array" => Ok(Self::Array),
            "null" => Ok(Self::Null),
            other => Err(SchemaError::invalid_argument(
                "type",
                format!(
                    "unknown type {other:?}; valid types are: {}",
                    SchemaType::valid_names()
                ),
            )),
        }
    }
}

/// The `type` a node declares.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeSet {
    /// `"type": "<name>"`.
    Single(SchemaType),
    /// `"type": ["<name>", ...]`, order preserved.
    Union(Vec<SchemaType>),
}

impl TypeSet {
    /// Parse an ordered union from type names.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidArgument` if the list is empty, names a
    /// type twice or any name is not a draft-07 type.
    pub fn union<I, S>(names: I) -> Result<Self, SchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut types = Vec::new();
        for name in names {
            let name = name.as_ref();
            let ty = name.parse::<SchemaType>().map_err(|_| {
                SchemaError::invalid_argument(
                    "types",
                    format!(
                        "{name:?} is not a type; valid types are: {}",
                        SchemaType::valid_names()
                    ),
                )
            })?;
            if types.contains(&ty) {
                return Err(SchemaError::invalid_argument(
                    "types",
                    format!("{name:?} is listed more than once"),
                ));
            }
            types.push(ty);
        }
        if types.is_empty() {
            return Err(SchemaError::invalid_argument(
                "types",
                format!(
                    "must be a non-empty list of types; valid types are: {}",
                    SchemaType::valid_names()
                ),
            ));
        }
        Ok(Self::Union(types))
    }

    /// Whether `ty` is one of the declared types.
    pub fn contains(&self, ty: SchemaType) -> bool {
        match self {
            Self::Single(t) => *t == ty,
            Self::Union(ts) => ts.contains(&ty),
        }
    }

    /// The declared types as a slice.
    pub fn types(&self) -> &[SchemaType] {
        match self {
            Self::Single(t) => std::slice::from_ref(t),
            Self::Union(ts) => ts,
        }
    }

    /// Integer-only nodes require whole-number bounds.
    pub fn is_integer_only(&self) -> bool {
        self.contains(SchemaType::Integer) && !self.contains(SchemaType::Number)
    }

    /// Read a `type` keyword value back from a document.
    ///
    /// Returns `None` for anything that is not a known type name or a list
    /// of known type names.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => s.parse().ok().map(Self::Single),
            Value::Array(items) => {
                let names: Option<Vec<&str>> = items.iter().map(Value::as_str).collect();
                Self::union(names?).ok()
            }
            _ => None,
        }
    }

    /// The `type` keyword value.
    pub fn to_value(&self) -> Value {
        match self {
            Self::Single(t) => Value::String(t.as_str().to_string()),
            Self::Union(ts) => Value::Array(
                ts.iter()
                    .map(|t| Value::String(t.as_str().to_string()))
                    .collect(),
            ),
        }
    }
}

impl From<SchemaType> for TypeSet {
    fn from(ty: SchemaType) -> Self {
        Self::Single(ty)
    }
}

impl std::fmt::Display for TypeSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Single(t) => f.write_str(t.as_str()),
            Self::Union(ts) => {
                let names: Vec<&str> = ts.iter().map(|t| t.as_str()).collect();
                write!(f, "[{}]", names.join(", "))
            }
        }
    }
}
