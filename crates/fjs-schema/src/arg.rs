//! # Dynamic Arguments
//!
//! Several keywords accept more than one argument shape: `items` takes a
//! schema or a list of schemas, `additionalProperties` a boolean or a
//! schema, `dependencies` a name list or a schema. [`SchemaArg`] is the
//! closed set of shapes a caller can pass; setters match on it and reject
//! anything else with `InvalidArgument` naming what they received.
//!
//! The helpers at the bottom validate plain JSON values for the scalar
//! keywords (`minLength` must be an integer, `minimum` a number, …).

use serde_json::Value;

use fjs_core::{Result, SchemaError};

use crate::node::SchemaNode;
use crate::snapshot::Snapshot;

/// An argument that may be a schema node, a list of schema nodes, or plain
/// JSON.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaArg {
    Schema(SchemaNode),
    Schemas(Vec<SchemaNode>),
    Json(Value),
}

impl SchemaArg {
    /// What the argument is, for error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Schema(_) => "schema",
            Self::Schemas(_) => "list of schemas",
            Self::Json(value) => json_kind(value),
        }
    }

    /// The single schema node, or `InvalidArgument` for `keyword`.
    pub(crate) fn into_schema(self, keyword: &str) -> Result<Snapshot> {
        match self {
            Self::Schema(node) => Ok(node.into_snapshot()),
            other => Err(SchemaError::invalid_argument(
                keyword,
                format!("must be a schema rather than a {}", other.kind()),
            )),
        }
    }

    /// A non-empty list of schema nodes, or `InvalidArgument` for `keyword`.
    pub(crate) fn into_schema_list(self, keyword: &str) -> Result<Vec<Snapshot>> {
        match self {
            Self::Schemas(nodes) if !nodes.is_empty() => {
                Ok(nodes.into_iter().map(SchemaNode::into_snapshot).collect())
            }
            Self::Schemas(_) => Err(SchemaError::invalid_argument(
                keyword,
                "must be a non-empty list of schemas rather than an empty list",
            )),
            other => Err(SchemaError::invalid_argument(
                keyword,
                format!("must be a non-empty list of schemas rather than a {}", other.kind()),
            )),
        }
    }

    /// A boolean or a schema, serialized for embedding under `keyword`.
    pub(crate) fn into_bool_or_schema(self, keyword: &str) -> Result<Value> {
        match self {
            Self::Json(Value::Bool(b)) => Ok(Value::Bool(b)),
            Self::Schema(node) => Ok(node.embedded_value()),
            other => Err(SchemaError::invalid_argument(
                keyword,
                format!("must be a boolean or a schema rather than a {}", other.kind()),
            )),
        }
    }
}

pub(crate) fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

impl From<bool> for SchemaArg {
    fn from(b: bool) -> Self {
        Self::Json(Value::Bool(b))
    }
}

impl From<Value> for SchemaArg {
    fn from(value: Value) -> Self {
        Self::Json(value)
    }
}

impl<T: Into<SchemaNode>> From<Vec<T>> for SchemaArg {
    fn from(nodes: Vec<T>) -> Self {
        Self::Schemas(nodes.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<SchemaNode>, const N: usize> From<[T; N]> for SchemaArg {
    fn from(nodes: [T; N]) -> Self {
        Self::Schemas(nodes.into_iter().map(Into::into).collect())
    }
}

// ─── Scalar checks ──────────────────────────────────────────────────

fn whole_number(value: &Value) -> Option<Value> {
    let n = match value {
        Value::Number(n) => n,
        _ => return None,
    };
    if n.is_i64() || n.is_u64() {
        return Some(value.clone());
    }
    let f = n.as_f64()?;
    if f.fract() == 0.0 && f.is_finite() && f.abs() < i64::MAX as f64 {
        Some(Value::from(f as i64))
    } else {
        None
    }
}

/// Accept an integer count (`minLength`, `maxItems`, …).
///
/// Whole floats such as `3.0` are normalized to integers.
pub(crate) fn require_integer(keyword: &str, value: Value) -> Result<Value> {
    whole_number(&value).ok_or_else(|| {
        SchemaError::invalid_argument(
            keyword,
            format!("must be an Integer rather than a {}", json_kind(&value)),
        )
    })
}

/// Accept a numeric bound; on integer-only nodes the bound must be whole.
pub(crate) fn require_number(keyword: &str, value: Value, integer_only: bool) -> Result<Value> {
    if !value.is_number() {
        return Err(SchemaError::invalid_argument(
            keyword,
            format!("must be a Number rather than a {}", json_kind(&value)),
        ));
    }
    if integer_only {
        return whole_number(&value).ok_or_else(|| {
            SchemaError::invalid_argument(keyword, "must be an Integer")
        });
    }
    Ok(value)
}

/// Accept a JSON array (`enum`, `examples`).
pub(crate) fn require_array(keyword: &str, value: Value) -> Result<Value> {
    if value.is_array() {
        Ok(value)
    } else {
        Err(SchemaError::invalid_argument(
            keyword,
            format!("must be an array rather than a {}", json_kind(&value)),
        ))
    }
}
