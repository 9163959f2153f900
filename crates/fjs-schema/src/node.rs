//! # Schema Nodes
//!
//! [`SchemaNode`] is the closed sum of every builder kind. Anything that
//! accepts "a schema" (`prop_schema`, `items`, `all_of`, …) takes
//! `impl Into<SchemaNode>` or a [`SchemaArg`], so the question "is this a
//! schema?" is answered by the type system rather than at run time.
//!
//! Converting a snapshot back into a node dispatches on its declared type:
//! one type picks the matching builder, a list picks [`MixedSchema`], and
//! no type picks [`BaseSchema`].

use serde_json::Value;

use fjs_core::{SchemaType, TypeSet};

use crate::arg::SchemaArg;
use crate::array::{ArrayKeywords, ArraySchema};
use crate::base::sealed::Sealed;
use crate::base::{BaseKeywords, BaseSchema, Schema};
use crate::boolean::BooleanSchema;
use crate::mixed::MixedSchema;
use crate::null::NullSchema;
use crate::number::{IntegerSchema, NumberKeywords, NumberSchema};
use crate::object::{ObjectKeywords, ObjectSchema};
use crate::serialize;
use crate::snapshot::Snapshot;
use crate::string::{StringKeywords, StringSchema};

/// Any builder.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaNode {
    String(StringSchema),
    Number(NumberSchema),
    Integer(IntegerSchema),
    Boolean(BooleanSchema),
    Null(NullSchema),
    Array(ArraySchema),
    Object(ObjectSchema),
    Mixed(MixedSchema),
    Base(BaseSchema),
}

impl SchemaNode {
    /// Consume the node, keeping only its state.
    pub fn into_snapshot(self) -> Snapshot {
        match self {
            Self::String(b) => b.into_snapshot(),
            Self::Number(b) => b.into_snapshot(),
            Self::Integer(b) => b.into_snapshot(),
            Self::Boolean(b) => b.into_snapshot(),
            Self::Null(b) => b.into_snapshot(),
            Self::Array(b) => b.into_snapshot(),
            Self::Object(b) => b.into_snapshot(),
            Self::Mixed(b) => b.into_snapshot(),
            Self::Base(b) => b.into_snapshot(),
        }
    }

    /// Rendering for use as a keyword value: no `$schema`.
    pub fn embedded_value(&self) -> Value {
        serialize::embedded(self.as_snapshot())
    }

    /// The declared type as a label, `"none"` for untyped nodes.
    pub fn type_label(&self) -> String {
        self.as_snapshot().type_label()
    }

    pub fn as_object(&self) -> Option<&ObjectSchema> {
        match self {
            Self::Object(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArraySchema> {
        match self {
            Self::Array(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_mixed(&self) -> Option<&MixedSchema> {
        match self {
            Self::Mixed(b) => Some(b),
            _ => None,
        }
    }
}

impl Sealed for SchemaNode {
    fn from_snapshot(snapshot: Snapshot) -> Self {
        let single = match snapshot.types() {
            Some(TypeSet::Single(ty)) => Some(*ty),
            Some(TypeSet::Union(_)) => None,
            None => return Self::Base(BaseSchema::from_snapshot(snapshot)),
        };
        match single {
            Some(SchemaType::String) => Self::String(StringSchema::from_snapshot(snapshot)),
            Some(SchemaType::Number) => Self::Number(NumberSchema::from_snapshot(snapshot)),
            Some(SchemaType::Integer) => Self::Integer(IntegerSchema::from_snapshot(snapshot)),
            Some(SchemaType::Boolean) => Self::Boolean(BooleanSchema::from_snapshot(snapshot)),
            Some(SchemaType::Null) => Self::Null(NullSchema::from_snapshot(snapshot)),
            Some(SchemaType::Array) => Self::Array(ArraySchema::from_snapshot(snapshot)),
            Some(SchemaType::Object) => Self::Object(ObjectSchema::from_snapshot(snapshot)),
            None => Self::Mixed(MixedSchema::from_snapshot(snapshot)),
        }
    }

    fn as_snapshot(&self) -> &Snapshot {
        match self {
            Self::String(b) => b.snapshot(),
            Self::Number(b) => b.snapshot(),
            Self::Integer(b) => b.snapshot(),
            Self::Boolean(b) => b.snapshot(),
            Self::Null(b) => b.snapshot(),
            Self::Array(b) => b.snapshot(),
            Self::Object(b) => b.snapshot(),
            Self::Mixed(b) => b.snapshot(),
            Self::Base(b) => b.snapshot(),
        }
    }
}

impl Schema for SchemaNode {}

// The variant follows the root's type, which no keyword setter changes.
impl BaseKeywords for SchemaNode {}
impl StringKeywords for SchemaNode {}
impl NumberKeywords for SchemaNode {}
impl ArrayKeywords for SchemaNode {}
impl ObjectKeywords for SchemaNode {}

impl From<SchemaNode> for SchemaArg {
    fn from(node: SchemaNode) -> Self {
        SchemaArg::Schema(node)
    }
}

impl serde::Serialize for SchemaNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serde::Serialize::serialize(&self.value_of(), serializer)
    }
}
