//! # Object Builder
//!
//! Accumulates properties and definitions as ordered sequences of named
//! child snapshots. Folding them into maps, and assigning generated ids,
//! happens only in `value_of`.
//!
//! ```
//! use fjs_schema::prelude::*;
//! use fjs_schema::object;
//!
//! let user = object()
//!     .prop("email").format("email")?.required()?
//!     .prop("age").as_integer()?.minimum(0)?;
//! let doc = user.value_of();
//! assert_eq!(doc["required"], serde_json::json!(["email"]));
//! assert_eq!(doc["properties"]["age"]["type"], "integer");
//! # Ok::<(), fjs_schema::SchemaError>(())
//! ```

use std::sync::Arc;

use serde_json::{Map, Value};

use fjs_core::{BuilderOptions, Keyword, Result, SchemaError, SchemaType, TypeSet};

use crate::arg::{require_integer, SchemaArg};
use crate::base::sealed::Sealed;
use crate::base::Schema;
use crate::node::SchemaNode;
use crate::serialize;
use crate::snapshot::Snapshot;
use crate::string::StringSchema;

fn retype<S: Sealed>(builder: &S, operation: &str, ty: SchemaType) -> Result<S> {
    builder
        .as_snapshot()
        .update_last_property(operation, |prop| {
            Ok(prop.with_types(Some(TypeSet::Single(ty))))
        })
        .map(S::from_snapshot)
}

/// Keywords of the object family, plus retyping of the property under
/// construction.
pub trait ObjectKeywords: Schema {
    fn additional_properties(&self, schema: impl Into<SchemaArg>) -> Result<Self> {
        let schema = schema.into();
        self.set_flat_with(Keyword::AdditionalProperties, move |_| {
            schema.into_bool_or_schema(Keyword::AdditionalProperties.as_str())
        })
    }

    fn max_properties(&self, count: impl Into<Value>) -> Result<Self> {
        let count = count.into();
        self.set_flat_with(Keyword::MaxProperties, move |_| {
            require_integer(Keyword::MaxProperties.as_str(), count)
        })
    }

    fn min_properties(&self, count: impl Into<Value>) -> Result<Self> {
        let count = count.into();
        self.set_flat_with(Keyword::MinProperties, move |_| {
            require_integer(Keyword::MinProperties.as_str(), count)
        })
    }

    /// Map regex sources to schemas. Keys are not compiled.
    fn pattern_properties<I, K, V>(&self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SchemaArg>,
    {
        let keyword = Keyword::PatternProperties.as_str();
        let mut map = Map::new();
        for (pattern, schema) in entries {
            let node = schema.into().into_schema(keyword)?;
            map.insert(pattern.into(), serialize::embedded(&node));
        }
        self.set_flat(Keyword::PatternProperties, Value::Object(map))
    }

    /// Each dependency is either a list of property names or a schema.
    fn dependencies<I, K, V>(&self, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<SchemaArg>,
    {
        let keyword = Keyword::Dependencies.as_str();
        let mut map = Map::new();
        for (name, dependency) in entries {
            let value = match dependency.into() {
                SchemaArg::Schema(node) => node.embedded_value(),
                SchemaArg::Json(Value::Array(names)) if names.iter().all(Value::is_string) => {
                    Value::Array(names)
                }
                other => {
                    let received = match &other {
                        SchemaArg::Json(Value::Array(_)) => "list with non-string entries",
                        _ => other.kind(),
                    };
                    return Err(SchemaError::invalid_argument(
                        keyword,
                        format!(
                            "must map to a list of property names or a schema rather than a {received}"
                        ),
                    ));
                }
            };
            map.insert(name.into(), value);
        }
        self.set_flat(Keyword::Dependencies, Value::Object(map))
    }

    fn property_names(&self, schema: impl Into<SchemaArg>) -> Result<Self> {
        let schema = schema.into();
        self.set_flat_with(Keyword::PropertyNames, move |_| {
            let node = schema.into_schema(Keyword::PropertyNames.as_str())?;
            Ok(serialize::embedded(&node))
        })
    }

    fn as_string(&self) -> Result<Self> {
        retype(self, "asString", SchemaType::String)
    }

    fn as_number(&self) -> Result<Self> {
        retype(self, "asNumber", SchemaType::Number)
    }

    fn as_integer(&self) -> Result<Self> {
        retype(self, "asInteger", SchemaType::Integer)
    }

    fn as_boolean(&self) -> Result<Self> {
        retype(self, "asBoolean", SchemaType::Boolean)
    }

    fn as_object(&self) -> Result<Self> {
        retype(self, "asObject", SchemaType::Object)
    }

    fn as_array(&self) -> Result<Self> {
        retype(self, "asArray", SchemaType::Array)
    }

    fn as_null(&self) -> Result<Self> {
        retype(self, "asNull", SchemaType::Null)
    }
}

schema_builder! {
    /// An `object` node.
    ObjectSchema => Object
}

impl ObjectSchema {
    pub(crate) fn new(options: Arc<BuilderOptions>) -> Self {
        Self::from_snapshot(Snapshot::of_type(SchemaType::Object, options))
    }

    /// Add a string property named `name`. It becomes the focus for the
    /// following keyword calls.
    pub fn prop(&self, name: impl Into<String>) -> Self {
        let child = StringSchema::new(Arc::clone(&self.snapshot.options));
        self.prop_schema(name, child)
    }

    /// Add `child` as the property `name`.
    pub fn prop_schema(&self, name: impl Into<String>, child: impl Into<SchemaNode>) -> Self {
        let child = child.into().into_snapshot();
        self.map_snapshot(|node| node.push_property(name, child))
    }

    /// Add `child` under `definitions`.
    pub fn definition(&self, name: impl Into<String>, child: impl Into<SchemaNode>) -> Self {
        let child = child.into().into_snapshot();
        self.map_snapshot(|node| node.push_definition(name, child))
    }
}
