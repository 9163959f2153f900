//! Array builder and the array keyword family.
//!
//! Embedded schemas (`items`, `additionalItems`, `contains`) are rendered at
//! call time, without `$schema`. Later changes to the argument builder do
//! not reach the array.

use std::sync::Arc;

use serde_json::Value;

use fjs_core::{BuilderOptions, Keyword, Result, SchemaError, SchemaType};

use crate::arg::{require_integer, SchemaArg};
use crate::base::sealed::Sealed;
use crate::base::Schema;
use crate::node::SchemaNode;
use crate::snapshot::Snapshot;

/// Keywords of the array family.
pub trait ArrayKeywords: Schema {
    /// A single schema constrains every element; a list validates the
    /// array as a tuple.
    fn items(&self, items: impl Into<SchemaArg>) -> Result<Self> {
        let items = items.into();
        self.set_flat_with(Keyword::Items, move |_| match items {
            SchemaArg::Schema(node) => Ok(node.embedded_value()),
            SchemaArg::Schemas(nodes) if !nodes.is_empty() => Ok(Value::Array(
                nodes.iter().map(SchemaNode::embedded_value).collect(),
            )),
            SchemaArg::Schemas(_) => Err(SchemaError::invalid_argument(
                Keyword::Items.as_str(),
                "must be a schema or a non-empty list of schemas rather than an empty list",
            )),
            other => Err(SchemaError::invalid_argument(
                Keyword::Items.as_str(),
                format!(
                    "must be a schema or a list of schemas rather than a {}",
                    other.kind()
                ),
            )),
        })
    }

    fn additional_items(&self, items: impl Into<SchemaArg>) -> Result<Self> {
        let items = items.into();
        self.set_flat_with(Keyword::AdditionalItems, move |_| {
            items.into_bool_or_schema(Keyword::AdditionalItems.as_str())
        })
    }

    fn contains(&self, schema: impl Into<SchemaArg>) -> Result<Self> {
        let schema = schema.into();
        self.set_flat_with(Keyword::Contains, move |_| {
            let node = schema.into_schema(Keyword::Contains.as_str())?;
            Ok(crate::serialize::embedded(&node))
        })
    }

    fn unique_items(&self, unique: bool) -> Result<Self> {
        self.set_flat(Keyword::UniqueItems, Value::Bool(unique))
    }

    fn min_items(&self, count: impl Into<Value>) -> Result<Self> {
        let count = count.into();
        self.set_flat_with(Keyword::MinItems, move |_| {
            require_integer(Keyword::MinItems.as_str(), count)
        })
    }

    fn max_items(&self, count: impl Into<Value>) -> Result<Self> {
        let count = count.into();
        self.set_flat_with(Keyword::MaxItems, move |_| {
            require_integer(Keyword::MaxItems.as_str(), count)
        })
    }
}

schema_builder! {
    /// An `array` node.
    ArraySchema => Array
}


impl ArraySchema {
    pub(crate) fn new(options: Arc<BuilderOptions>) -> Self {
        Self::from_snapshot(Snapshot::of_type(SchemaType::Array, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::*;
    use crate::{array, number, object, string};
    use fjs_core::TypeFamily;
    use serde_json::json;

    #[test]
    fn test_tuple_items() {
        let schema = array()
            .items(vec![SchemaNode::from(string()), SchemaNode::from(number())])
            .unwrap();
        assert_eq!(
            schema.value_of(),
            json!({"type": "array", "items": [{"type": "string"}, {"type": "number"}]})
        );
    }

    #[test]
    fn test_single_items_schema() {
        let schema = array()
            .items(string().max_length(3).unwrap())
            .unwrap()
            .min_items(1)
            .unwrap()
            .max_items(4)
            .unwrap()
            .unique_items(true)
            .unwrap();
        assert_eq!(
            schema.value_of(),
            json!({
                "type": "array",
                "items": {"type": "string", "maxLength": 3},
                "minItems": 1,
                "maxItems": 4,
                "uniqueItems": true
            })
        );
    }

    #[test]
    fn test_empty_tuple_is_rejected() {
        let err = array().items(Vec::<SchemaNode>::new()).unwrap_err();
        assert_eq!(err.keyword(), Some("items"));
        assert!(err.to_string().contains("empty list"));
    }

    #[test]
    fn test_items_rejects_plain_json() {
        let err = array().items(json!({"type": "string"})).unwrap_err();
        assert_eq!(err.keyword(), Some("items"));
        assert!(err.to_string().contains("rather than a object"));
    }

    #[test]
    fn test_additional_items_and_contains() {
        let schema = array()
            .additional_items(false)
            .unwrap()
            .contains(number().minimum(5).unwrap())
            .unwrap();
        let doc = schema.value_of();
        assert_eq!(doc["additionalItems"], json!(false));
        assert_eq!(doc["contains"], json!({"type": "number", "minimum": 5}));

        assert!(array().additional_items(json!("no")).is_err());
        assert!(array().contains(true).is_err());
    }

    #[test]
    fn test_embedded_schema_drops_schema_uri() {
        let inner = crate::FluentSchema::new(BuilderOptions::draft07()).string();
        let doc = array().items(inner).unwrap().value_of();
        assert_eq!(doc["items"], json!({"type": "string"}));
    }

    #[test]
    fn test_array_keyword_on_object_is_type_mismatch() {
        let err = object().min_items(1).unwrap_err();
        assert_eq!(
            err,
            SchemaError::TypeMismatch {
                keyword: "minItems".to_string(),
                actual: "object".to_string(),
                family: TypeFamily::Array,
            }
        );
    }

    #[test]
    fn test_array_property() {
        let schema = object()
            .prop("tags")
            .as_array()
            .unwrap()
            .items(string())
            .unwrap();
        assert_eq!(
            schema.value_of()["properties"]["tags"],
            json!({"type": "array", "items": {"type": "string"}})
        );
    }
}
