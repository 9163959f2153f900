//! # Base Builder and Shared Capabilities
//!
//! Every typed builder wraps one [`Snapshot`] and implements each capability
//! trait. The traits carry default methods only. Whether a keyword may be set
//! is decided against the focused node's type when the call is made, so
//! `string().minimum(1)` compiles and fails with `TypeMismatch`.
//!
//! ## Return Conventions
//!
//! - Setters that cannot fail (`title`, `description`, `const_value`, …)
//!   return `Self`.
//! - Setters that validate their argument or the node's type return
//!   `Result<Self, SchemaError>`.
//!
//! In both cases the receiver is left untouched.
//!
//! ## Sealing
//!
//! [`Schema`] is sealed: only the builders in this crate implement it, which
//! keeps the snapshot the single representation of a node.

use serde_json::Value;

use fjs_core::{Keyword, Result, SchemaError};

use crate::arg::{json_kind, require_array, SchemaArg};
use crate::node::SchemaNode;
use crate::serialize;
use crate::snapshot::{Composition, Snapshot};

pub(crate) mod sealed {
    use fjs_core::{Keyword, Result};
    use serde_json::Value;

    use crate::snapshot::Snapshot;

    pub trait Sealed: Sized {
        fn from_snapshot(snapshot: Snapshot) -> Self;

        fn as_snapshot(&self) -> &Snapshot;

        /// Set a flat keyword on the focused node after the family check.
        fn set_flat(&self, keyword: Keyword, value: Value) -> Result<Self> {
            self.as_snapshot()
                .update_focus(|node| node.set_keyword(keyword, value))
                .map(Self::from_snapshot)
        }

        /// Like `set_flat`, with the value computed once the family check
        /// has passed.
        fn set_flat_with<F>(&self, keyword: Keyword, value: F) -> Result<Self>
        where
            F: FnOnce(&Snapshot) -> Result<Value>,
        {
            self.as_snapshot()
                .update_focus(|node| node.set_keyword_with(keyword, value))
                .map(Self::from_snapshot)
        }

        /// Store a keyword every node admits on the focused node.
        fn put_flat(&self, keyword: Keyword, value: Value) -> Self {
            Self::from_snapshot(
                self.as_snapshot()
                    .map_focus(|node| node.put_keyword(keyword.as_str(), value)),
            )
        }

        fn map_snapshot<F>(&self, update: F) -> Self
        where
            F: FnOnce(&Snapshot) -> Snapshot,
        {
            Self::from_snapshot(update(self.as_snapshot()))
        }
    }
}

use sealed::Sealed;

/// A schema builder.
pub trait Schema: Sealed + Clone + Into<SchemaNode> {
    /// The node's current state.
    fn snapshot(&self) -> &Snapshot {
        self.as_snapshot()
    }

    /// Serialize to a draft-07 document.
    fn value_of(&self) -> Value {
        serialize::document(self.as_snapshot())
    }

    /// `value_of` as compact JSON.
    fn to_json_string(&self) -> String {
        self.value_of().to_string()
    }

    /// `value_of` as indented JSON.
    fn to_json_pretty(&self) -> String {
        format!("{:#}", self.value_of())
    }
}

/// Keywords and structure available on every node.
pub trait BaseKeywords: Schema {
    /// Set `$id`.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` for an empty id or `#`, which names the document
    /// root.
    fn id(&self, id: impl Into<String>) -> Result<Self> {
        let id = id.into();
        if id.is_empty() || id == "#" {
            return Err(SchemaError::invalid_argument(
                Keyword::Id.as_str(),
                "must be a non-empty id other than '#'",
            ));
        }
        Ok(self.put_flat(Keyword::Id, Value::String(id)))
    }

    fn title(&self, title: impl Into<String>) -> Self {
        self.put_flat(Keyword::Title, Value::String(title.into()))
    }

    fn description(&self, description: impl Into<String>) -> Self {
        self.put_flat(Keyword::Description, Value::String(description.into()))
    }

    /// Set `$comment`.
    fn comment(&self, comment: impl Into<String>) -> Self {
        self.put_flat(Keyword::Comment, Value::String(comment.into()))
    }

    /// Set `examples`, which must be an array.
    fn examples(&self, examples: impl Into<Value>) -> Result<Self> {
        let examples = require_array(Keyword::Examples.as_str(), examples.into())?;
        Ok(self.put_flat(Keyword::Examples, examples))
    }

    /// Set `enum`, which must be an array.
    fn enum_values(&self, values: impl Into<Value>) -> Result<Self> {
        let values = require_array(Keyword::Enum.as_str(), values.into())?;
        Ok(self.put_flat(Keyword::Enum, values))
    }

    fn const_value(&self, value: impl Into<Value>) -> Self {
        self.put_flat(Keyword::Const, value.into())
    }

    fn default_value(&self, value: impl Into<Value>) -> Self {
        self.put_flat(Keyword::Default, value.into())
    }

    /// Set `readOnly`; `None` means `true`.
    fn read_only(&self, flag: impl Into<Option<bool>>) -> Self {
        let flag = flag.into().unwrap_or(true);
        self.put_flat(Keyword::ReadOnly, Value::Bool(flag))
    }

    /// Set `writeOnly`; `None` means `true`.
    fn write_only(&self, flag: impl Into<Option<bool>>) -> Self {
        let flag = flag.into().unwrap_or(true);
        self.put_flat(Keyword::WriteOnly, Value::Bool(flag))
    }

    /// Set `$ref`. Nodes with a reference get no generated id.
    fn reference(&self, uri: impl Into<String>) -> Self {
        self.put_flat(Keyword::Ref, Value::String(uri.into()))
    }

    /// Mark the most recently added property as required.
    ///
    /// # Errors
    ///
    /// `InvalidChain` if no property has been added.
    fn required(&self) -> Result<Self> {
        self.as_snapshot()
            .require_last_property()
            .map(Self::from_snapshot)
    }

    /// Append names to this node's `required` list.
    fn required_names<I, S>(&self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.map_snapshot(|node| node.push_required(names))
    }

    fn not(&self, schema: impl Into<SchemaArg>) -> Result<Self> {
        let schema = schema.into().into_schema("not")?;
        Ok(self.map_snapshot(|node| node.with_not(schema)))
    }

    fn all_of(&self, schemas: impl Into<SchemaArg>) -> Result<Self> {
        compose(self, Composition::AllOf, schemas.into())
    }

    fn any_of(&self, schemas: impl Into<SchemaArg>) -> Result<Self> {
        compose(self, Composition::AnyOf, schemas.into())
    }

    fn one_of(&self, schemas: impl Into<SchemaArg>) -> Result<Self> {
        compose(self, Composition::OneOf, schemas.into())
    }

    /// Attach an `if`/`then` pair.
    fn if_then(
        &self,
        if_schema: impl Into<SchemaArg>,
        then_schema: impl Into<SchemaArg>,
    ) -> Result<Self> {
        let if_branch = if_schema.into().into_schema("if")?;
        let then_branch = then_schema.into().into_schema("then")?;
        Ok(self.map_snapshot(|node| node.with_conditional(if_branch, then_branch, None)))
    }

    /// Attach an `if`/`then`/`else` triple.
    fn if_then_else(
        &self,
        if_schema: impl Into<SchemaArg>,
        then_schema: impl Into<SchemaArg>,
        else_schema: impl Into<SchemaArg>,
    ) -> Result<Self> {
        let if_branch = if_schema.into().into_schema("if")?;
        let then_branch = then_schema.into().into_schema("then")?;
        let else_branch = else_schema.into().into_schema("else")?;
        Ok(self.map_snapshot(|node| {
            node.with_conditional(if_branch, then_branch, Some(else_branch))
        }))
    }

    /// Merge an arbitrary JSON object into the focused node, unvalidated.
    /// Raw keys override same-named keys on serialization.
    fn raw(&self, fragment: impl Into<Value>) -> Result<Self> {
        match fragment.into() {
            Value::Object(map) => {
                Ok(Self::from_snapshot(self.as_snapshot().map_focus(|node| node.merge_raw(map))))
            }
            other => Err(SchemaError::invalid_argument(
                "raw",
                format!("must be an object rather than a {}", json_kind(&other)),
            )),
        }
    }
}

fn compose<S: Sealed>(builder: &S, kind: Composition, schemas: SchemaArg) -> Result<S> {
    let schemas = schemas.into_schema_list(kind.as_str())?;
    Ok(builder.map_snapshot(|node| node.with_composition(kind, schemas)))
}

schema_builder! {
    /// An untyped node: no `type` keyword, only keywords every node admits.
    BaseSchema => Base
}


impl BaseSchema {
    pub(crate) fn new(options: std::sync::Arc<fjs_core::BuilderOptions>) -> Self {
        Self::from_snapshot(Snapshot::empty(None, options))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{base, object, string};
    use fjs_core::TypeFamily;
    use serde_json::json;

    #[test]
    fn test_base_emits_no_type() {
        assert_eq!(base().value_of(), json!({}));
    }

    #[test]
    fn test_annotations() {
        let schema = base()
            .title("T")
            .description("D")
            .comment("C")
            .const_value(1)
            .default_value("x")
            .read_only(None)
            .write_only(false);
        assert_eq!(
            schema.value_of(),
            json!({
                "$comment": "C",
                "title": "T",
                "description": "D",
                "const": 1,
                "default": "x",
                "readOnly": true,
                "writeOnly": false
            })
        );
    }

    #[test]
    fn test_id_rejects_empty_and_root() {
        assert_eq!(base().id("").unwrap_err().keyword(), Some("$id"));
        assert!(base().id("#").is_err());
        let schema = base().id("#/definitions/a").unwrap();
        assert_eq!(schema.value_of()["$id"], json!("#/definitions/a"));
    }

    #[test]
    fn test_enum_and_examples_must_be_arrays() {
        let err = base().enum_values("a").unwrap_err();
        assert!(err.to_string().contains("enum"));
        assert!(base().examples(json!({"a": 1})).is_err());
        let schema = base().enum_values(json!(["a", "b"])).unwrap();
        assert_eq!(schema.value_of(), json!({"enum": ["a", "b"]}));
    }

    #[test]
    fn test_required_without_prop_is_invalid_chain() {
        let err = object().required().unwrap_err();
        assert!(matches!(err, SchemaError::InvalidChain { .. }));
    }

    #[test]
    fn test_required_names_apply_to_the_node() {
        let schema = object()
            .prop("a")
            .required_names(["a", "b"])
            .required_names(["a"]);
        assert_eq!(schema.value_of()["required"], json!(["a", "b"]));
    }

    #[test]
    fn test_annotation_after_prop_targets_the_prop() {
        let schema = object().prop("name").title("Name");
        let doc = schema.value_of();
        assert_eq!(doc["properties"]["name"]["title"], json!("Name"));
        assert!(doc.get("title").is_none());
    }

    #[test]
    fn test_composition_requires_non_empty_list() {
        let err = base().any_of(Vec::<SchemaNode>::new()).unwrap_err();
        assert_eq!(err.keyword(), Some("anyOf"));
        let err = base().all_of(true).unwrap_err();
        assert!(err.to_string().contains("boolean"));
    }

    #[test]
    fn test_composition_members() {
        let schema = base()
            .one_of(vec![SchemaNode::from(string()), SchemaNode::from(crate::null())])
            .unwrap();
        assert_eq!(
            schema.value_of(),
            json!({"oneOf": [{"type": "string"}, {"type": "null"}]})
        );
    }

    #[test]
    fn test_not_requires_a_schema() {
        assert!(base().not(json!({"type": "string"})).is_err());
        let schema = base().not(string()).unwrap();
        assert_eq!(schema.value_of(), json!({"not": {"type": "string"}}));
    }

    #[test]
    fn test_raw_must_be_object() {
        let err = base().raw(json!([1])).unwrap_err();
        assert_eq!(err.keyword(), Some("raw"));
        let schema = base().raw(json!({"nullable": true})).unwrap();
        assert_eq!(schema.value_of(), json!({"nullable": true}));
    }

    #[test]
    fn test_untyped_node_rejects_typed_keywords() {
        let err = base()
            .snapshot()
            .check_family(Keyword::MinLength)
            .unwrap_err();
        assert_eq!(
            err,
            SchemaError::TypeMismatch {
                keyword: "minLength".to_string(),
                actual: "none".to_string(),
                family: TypeFamily::String,
            }
        );
    }

    #[test]
    fn test_builders_are_not_mutated() {
        let first = object().prop("a");
        let _second = first.prop("b").title("B");
        assert_eq!(first.snapshot().properties().len(), 1);
        assert!(first.snapshot().property("a").and_then(|a| a.keyword("title")).is_none());
    }

    #[test]
    fn test_pretty_and_compact_agree() {
        let schema = object().prop("a");
        let compact: Value = serde_json::from_str(&schema.to_json_string()).unwrap();
        let pretty: Value = serde_json::from_str(&schema.to_json_pretty()).unwrap();
        assert_eq!(compact, pretty);
        assert!(schema.to_json_pretty().contains('\n'));
    }
}
