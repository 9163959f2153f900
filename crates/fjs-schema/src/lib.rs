//! # fjs-schema — Fluent JSON Schema Builder
//!
//! Composes draft-07 documents through chained calls instead of
//! hand-written nested JSON. Keyword rules are enforced when a call is
//! made: a string keyword on a number node, a fractional bound on an
//! integer node or `required()` with no property to mark all fail at the
//! offending call, never in `value_of()`.
//!
//! ## Model
//!
//! Each builder wraps an immutable [`Snapshot`]. Every call returns a new
//! builder; the receiver stays valid and can be reused, including as a
//! child of several parents. Properties and definitions are kept as
//! ordered sequences and folded into maps by [`Schema::value_of`], which is
//! also where generated `$id`s are assigned.
//!
//! ## Capabilities
//!
//! Keyword setters live in traits ([`BaseKeywords`], [`StringKeywords`],
//! [`NumberKeywords`], [`ArrayKeywords`], [`ObjectKeywords`]); bring them
//! into scope with `use fjs_schema::prelude::*`. Once an object has
//! properties, flat keyword setters target the most recently added one.
//!
//! ```
//! use fjs_schema::prelude::*;
//! use fjs_schema::{array, number, object, string, SchemaNode};
//! use serde_json::json;
//!
//! let tuple = array().items(vec![SchemaNode::from(string()), SchemaNode::from(number())])?;
//! assert_eq!(
//!     tuple.value_of(),
//!     json!({"type": "array", "items": [{"type": "string"}, {"type": "number"}]})
//! );
//!
//! let closed = object().additional_properties(false)?.prop("a");
//! assert_eq!(closed.value_of()["additionalProperties"], json!(false));
//! # Ok::<(), fjs_schema::SchemaError>(())
//! ```
//!
//! ## Crate Policy
//!
//! - Depends only on `fjs-core` internally.
//! - No I/O; the library never installs a `tracing` subscriber.
//! - No `.unwrap()` outside tests.

#[macro_use]
mod macros;

pub mod arg;
pub mod array;
pub mod base;
pub mod boolean;
pub mod factory;
pub mod mixed;
pub mod node;
pub mod null;
pub mod number;
pub mod object;
pub mod raw;
mod serialize;
pub mod snapshot;
pub mod string;

pub use arg::SchemaArg;
pub use array::{ArrayKeywords, ArraySchema};
pub use base::{BaseKeywords, BaseSchema, Schema};
pub use boolean::BooleanSchema;
pub use factory::FluentSchema;
pub use mixed::MixedSchema;
pub use node::SchemaNode;
pub use null::NullSchema;
pub use number::{IntegerSchema, NumberKeywords, NumberSchema};
pub use object::{ObjectKeywords, ObjectSchema};
pub use raw::{import, import_json_str, import_yaml_str};
pub use snapshot::{Composition, NamedNode, Snapshot};
pub use string::{Pattern, StringKeywords, StringSchema};

pub use fjs_core::{
    BuilderOptions, Format, Keyword, Result, SchemaError, SchemaType, TypeFamily, TypeSet,
    DRAFT_07_URI,
};

/// The builder traits, for glob import.
pub mod prelude {
    pub use crate::array::ArrayKeywords;
    pub use crate::base::{BaseKeywords, Schema};
    pub use crate::number::NumberKeywords;
    pub use crate::object::ObjectKeywords;
    pub use crate::string::StringKeywords;
}

fn default_factory() -> FluentSchema {
    FluentSchema::default()
}

/// An `object` builder with default options.
pub fn object() -> ObjectSchema {
    default_factory().object()
}

pub fn string() -> StringSchema {
    default_factory().string()
}

pub fn number() -> NumberSchema {
    default_factory().number()
}

pub fn integer() -> IntegerSchema {
    default_factory().integer()
}

pub fn boolean() -> BooleanSchema {
    default_factory().boolean()
}

pub fn null() -> NullSchema {
    default_factory().null()
}

pub fn array() -> ArraySchema {
    default_factory().array()
}

/// A union of the named types, with default options.
///
/// # Errors
///
/// `InvalidArgument` if `types` is empty, repeats a type or names an
/// unknown type.
pub fn mixed<I, S>(types: I) -> Result<MixedSchema>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    default_factory().mixed(types)
}

/// An untyped builder with default options.
pub fn base() -> BaseSchema {
    default_factory().base()
}

#[cfg(test)]
mod proptests {
    use super::prelude::*;
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn prop_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,7}"
    }

    fn leaf() -> impl Strategy<Value = SchemaNode> {
        prop_oneof![
            (0u32..20, proptest::option::of(0u32..20)).prop_map(|(min, max)| {
                let s = string().min_length(min).unwrap_or_else(|_| string());
                match max {
                    Some(max) => SchemaNode::from(s.max_length(min + max).unwrap_or(s)),
                    None => SchemaNode::from(s),
                }
            }),
            (-100i64..100).prop_map(|min| SchemaNode::from(
                integer().minimum(min).unwrap_or_else(|_| integer())
            )),
            any::<bool>().prop_map(|d| SchemaNode::from(boolean().default_value(d))),
            Just(SchemaNode::from(null())),
            "[a-z ]{0,12}".prop_map(|t| SchemaNode::from(base().title(t))),
            (0u32..9).prop_map(|n| SchemaNode::from(
                mixed(["string", "null"]).unwrap().max_length(n).unwrap()
            )),
        ]
    }

    fn tree() -> impl Strategy<Value = SchemaNode> {
        leaf().prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                proptest::collection::vec((prop_name(), inner.clone(), any::<bool>()), 0..4)
                    .prop_map(|props| {
                        let mut obj = object();
                        for (name, child, required) in props {
                            obj = obj.prop_schema(name.clone(), child);
                            if required {
                                obj = obj.required_names([name]);
                            }
                        }
                        SchemaNode::from(obj)
                    }),
                inner.clone().prop_map(|item| {
                    SchemaNode::from(array().items(item).unwrap_or_else(|_| array()))
                }),
                (0u32..5, proptest::collection::vec(inner.clone(), 1..3)).prop_map(
                    |(n, members)| {
                        SchemaNode::from(string().min_length(n).unwrap().any_of(members).unwrap())
                    }
                ),
                (inner.clone(), inner.clone(), proptest::option::of(inner.clone())).prop_map(
                    |(i, t, e)| {
                        let node = integer().minimum(0).unwrap();
                        SchemaNode::from(match e {
                            Some(e) => node.if_then_else(i, t, e).unwrap(),
                            None => node.if_then(i, t).unwrap(),
                        })
                    }
                ),
                inner.prop_map(|banned| {
                    SchemaNode::from(number().maximum(10).unwrap().not(banned).unwrap())
                }),
            ]
        })
    }

    proptest! {
        #[test]
        fn chaining_never_changes_the_receiver(node in tree(), name in prop_name()) {
            let before = node.value_of();
            if let SchemaNode::Object(obj) = &node {
                let _ = obj.prop(name.clone()).title("changed");
                let _ = obj.required_names([name]);
                let _ = obj.raw(json!({"x-extra": 1}));
            }
            let _ = node.title("changed");
            let _ = node.not(string());
            prop_assert_eq!(node.value_of(), before);
        }

        #[test]
        fn value_of_is_idempotent(node in tree()) {
            prop_assert_eq!(node.to_json_string(), node.to_json_string());
            prop_assert_eq!(node.value_of(), node.clone().value_of());
        }

        #[test]
        fn import_reproduces_the_document(node in tree()) {
            let rebuilt = import(&node.value_of()).unwrap();
            prop_assert_eq!(rebuilt.to_json_string(), node.to_json_string());
        }
    }
}
