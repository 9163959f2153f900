//! Number and integer builders, and the numeric keyword family.
//!
//! Both builders share [`NumberKeywords`]. On a node whose only type is
//! `integer`, bounds and `multipleOf` must be whole numbers; `3.0` is
//! accepted and stored as `3`.

use std::sync::Arc;

use serde_json::Value;

use fjs_core::{BuilderOptions, Keyword, Result, SchemaType, TypeSet};

use crate::arg::require_number;
use crate::base::sealed::Sealed;
use crate::base::Schema;
use crate::snapshot::Snapshot;

fn bound(keyword: Keyword, node: &Snapshot, value: Value) -> Result<Value> {
    let integer_only = node.types().is_some_and(TypeSet::is_integer_only);
    require_number(keyword.as_str(), value, integer_only)
}

/// Keywords of the number family.
pub trait NumberKeywords: Schema {
    fn minimum(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        self.set_flat_with(Keyword::Minimum, move |node| {
            bound(Keyword::Minimum, node, value)
        })
    }

    fn maximum(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        self.set_flat_with(Keyword::Maximum, move |node| {
            bound(Keyword::Maximum, node, value)
        })
    }

    fn exclusive_minimum(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        self.set_flat_with(Keyword::ExclusiveMinimum, move |node| {
            bound(Keyword::ExclusiveMinimum, node, value)
        })
    }

    fn exclusive_maximum(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        self.set_flat_with(Keyword::ExclusiveMaximum, move |node| {
            bound(Keyword::ExclusiveMaximum, node, value)
        })
    }

    fn multiple_of(&self, value: impl Into<Value>) -> Result<Self> {
        let value = value.into();
        self.set_flat_with(Keyword::MultipleOf, move |node| {
            bound(Keyword::MultipleOf, node, value)
        })
    }
}

schema_builder! {
    /// A `number` node.
    NumberSchema => Number
}


impl NumberSchema {
    pub(crate) fn new(options: Arc<BuilderOptions>) -> Self {
        Self::from_snapshot(Snapshot::of_type(SchemaType::Number, options))
    }
}

schema_builder! {
    /// An `integer` node.
    IntegerSchema => Integer
}


impl IntegerSchema {
    pub(crate) fn new(options: Arc<BuilderOptions>) -> Self {
        Self::from_snapshot(Snapshot::of_type(SchemaType::Integer, options))
    }
}
