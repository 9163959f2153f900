//! Mixed (union) builder: `"type": [..]`.
//!
//! Every keyword family is available, but each setter still checks that one
//! of the listed types admits it. Property operations require `object` in
//! the list.

use std::sync::Arc;

use fjs_core::{BuilderOptions, Result, SchemaType, TypeFamily, TypeSet};

use crate::base::sealed::Sealed;
use crate::node::SchemaNode;
use crate::snapshot::{Snapshot, Target};
use crate::string::StringSchema;

schema_builder! {
    /// A node declaring several types.
    MixedSchema => Mixed
}

impl MixedSchema {
    /// Build from type names, in order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `types` is empty, repeats a type or names an
    /// unknown type.
    pub(crate) fn new<I, S>(types: I, options: Arc<BuilderOptions>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let types = TypeSet::union(types)?;
        Ok(Self::from_snapshot(Snapshot::empty(Some(types), options)))
    }

    /// The declared types.
    pub fn types(&self) -> &[SchemaType] {
        self.snapshot.types().map(TypeSet::types).unwrap_or(&[])
    }

    fn push(&self, target: Target, name: String, child: Snapshot) -> Result<Self> {
        self.snapshot.check_admits(target.as_str(), TypeFamily::Object)?;
        Ok(self.map_snapshot(|node| node.push_named(target, name, child)))
    }

    /// Add a string property named `name`.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` unless `object` is one of the declared types.
    pub fn prop(&self, name: impl Into<String>) -> Result<Self> {
        let child = StringSchema::new(Arc::clone(&self.snapshot.options));
        self.prop_schema(name, child)
    }

    pub fn prop_schema(&self, name: impl Into<String>, child: impl Into<SchemaNode>) -> Result<Self> {
        self.push(Target::Properties, name.into(), child.into().into_snapshot())
    }

    pub fn definition(&self, name: impl Into<String>, child: impl Into<SchemaNode>) -> Result<Self> {
        self.push(Target::Definitions, name.into(), child.into().into_snapshot())
    }
}
