//! # Factory
//!
//! [`FluentSchema`] carries one [`BuilderOptions`] value into every builder
//! it creates. Children created by `prop()` inherit the options of the
//! object they are added to.
//!
//! ```
//! use fjs_schema::prelude::*;
//! use fjs_schema::{BuilderOptions, FluentSchema};
//!
//! let f = FluentSchema::new(BuilderOptions::draft07().with_generate_ids(true));
//! let doc = f.object().prop("name").value_of();
//! assert_eq!(doc["$schema"], "http://json-schema.org/draft-07/schema#");
//! assert_eq!(doc["properties"]["name"]["$id"], "#properties/name");
//! ```

use std::sync::Arc;

use serde_json::Value;

use fjs_core::{BuilderOptions, Result};

use crate::array::ArraySchema;
use crate::base::BaseSchema;
use crate::boolean::BooleanSchema;
use crate::mixed::MixedSchema;
use crate::node::SchemaNode;
use crate::null::NullSchema;
use crate::number::{IntegerSchema, NumberSchema};
use crate::object::ObjectSchema;
use crate::raw;
use crate::string::StringSchema;

/// Creates builders that share one set of options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FluentSchema {
    options: Arc<BuilderOptions>,
}

impl FluentSchema {
    pub fn new(options: BuilderOptions) -> Self {
        Self {
            options: Arc::new(options),
        }
    }

    /// Load options from JSON text.
    pub fn from_json_options(text: &str) -> Result<Self> {
        BuilderOptions::from_json_str(text).map(Self::new)
    }

    /// Load options from YAML text.
    pub fn from_yaml_options(text: &str) -> Result<Self> {
        BuilderOptions::from_yaml_str(text).map(Self::new)
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    pub fn object(&self) -> ObjectSchema {
        ObjectSchema::new(Arc::clone(&self.options))
    }

    pub fn string(&self) -> StringSchema {
        StringSchema::new(Arc::clone(&self.options))
    }

    pub fn number(&self) -> NumberSchema {
        NumberSchema::new(Arc::clone(&self.options))
    }

    pub fn integer(&self) -> IntegerSchema {
        IntegerSchema::new(Arc::clone(&self.options))
    }

    pub fn boolean(&self) -> BooleanSchema {
        BooleanSchema::new(Arc::clone(&self.options))
    }

    pub fn null(&self) -> NullSchema {
        NullSchema::new(Arc::clone(&self.options))
    }

    pub fn array(&self) -> ArraySchema {
        ArraySchema::new(Arc::clone(&self.options))
    }

    /// A node declaring every type in `types`, in order.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` if `types` is empty, repeats a type or names an
    /// unknown type.
    pub fn mixed<I, S>(&self, types: I) -> Result<MixedSchema>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        MixedSchema::new(types, Arc::clone(&self.options))
    }

    /// An untyped node.
    pub fn base(&self) -> BaseSchema {
        BaseSchema::new(Arc::clone(&self.options))
    }

    /// Rebuild a builder from a document. A root `$schema` overrides the
    /// factory's `schema_uri` for the imported tree.
    pub fn import(&self, document: &Value) -> Result<SchemaNode> {
        raw::import_with(document, Arc::clone(&self.options))
    }

    pub fn import_json_str(&self, text: &str) -> Result<SchemaNode> {
        raw::import_json_str_with(text, Arc::clone(&self.options))
    }

    pub fn import_yaml_str(&self, text: &str) -> Result<SchemaNode> {
        raw::import_yaml_str_with(text, Arc::clone(&self.options))
    }
}
