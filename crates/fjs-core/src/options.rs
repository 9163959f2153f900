//! # Builder Options
//!
//! Configuration carried by every snapshot a factory creates. Options are
//! bookkeeping: they steer serialization but are never emitted.
//!
//! Options can be built in code or loaded from a JSON or YAML document:
//!
//! ```yaml
//! generate_ids: true
//! schema_uri: "http://json-schema.org/draft-07/schema#"
//! ```

use serde::{Deserialize, Serialize};

use crate::error::SchemaError;

/// The draft-07 meta-schema URI.
pub const DRAFT_07_URI: &str = "http://json-schema.org/draft-07/schema#";

/// Options shared by all builders created from one factory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderOptions {
    /// Assign `#properties/<name>` / `#definitions/<name>` ids to children
    /// that have no explicit `$id`.
    pub generate_ids: bool,
    /// Emitted as `$schema` on the root document when set.
    pub schema_uri: Option<String>,
}

impl BuilderOptions {
    /// Options that emit the draft-07 `$schema` URI on the root.
    pub fn draft07() -> Self {
        Self {
            generate_ids: false,
            schema_uri: Some(DRAFT_07_URI.to_string()),
        }
    }

    pub fn with_generate_ids(mut self, generate_ids: bool) -> Self {
        self.generate_ids = generate_ids;
        self
    }

    pub fn with_schema_uri(mut self, uri: impl Into<String>) -> Self {
        self.schema_uri = Some(uri.into());
        self
    }

    /// Load options from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` if the text is not valid JSON or has
    /// unknown fields.
    pub fn from_json_str(text: &str) -> Result<Self, SchemaError> {
        serde_json::from_str(text).map_err(|e| SchemaError::Parse {
            format: "JSON",
            reason: format!("invalid builder options: {e}"),
        })
    }

    /// Load options from a YAML document.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::Parse` if the text is not valid YAML or has
    /// unknown fields.
    pub fn from_yaml_str(text: &str) -> Result<Self, SchemaError> {
        serde_yaml::from_str(text).map_err(|e| SchemaError::Parse {
            format: "YAML",
            reason: format!("invalid builder options: {e}"),
        })
    }
}
