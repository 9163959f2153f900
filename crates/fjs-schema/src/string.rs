//! String builder and the string keyword family.

use std::str::FromStr;
use std::sync::Arc;

use regex::Regex;
use serde_json::Value;

use fjs_core::{BuilderOptions, Format, Keyword, Result, SchemaType};

use crate::arg::require_integer;
use crate::base::sealed::Sealed;
use crate::base::Schema;
use crate::snapshot::Snapshot;

/// The source text of a `pattern` keyword.
///
/// Built from a string or a compiled [`Regex`]; a regex contributes its
/// source, so flags set through `RegexBuilder` are not carried over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(String);

impl Pattern {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Pattern {
    fn from(source: &str) -> Self {
        Self(source.to_string())
    }
}

impl From<String> for Pattern {
    fn from(source: String) -> Self {
        Self(source)
    }
}

impl From<&Regex> for Pattern {
    fn from(regex: &Regex) -> Self {
        Self(regex.as_str().to_string())
    }
}

impl From<Regex> for Pattern {
    fn from(regex: Regex) -> Self {
        Self::from(&regex)
    }
}

/// Keywords of the string family.
///
/// Every setter fails with `TypeMismatch` when the focused node is not a
/// string, which happens after a property is retyped with `as_number()`.
pub trait StringKeywords: Schema {
    fn min_length(&self, length: impl Into<Value>) -> Result<Self> {
        let length = length.into();
        self.set_flat_with(Keyword::MinLength, move |_| {
            require_integer(Keyword::MinLength.as_str(), length)
        })
    }

    fn max_length(&self, length: impl Into<Value>) -> Result<Self> {
        let length = length.into();
        self.set_flat_with(Keyword::MaxLength, move |_| {
            require_integer(Keyword::MaxLength.as_str(), length)
        })
    }

    /// Set `format` to one of the draft-07 format names.
    ///
    /// # Errors
    ///
    /// `InvalidArgument` listing the valid names when `format` is unknown.
    fn format(&self, format: impl AsRef<str>) -> Result<Self> {
        let name = format.as_ref().to_string();
        self.set_flat_with(Keyword::Format, move |_| {
            Format::from_str(&name).map(|f| Value::String(f.as_str().to_string()))
        })
    }

    fn pattern(&self, pattern: impl Into<Pattern>) -> Result<Self> {
        let Pattern(source) = pattern.into();
        self.set_flat(Keyword::Pattern, Value::String(source))
    }

    fn content_encoding(&self, encoding: impl Into<String>) -> Result<Self> {
        self.set_flat(Keyword::ContentEncoding, Value::String(encoding.into()))
    }

    fn content_media_type(&self, media_type: impl Into<String>) -> Result<Self> {
        self.set_flat(Keyword::ContentMediaType, Value::String(media_type.into()))
    }
}

schema_builder! {
    /// A `string` node.
    StringSchema => String
}


impl StringSchema {
    pub(crate) fn new(options: Arc<BuilderOptions>) -> Self {
        Self::from_snapshot(Snapshot::of_type(SchemaType::String, options))
    }
}
