//! # Keyword Table
//!
//! Every flat keyword the builders can set, each tagged with the type
//! family that admits it. This table is the single source of truth for two
//! decisions:
//!
//! 1. **Construction time**: whether a setter may run on a node of a given
//!    type ([`TypeFamily::admits`]).
//! 2. **Serialization time**: which stored keywords are visible for the
//!    node's current type. A property retyped with `as_number()` stops
//!    emitting its string keywords.
//!
//! Structural keywords (`type`, `properties`, `definitions`, `required`,
//! conditionals, composition, `$schema`) are not flat keywords: the snapshot
//! keeps them in dedicated fields.

use serde::{Deserialize, Serialize};

use crate::types::{SchemaType, TypeSet};

/// The type family a keyword belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFamily {
    String,
    Number,
    Array,
    Object,
    Boolean,
    /// Admitted by every node.
    Any,
}

impl TypeFamily {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Array => "array",
            Self::Object => "object",
            Self::Boolean => "boolean",
            Self::Any => "any",
        }
    }

    /// Whether a node declaring `types` may carry keywords of this family.
    ///
    /// `Any` is admitted everywhere. `Number` is admitted by `number` and
    /// `integer` nodes. Untyped nodes admit only `Any`.
    pub fn admits(&self, types: Option<&TypeSet>) -> bool {
        let Some(types) = types else {
            return *self == Self::Any;
        };
        match self {
            Self::Any => true,
            Self::String => types.contains(SchemaType::String),
            Self::Number => {
                types.contains(SchemaType::Number) || types.contains(SchemaType::Integer)
            }
            Self::Array => types.contains(SchemaType::Array),
            Self::Object => types.contains(SchemaType::Object),
            Self::Boolean => types.contains(SchemaType::Boolean),
        }
    }
}

impl std::fmt::Display for TypeFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A flat (non-structural) draft-07 keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    // any
    Id,
    Ref,
    Comment,
    Title,
    Description,
    Examples,
    Enum,
    Const,
    Default,
    ReadOnly,
    WriteOnly,
    // string
    MinLength,
    MaxLength,
    Format,
    Pattern,
    ContentEncoding,
    ContentMediaType,
    // number
    Minimum,
    Maximum,
    ExclusiveMinimum,
    ExclusiveMaximum,
    MultipleOf,
    // array
    Items,
    AdditionalItems,
    Contains,
    UniqueItems,
    MinItems,
    MaxItems,
    // object
    AdditionalProperties,
    MaxProperties,
    MinProperties,
    PatternProperties,
    Dependencies,
    PropertyNames,
}

/// Keys the snapshot models structurally rather than as flat keywords.
pub const STRUCTURAL_KEYS: &[&str] = &[
    "$schema",
    "type",
    "properties",
    "definitions",
    "required",
    "if",
    "then",
    "else",
    "allOf",
    "anyOf",
    "oneOf",
    "not",
];

impl Keyword {
    /// All flat keywords in canonical order.
    pub fn all() -> &'static [Keyword] {
        &[
            Self::Id,
            Self::Ref,
            Self::Comment,
            Self::Title,
            Self::Description,
            Self::Examples,
            Self::Enum,
            Self::Const,
            Self::Default,
            Self::ReadOnly,
            Self::WriteOnly,
            Self::MinLength,
            Self::MaxLength,
            Self::Format,
            Self::Pattern,
            Self::ContentEncoding,
            Self::ContentMediaType,
            Self::Minimum,
            Self::Maximum,
            Self::ExclusiveMinimum,
            Self::ExclusiveMaximum,
            Self::MultipleOf,
            Self::Items,
            Self::AdditionalItems,
            Self::Contains,
            Self::UniqueItems,
            Self::MinItems,
            Self::MaxItems,
            Self::AdditionalProperties,
            Self::MaxProperties,
            Self::MinProperties,
            Self::PatternProperties,
            Self::Dependencies,
            Self::PropertyNames,
        ]
    }

    /// The keyword name as it appears in a schema document.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "$id",
            Self::Ref => "$ref",
            Self::Comment => "$comment",
            Self::Title => "title",
            Self::Description => "description",
            Self::Examples => "examples",
            Self::Enum => "enum",
            Self::Const => "const",
            Self::Default => "default",
            Self::ReadOnly => "readOnly",
            Self::WriteOnly => "writeOnly",
            Self::MinLength => "minLength",
            Self::MaxLength => "maxLength",
            Self::Format => "format",
            Self::Pattern => "pattern",
            Self::ContentEncoding => "contentEncoding",
            Self::ContentMediaType => "contentMediaType",
            Self::Minimum => "minimum",
            Self::Maximum => "maximum",
            Self::ExclusiveMinimum => "exclusiveMinimum",
            Self::ExclusiveMaximum => "exclusiveMaximum",
            Self::MultipleOf => "multipleOf",
            Self::Items => "items",
            Self::AdditionalItems => "additionalItems",
            Self::Contains => "contains",
            Self::UniqueItems => "uniqueItems",
            Self::MinItems => "minItems",
            Self::MaxItems => "maxItems",
            Self::AdditionalProperties => "additionalProperties",
            Self::MaxProperties => "maxProperties",
            Self::MinProperties => "minProperties",
            Self::PatternProperties => "patternProperties",
            Self::Dependencies => "dependencies",
            Self::PropertyNames => "propertyNames",
        }
    }

    /// Look a keyword up by its document name.
    pub fn from_name(name: &str) -> Option<Keyword> {
        Self::all().iter().copied().find(|k| k.as_str() == name)
    }

    /// The type family that admits this keyword.
    pub fn family(&self) -> TypeFamily {
        match self {
            Self::Id
            | Self::Ref
            | Self::Comment
            | Self::Title
            | Self::Description
            | Self::Examples
            | Self::Enum
            | Self::Const
            | Self::Default
            | Self::ReadOnly
            | Self::WriteOnly => TypeFamily::Any,
            Self::MinLength
            | Self::MaxLength
            | Self::Format
            | Self::Pattern
            | Self::ContentEncoding
            | Self::ContentMediaType => TypeFamily::String,
            Self::Minimum
            | Self::Maximum
            | Self::ExclusiveMinimum
            | Self::ExclusiveMaximum
            | Self::MultipleOf => TypeFamily::Number,
            Self::Items
            | Self::AdditionalItems
            | Self::Contains
            | Self::UniqueItems
            | Self::MinItems
            | Self::MaxItems => TypeFamily::Array,
            Self::AdditionalProperties
            | Self::MaxProperties
            | Self::MinProperties
            | Self::PatternProperties
            | Self::Dependencies
            | Self::PropertyNames => TypeFamily::Object,
        }
    }

    /// Whether the keyword is visible on a node declaring `types`.
    pub fn visible_for(&self, types: Option<&TypeSet>) -> bool {
        self.family().admits(types)
    }
}

impl std::fmt::Display for Keyword {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether `name` is modelled structurally by the snapshot.
pub fn is_structural(name: &str) -> bool {
    STRUCTURAL_KEYS.contains(&name)
}
