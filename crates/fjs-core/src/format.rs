//! # String Formats
//!
//! The fixed set of `format` identifiers the string builder accepts. The
//! set covers the draft-07 formats plus the `url` alias in common use.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SchemaError;

/// A `format` keyword value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Format {
    DateTime,
    Date,
    Time,
    Email,
    IdnEmail,
    Hostname,
    IdnHostname,
    Ipv4,
    Ipv6,
    Uri,
    UriReference,
    Iri,
    IriReference,
    UriTemplate,
    Url,
    Uuid,
    Regex,
    JsonPointer,
    RelativeJsonPointer,
}

impl Format {
    pub fn all() -> &'static [Format] {
        &[
            Self::DateTime,
            Self::Date,
            Self::Time,
            Self::Email,
            Self::IdnEmail,
            Self::Hostname,
            Self::IdnHostname,
            Self::Ipv4,
            Self::Ipv6,
            Self::Uri,
            Self::UriReference,
            Self::Iri,
            Self::IriReference,
            Self::UriTemplate,
            Self::Url,
            Self::Uuid,
            Self::Regex,
            Self::JsonPointer,
            Self::RelativeJsonPointer,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DateTime => "date-time",
            Self::Date => "date",
            Self::Time => "time",
            Self::Email => "email",
            Self::IdnEmail => "idn-email",
            Self::Hostname => "hostname",
            Self::IdnHostname => "idn-hostname",
            Self::Ipv4 => "ipv4",
            Self::Ipv6 => "ipv6",
            Self::Uri => "uri",
            Self::UriReference => "uri-reference",
            Self::Iri => "iri",
            Self::IriReference => "iri-reference",
            Self::UriTemplate => "uri-template",
            Self::Url => "url",
            Self::Uuid => "uuid",
            Self::Regex => "regex",
            Self::JsonPointer => "json-pointer",
            Self::RelativeJsonPointer => "relative-json-pointer",
        }
    }

    /// Comma-separated list of accepted identifiers.
    pub fn valid_names() -> String {
        Self::all()
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl AsRef<str> for Format {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = SchemaError;

    /// Parse a format identifier.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidArgument` for `format`, listing every
    /// accepted identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::all()
            .iter()
            .copied()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| {
                SchemaError::invalid_argument(
                    "format",
                    format!("{s:?} is not a format; valid values are: {}", Self::valid_names()),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_str_roundtrip() {
        for f in Format::all() {
            assert_eq!(f.as_str().parse::<Format>().unwrap(), *f);
        }
    }

    #[test]
    fn test_serde_matches_as_str() {
        for f in Format::all() {
            assert_eq!(serde_json::to_string(f).unwrap(), format!("\"{}\"", f.as_str()));
        }
    }

    #[test]
    fn test_unknown_format_lists_valid_values() {
        let err = "e-mail".parse::<Format>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("'format'"));
        assert!(msg.contains("date-time"));
        assert!(msg.contains("relative-json-pointer"));
    }
}
