//! # Error Types — Construction-Time Failures
//!
//! Every builder failure is local and synchronous: it is raised by the call
//! that violates a contract, never deferred to serialization. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Argument errors name the offending keyword and the expected shape.
//! - Type mismatches name the keyword, the node's declared type, and the
//!   type family the keyword belongs to.
//! - Chain errors name the operation and the missing builder context.

use thiserror::Error;

use crate::keyword::TypeFamily;

/// Result alias used throughout the builder crates.
pub type Result<T> = std::result::Result<T, SchemaError>;

/// Top-level error type for schema construction.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A keyword setter received a value of the wrong shape.
    #[error("invalid argument for '{keyword}': {reason}")]
    InvalidArgument {
        /// Keyword or operation that rejected the argument.
        keyword: String,
        /// Expected shape, including the valid values where enumerable.
        reason: String,
    },

    /// A keyword was set on a node whose type does not support it.
    #[error("'{keyword}' requires a node of type {family}, but the node is of type {actual}")]
    TypeMismatch {
        /// The offending keyword.
        keyword: String,
        /// The node's declared type (`none` for untyped nodes).
        actual: String,
        /// The type family the keyword belongs to.
        family: TypeFamily,
    },

    /// A call relied on builder-chain context that is not present.
    #[error("invalid chain: '{operation}' {reason}")]
    InvalidChain {
        /// The operation that was called out of context.
        operation: String,
        /// What context was missing.
        reason: String,
    },

    /// An import source could not be parsed into a schema document.
    #[error("cannot import {format} document: {reason}")]
    Parse {
        /// Source format (`json` or `yaml`).
        format: &'static str,
        /// Parser message or shape complaint.
        reason: String,
    },
}

impl SchemaError {
    /// Shorthand for [`SchemaError::InvalidArgument`].
    pub fn invalid_argument(keyword: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            keyword: keyword.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`SchemaError::InvalidChain`].
    pub fn invalid_chain(operation: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidChain {
            operation: operation.into(),
            reason: reason.into(),
        }
    }

    /// The keyword or operation this error is about.
    pub fn keyword(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { keyword, .. } | Self::TypeMismatch { keyword, .. } => {
                Some(keyword)
            }
            Self::InvalidChain { operation, .. } => Some(operation),
            Self::Parse { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_argument_message_names_keyword() {
        let err = SchemaError::invalid_argument("minLength", "must be an Integer");
        assert_eq!(
            err.to_string(),
            "invalid argument for 'minLength': must be an Integer"
        );
        assert_eq!(err.keyword(), Some("minLength"));
    }

    #[test]
    fn test_type_mismatch_message_names_all_parts() {
        let err = SchemaError::TypeMismatch {
            keyword: "minimum".to_string(),
            actual: "string".to_string(),
            family: TypeFamily::Number,
        };
        let msg = err.to_string();
        assert!(msg.contains("'minimum'"));
        assert!(msg.contains("string"));
        assert!(msg.contains("number"));
    }

    #[test]
    fn test_invalid_chain_message() {
        let err = SchemaError::invalid_chain("required", "must follow a prop() call");
        assert!(err.to_string().contains("required"));
        assert_eq!(err.keyword(), Some("required"));
    }

    #[test]
    fn test_parse_error_has_no_keyword() {
        let err = SchemaError::Parse {
            format: "YAML",
            reason: "unexpected end of input".to_string(),
        };
        assert!(err.keyword().is_none());
        assert!(err.to_string().starts_with("cannot import YAML document"));
    }
}
