//! # fjs-core — Foundational Types for the Schema Builder
//!
//! The leaf of the crate DAG. Defines the vocabulary the builder crate is
//! written in: the draft-07 type enumeration, the keyword table with its
//! type families, the string format set, the error hierarchy, and the
//! options a factory hands to every builder it creates.
//!
//! ## Key Design Principles
//!
//! 1. **One keyword table.** Every flat keyword is a [`Keyword`] variant
//!    with a [`TypeFamily`]. Setters consult the family to reject
//!    cross-type keywords; serialization consults it to project the
//!    keywords visible for a node's current type.
//!
//! 2. **Closed enumerations.** Types and formats are enums parsed through
//!    `FromStr`, so invalid names fail with a message listing valid values.
//!
//! 3. **Construction-time errors only.** [`SchemaError`] has no I/O
//!    variants; every failure is raised by the call that caused it.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `fjs-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod error;
pub mod format;
pub mod keyword;
pub mod options;
pub mod types;

// Re-export primary types for ergonomic imports.
pub use error::{Result, SchemaError};
pub use format::Format;
pub use keyword::{is_structural, Keyword, TypeFamily, STRUCTURAL_KEYS};
pub use options::{BuilderOptions, DRAFT_07_URI};
pub use types::{SchemaType, TypeSet};
