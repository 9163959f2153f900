//! # Import
//!
//! Rebuilds a builder from an existing draft-07 document so it can be
//! extended with further chained calls.
//!
//! Dispatch is on `type`: a single known type yields the matching builder,
//! a list of known types yields a mixed builder, and anything else falls
//! back to the base builder. Recognised keywords admitted by the document's
//! type are stored as ordinary keywords; `properties`, `definitions`,
//! `required`, conditionals and composition are rebuilt recursively.
//! Everything else, including keywords the type does not admit and values
//! of the wrong shape, is kept verbatim. A verbatim key that precedes every
//! structural key stays in place among the flat keywords and is emitted
//! whatever the node's type; one that follows them goes to the raw keyword
//! set, which is emitted last. Either way, importing a `value_of()`
//! document and serializing it again reproduces it.

use std::collections::HashSet;
use std::sync::Arc;

use serde_json::{Map, Value};

use fjs_core::{is_structural, BuilderOptions, Keyword, Result, SchemaError, TypeSet};

use crate::arg::json_kind;
use crate::base::sealed::Sealed;
use crate::node::SchemaNode;
use crate::snapshot::{Composition, Snapshot};

/// Import a document with default options.
pub fn import(document: &Value) -> Result<SchemaNode> {
    import_with(document, Arc::new(BuilderOptions::default()))
}

/// Parse JSON text and import it.
pub fn import_json_str(text: &str) -> Result<SchemaNode> {
    import_json_str_with(text, Arc::new(BuilderOptions::default()))
}

/// Parse YAML text and import it. YAML is read straight into the JSON value
/// model, so only YAML that has a JSON equivalent is accepted.
pub fn import_yaml_str(text: &str) -> Result<SchemaNode> {
    import_yaml_str_with(text, Arc::new(BuilderOptions::default()))
}

pub(crate) fn import_json_str_with(text: &str, options: Arc<BuilderOptions>) -> Result<SchemaNode> {
    let document: Value = serde_json::from_str(text).map_err(|e| SchemaError::Parse {
        format: "JSON",
        reason: e.to_string(),
    })?;
    import_text_document(&document, "JSON", options)
}

pub(crate) fn import_yaml_str_with(text: &str, options: Arc<BuilderOptions>) -> Result<SchemaNode> {
    let document: Value = serde_yaml::from_str(text).map_err(|e| SchemaError::Parse {
        format: "YAML",
        reason: e.to_string(),
    })?;
    import_text_document(&document, "YAML", options)
}

fn import_text_document(
    document: &Value,
    format: &'static str,
    options: Arc<BuilderOptions>,
) -> Result<SchemaNode> {
    if !document.is_object() {
        return Err(SchemaError::Parse {
            format,
            reason: format!("expected a mapping at the top level, found a {}", json_kind(document)),
        });
    }
    import_with(document, options)
}

/// Import `document`, handing `options` to every rebuilt node.
///
/// A `$schema` on the root overrides `options.schema_uri`.
///
/// # Errors
///
/// `InvalidArgument` if `document` is not a JSON object.
pub(crate) fn import_with(document: &Value, options: Arc<BuilderOptions>) -> Result<SchemaNode> {
    let Value::Object(map) = document else {
        return Err(SchemaError::invalid_argument(
            "import",
            format!("must be a schema object rather than a {}", json_kind(document)),
        ));
    };
    let options = match map.get("$schema") {
        Some(Value::String(uri)) => {
            let mut options = (*options).clone();
            options.schema_uri = Some(uri.clone());
            Arc::new(options)
        }
        _ => options,
    };
    Ok(SchemaNode::from_snapshot(import_node(map, &options, true)))
}

fn import_node(map: &Map<String, Value>, options: &Arc<BuilderOptions>, root: bool) -> Snapshot {
    let types = map.get("type").and_then(TypeSet::from_value);
    if types.is_none() {
        tracing::debug!(
            type_keyword = ?map.get("type"),
            "no recognised type; importing as an untyped node"
        );
    }
    let branches = match (map.get("if"), map.get("then")) {
        (Some(Value::Object(if_map)), Some(Value::Object(then_map))) => Some((if_map, then_map)),
        _ => None,
    };
    let mut node = Snapshot::empty(types.clone(), Arc::clone(options));
    let mut raw = Map::new();
    // Flat keywords are serialized ahead of every structural key and raw
    // keywords after all of them.
    let mut past_structure = false;

    for (key, value) in map {
        if is_structural(key) && key != "type" && key != "$schema" {
            past_structure = true;
        }
        let verbatim = match key.as_str() {
            "type" => types.is_none(),
            "$schema" => !root || !value.is_string(),
            "properties" => match named_children(value, options) {
                Some(children) => {
                    for (name, child) in children {
                        node = node.push_property(name, child);
                    }
                    false
                }
                None => true,
            },
            "definitions" => match named_children(value, options) {
                Some(children) => {
                    for (name, child) in children {
                        node = node.push_definition(name, child);
                    }
                    false
                }
                None => true,
            },
            "required" => match string_list(value) {
                Some(names) => {
                    node = node.push_required(names);
                    false
                }
                None => true,
            },
            // Rebuilt together below.
            "if" | "then" => branches.is_none(),
            "else" => branches.is_none() || !value.is_object(),
            "allOf" | "anyOf" | "oneOf" => {
                let kind = match key.as_str() {
                    "allOf" => Composition::AllOf,
                    "anyOf" => Composition::AnyOf,
                    _ => Composition::OneOf,
                };
                match child_list(value, options) {
                    Some(members) => {
                        node = node.with_composition(kind, members);
                        false
                    }
                    None => true,
                }
            }
            "not" => match value {
                Value::Object(child) => {
                    node = node.with_not(import_node(child, options, false));
                    false
                }
                _ => true,
            },
            name => match Keyword::from_name(name) {
                Some(keyword) if keyword.family().admits(types.as_ref()) => {
                    node = node.put_keyword(name, value.clone());
                    false
                }
                _ => true,
            },
        };
        if !verbatim {
            continue;
        }
        if past_structure {
            keep_raw(&mut raw, key, value);
        } else {
            tracing::trace!(keyword = %key, "keeping keyword verbatim in place");
            node = node.pin_keyword(key, value.clone());
        }
    }

    if let Some((if_map, then_map)) = branches {
        let else_branch = match map.get("else") {
            Some(Value::Object(else_map)) => Some(import_node(else_map, options, false)),
            _ => None,
        };
        node = node.with_conditional(
            import_node(if_map, options, false),
            import_node(then_map, options, false),
            else_branch,
        );
    }

    if raw.is_empty() {
        node
    } else {
        node.merge_raw(raw)
    }
}

fn keep_raw(raw: &mut Map<String, Value>, key: &str, value: &Value) {
    tracing::trace!(keyword = key, "keeping keyword verbatim");
    raw.insert(key.to_string(), value.clone());
}

fn named_children(
    value: &Value,
    options: &Arc<BuilderOptions>,
) -> Option<Vec<(String, Snapshot)>> {
    let Value::Object(entries) = value else {
        return None;
    };
    entries
        .iter()
        .map(|(name, child)| match child {
            Value::Object(child) => Some((name.clone(), import_node(child, options, false))),
            _ => None,
        })
        .collect()
}

fn child_list(value: &Value, options: &Arc<BuilderOptions>) -> Option<Vec<Snapshot>> {
    let Value::Array(items) = value else {
        return None;
    };
    if items.is_empty() {
        return None;
    }
    items
        .iter()
        .map(|item| match item {
            Value::Object(child) => Some(import_node(child, options, false)),
            _ => None,
        })
        .collect()
}

fn string_list(value: &Value) -> Option<Vec<String>> {
    let Value::Array(items) = value else {
        return None;
    };
    let names: Option<Vec<String>> = items
        .iter()
        .map(|item| item.as_str().map(str::to_string))
        .collect();
    let names = names?;
    // Duplicates would be collapsed by the builder and change the output.
    let unique = {
        let mut seen = HashSet::new();
        names.iter().all(|n| seen.insert(n.as_str()))
    };
    unique.then_some(names)
}
