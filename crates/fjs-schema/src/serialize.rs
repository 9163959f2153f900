//! # Serialization — `value_of`
//!
//! Folds a snapshot tree into a draft-07 document:
//!
//! - ordered `properties`/`definitions` sequences become name-keyed maps
//!   (the last entry wins on duplicate names);
//! - stored keywords are projected through the keyword table so only the
//!   keywords visible for the node's current type are emitted;
//! - raw keywords are merged last and override same-named keys;
//! - empty `required`/`definitions`/`properties` are omitted;
//! - `$schema` appears on the root only, and only when configured.
//!
//! ## Generated ids
//!
//! Ids are assigned here, from the node's position in the tree. A node whose
//! options enable id generation gives each child without an explicit `$id`
//! (and without `$ref`) the id `<path>/<target>/<name>`, where `<path>` is
//! the node's own id, or `#` at the root. The `not`/`if`/`then`/`else`
//! branches of a generating node are rooted at `#not`, `#if`, `#then` and
//! `#else`.
//!
//! Serialization is pure and infallible.

use serde_json::{Map, Value};

use fjs_core::Keyword;

use crate::snapshot::{Composition, NamedNode, Snapshot, Target};

const ROOT_PATH: &str = "#";

/// Which wrapper fields to drop when a node is embedded.
#[derive(Debug, Clone, Copy, Default)]
struct Strip {
    schema_uri: bool,
    definitions: bool,
    type_keyword: bool,
}

/// Position of a node in the document being rendered.
#[derive(Debug, Clone)]
struct Frame {
    /// Prefix for ids generated for this node's children.
    path: String,
    /// Generated id for this node, when it has no explicit one.
    auto_id: Option<String>,
    strip: Strip,
}

impl Frame {
    fn root() -> Self {
        Self {
            path: ROOT_PATH.to_string(),
            auto_id: None,
            strip: Strip::default(),
        }
    }

    fn embedded(path: impl Into<String>, strip: Strip) -> Self {
        Self {
            path: path.into(),
            auto_id: None,
            strip: Strip {
                schema_uri: true,
                ..strip
            },
        }
    }
}

fn join(path: &str, target: &str, name: &str) -> String {
    if path == ROOT_PATH {
        format!("#{target}/{name}")
    } else {
        format!("{path}/{target}/{name}")
    }
}

/// The root document.
pub(crate) fn document(snapshot: &Snapshot) -> Value {
    Value::Object(render(snapshot, &Frame::root()))
}

/// A non-root rendering, used for schemas embedded as keyword values
/// (`items`, `contains`, `additionalProperties`, …).
pub(crate) fn embedded(snapshot: &Snapshot) -> Value {
    Value::Object(render(snapshot, &Frame::embedded(ROOT_PATH, Strip::default())))
}

fn render(node: &Snapshot, frame: &Frame) -> Map<String, Value> {
    let mut out = Map::new();

    if !frame.strip.schema_uri {
        if let Some(uri) = &node.options.schema_uri {
            out.insert("$schema".to_string(), Value::String(uri.clone()));
        }
    }

    let id_key = Keyword::Id.as_str();
    let ref_key = Keyword::Ref.as_str();
    if let Some(id) = node.keywords.get(id_key) {
        out.insert(id_key.to_string(), id.clone());
    } else if let Some(auto) = &frame.auto_id {
        out.insert(id_key.to_string(), Value::String(auto.clone()));
    }
    if let Some(reference) = node.keywords.get(ref_key) {
        out.insert(ref_key.to_string(), reference.clone());
    }

    if !frame.strip.type_keyword {
        if let Some(types) = &node.types {
            out.insert("type".to_string(), types.to_value());
        }
    }

    project_keywords(node, &mut out);

    if !frame.strip.definitions && !node.definitions.is_empty() {
        out.insert(
            Target::Definitions.as_str().to_string(),
            Value::Object(fold_named(node, frame, Target::Definitions, &node.definitions)),
        );
    }
    if !node.properties.is_empty() {
        out.insert(
            Target::Properties.as_str().to_string(),
            Value::Object(fold_named(node, frame, Target::Properties, &node.properties)),
        );
    }
    if !node.required.is_empty() {
        out.insert(
            "required".to_string(),
            Value::Array(node.required.iter().cloned().map(Value::String).collect()),
        );
    }

    if let Some(cond) = &node.conditional {
        let strip = Strip {
            schema_uri: true,
            definitions: true,
            type_keyword: true,
        };
        out.insert(
            "if".to_string(),
            render_branch(node, "#if", &cond.if_branch, strip),
        );
        out.insert(
            "then".to_string(),
            render_branch(node, "#then", &cond.then_branch, strip),
        );
        if let Some(else_branch) = &cond.else_branch {
            out.insert(
                "else".to_string(),
                render_branch(node, "#else", else_branch, strip),
            );
        }
    }

    for kind in Composition::all() {
        let members = node.composition(*kind);
        if members.is_empty() {
            continue;
        }
        let rendered = members
            .iter()
            .map(|m| {
                Value::Object(render(m, &Frame::embedded(ROOT_PATH, Strip::default())))
            })
            .collect();
        out.insert(kind.as_str().to_string(), Value::Array(rendered));
    }

    if let Some(not) = &node.not {
        let strip = Strip {
            schema_uri: true,
            definitions: true,
            type_keyword: false,
        };
        out.insert(
            "not".to_string(),
            render_branch(node, "#not", not, strip),
        );
    }

    for (key, value) in node.raw.iter() {
        out.insert(key.clone(), value.clone());
    }

    out
}

/// Emit stored keywords visible for the node's current type.
///
/// Names outside the keyword table and pinned names are emitted as stored.
fn project_keywords(node: &Snapshot, out: &mut Map<String, Value>) {
    let types = node.types.as_ref();
    for (name, value) in node.keywords.iter() {
        if name == Keyword::Id.as_str() || name == Keyword::Ref.as_str() {
            continue;
        }
        let visible = node.is_pinned(name)
            || Keyword::from_name(name)
                .map(|kw| kw.visible_for(types))
                .unwrap_or(true);
        if visible {
            out.insert(name.clone(), value.clone());
        }
    }
}

fn render_branch(
    holder: &Snapshot,
    branch_path: &str,
    branch: &Snapshot,
    strip: Strip,
) -> Value {
    let path = if holder.options.generate_ids {
        branch_path
    } else {
        ROOT_PATH
    };
    Value::Object(render(branch, &Frame::embedded(path, strip)))
}

fn fold_named(
    parent: &Snapshot,
    frame: &Frame,
    target: Target,
    entries: &[NamedNode],
) -> Map<String, Value> {
    let generate = parent.options.generate_ids;
    let mut folded = Map::new();
    for entry in entries {
        let child = &entry.node;
        let generated = join(&frame.path, target.as_str(), &entry.name);
        let auto_id = (generate && child.explicit_id().is_none() && !child.has_ref())
            .then(|| generated.clone());
        let path = if generate {
            child
                .explicit_id()
                .map(str::to_string)
                .unwrap_or(generated)
        } else {
            ROOT_PATH.to_string()
        };
        let child_frame = Frame {
            path,
            auto_id,
            strip: Strip {
                schema_uri: true,
                definitions: false,
                // A composed member's type is indeterminate.
                type_keyword: child.has_composition(),
            },
        };
        folded.insert(entry.name.clone(), Value::Object(render(child, &child_frame)));
    }
    folded
}
