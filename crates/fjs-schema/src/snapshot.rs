//! # Snapshot — Immutable Schema Node State
//!
//! A [`Snapshot`] is one schema node under construction. Every builder call
//! produces a new snapshot; the previous one is never touched. Unchanged
//! substructures (keyword maps, child sequences, branches) are shared
//! through `Arc` and copied only on write, so a snapshot can be embedded in
//! any number of parents and reused after further chaining.
//!
//! ## Attribute Accumulation
//!
//! [`Snapshot::set_keyword`] is the single path for flat keywords: it looks
//! up the keyword's [`TypeFamily`](fjs_core::TypeFamily) and refuses the
//! write with `TypeMismatch` when the node's declared type does not admit
//! it.
//!
//! ## Property Context
//!
//! Once a node has properties, flat keyword setters target the most recently
//! added property ([`Snapshot::update_focus`]). This is what lets
//! `object().prop("email").format("email")` configure `email` rather than
//! the object. Structural operations (properties, definitions, required,
//! composition, conditionals) always apply to the node itself.

use std::sync::Arc;

use serde_json::{Map, Value};

use fjs_core::{BuilderOptions, Keyword, Result, SchemaError, SchemaType, TypeFamily, TypeSet};

/// A child snapshot tagged with its property or definition name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedNode {
    pub(crate) name: String,
    pub(crate) node: Snapshot,
}

impl NamedNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> &Snapshot {
        &self.node
    }
}

/// An `if`/`then`/`else` branch triple. `else` is optional.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Conditional {
    pub(crate) if_branch: Snapshot,
    pub(crate) then_branch: Snapshot,
    pub(crate) else_branch: Option<Snapshot>,
}

/// Combinators over a list of sub-schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Composition {
    AllOf,
    AnyOf,
    OneOf,
}

impl Composition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AllOf => "allOf",
            Self::AnyOf => "anyOf",
            Self::OneOf => "oneOf",
        }
    }

    pub fn all() -> &'static [Composition] {
        &[Self::AllOf, Self::AnyOf, Self::OneOf]
    }
}

/// Where a named child is stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Target {
    Properties,
    Definitions,
}

impl Target {
    pub(crate) fn as_str(&self) -> &'static str {
        match self {
            Self::Properties => "properties",
            Self::Definitions => "definitions",
        }
    }
}

/// One immutable schema node under construction.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub(crate) types: Option<TypeSet>,
    pub(crate) keywords: Arc<Map<String, Value>>,
    pub(crate) raw: Arc<Map<String, Value>>,
    /// Stored keywords emitted whatever the node's type.
    pub(crate) pinned: Arc<Vec<String>>,
    pub(crate) properties: Arc<Vec<NamedNode>>,
    pub(crate) definitions: Arc<Vec<NamedNode>>,
    pub(crate) required: Arc<Vec<String>>,
    pub(crate) conditional: Option<Arc<Conditional>>,
    pub(crate) all_of: Arc<Vec<Snapshot>>,
    pub(crate) any_of: Arc<Vec<Snapshot>>,
    pub(crate) one_of: Arc<Vec<Snapshot>>,
    pub(crate) not: Option<Arc<Snapshot>>,
    pub(crate) options: Arc<BuilderOptions>,
}

impl Snapshot {
    /// A fresh, empty snapshot. Each call allocates new containers.
    pub fn empty(types: Option<TypeSet>, options: Arc<BuilderOptions>) -> Self {
        Self {
            types,
            keywords: Arc::new(Map::new()),
            raw: Arc::new(Map::new()),
            pinned: Arc::new(Vec::new()),
            properties: Arc::new(Vec::new()),
            definitions: Arc::new(Vec::new()),
            required: Arc::new(Vec::new()),
            conditional: None,
            all_of: Arc::new(Vec::new()),
            any_of: Arc::new(Vec::new()),
            one_of: Arc::new(Vec::new()),
            not: None,
            options,
        }
    }

    /// An empty snapshot of a single primitive type.
    pub fn of_type(ty: SchemaType, options: Arc<BuilderOptions>) -> Self {
        Self::empty(Some(TypeSet::Single(ty)), options)
    }

    // ── Read access ─────────────────────────────────────────────────

    pub fn types(&self) -> Option<&TypeSet> {
        self.types.as_ref()
    }

    pub fn options(&self) -> &BuilderOptions {
        &self.options
    }

    /// A stored flat keyword, regardless of whether it is currently visible.
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.keywords.get(name)
    }

    /// A keyword merged through `raw`.
    pub fn raw_keyword(&self, name: &str) -> Option<&Value> {
        self.raw.get(name)
    }

    pub fn properties(&self) -> &[NamedNode] {
        &self.properties
    }

    pub fn definitions(&self) -> &[NamedNode] {
        &self.definitions
    }

    /// The property named `name`; the last entry wins on duplicates.
    pub fn property(&self, name: &str) -> Option<&Snapshot> {
        self.properties
            .iter()
            .rev()
            .find(|p| p.name == name)
            .map(|p| &p.node)
    }

    /// The definition named `name`; the last entry wins on duplicates.
    pub fn definition(&self, name: &str) -> Option<&Snapshot> {
        self.definitions
            .iter()
            .rev()
            .find(|d| d.name == name)
            .map(|d| &d.node)
    }

    pub fn required(&self) -> &[String] {
        &self.required
    }

    pub fn composition(&self, kind: Composition) -> &[Snapshot] {
        match kind {
            Composition::AllOf => &self.all_of,
            Composition::AnyOf => &self.any_of,
            Composition::OneOf => &self.one_of,
        }
    }

    pub fn not_branch(&self) -> Option<&Snapshot> {
        self.not.as_deref()
    }

    /// Whether the node declares `allOf`, `anyOf`, `oneOf` or `not`.
    pub fn has_composition(&self) -> bool {
        !self.all_of.is_empty()
            || !self.any_of.is_empty()
            || !self.one_of.is_empty()
            || self.not.is_some()
    }

    /// The explicit `$id`, if one was set.
    pub fn explicit_id(&self) -> Option<&str> {
        self.keywords.get(Keyword::Id.as_str()).and_then(Value::as_str)
    }

    pub fn has_ref(&self) -> bool {
        self.keywords.contains_key(Keyword::Ref.as_str())
    }

    /// The node flat setters currently target: the last property, or self.
    pub fn focus(&self) -> &Snapshot {
        self.properties.last().map(|p| &p.node).unwrap_or(self)
    }

    /// Human-readable type for error messages.
    pub(crate) fn type_label(&self) -> String {
        self.types
            .as_ref()
            .map(ToString::to_string)
            .unwrap_or_else(|| "none".to_string())
    }

    // ── Attribute accumulation ──────────────────────────────────────

    /// Fail with `TypeMismatch` unless this node admits `keyword`.
    pub fn check_family(&self, keyword: Keyword) -> Result<()> {
        self.check_admits(keyword.as_str(), keyword.family())
    }

    /// Fail with `TypeMismatch` unless this node admits `family`.
    ///
    /// Used for structural operations that are not flat keywords, such as
    /// adding properties to a mixed node.
    pub fn check_admits(&self, operation: &str, family: TypeFamily) -> Result<()> {
        if family.admits(self.types.as_ref()) {
            Ok(())
        } else {
            Err(SchemaError::TypeMismatch {
                keyword: operation.to_string(),
                actual: self.type_label(),
                family,
            })
        }
    }

    /// Set a flat keyword after checking its type family.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::TypeMismatch` if the node's type does not admit
    /// the keyword. The receiver is never modified.
    pub fn set_keyword(&self, keyword: Keyword, value: Value) -> Result<Snapshot> {
        self.check_family(keyword)?;
        Ok(self.put_keyword(keyword.as_str(), value))
    }

    /// Check the family, then compute the value from this node.
    ///
    /// Used by setters whose argument validation depends on the node (an
    /// integer node requires whole-number bounds).
    pub fn set_keyword_with<F>(&self, keyword: Keyword, value: F) -> Result<Snapshot>
    where
        F: FnOnce(&Snapshot) -> Result<Value>,
    {
        self.check_family(keyword)?;
        let value = value(self)?;
        Ok(self.put_keyword(keyword.as_str(), value))
    }

    /// Store a keyword without any check.
    pub(crate) fn put_keyword(&self, name: &str, value: Value) -> Snapshot {
        let mut next = self.clone();
        Arc::make_mut(&mut next.keywords).insert(name.to_string(), value);
        next
    }

    /// Store a keyword that stays visible after any retype.
    pub(crate) fn pin_keyword(&self, name: &str, value: Value) -> Snapshot {
        let mut next = self.put_keyword(name, value);
        if !next.is_pinned(name) {
            Arc::make_mut(&mut next.pinned).push(name.to_string());
        }
        next
    }

    pub(crate) fn is_pinned(&self, name: &str) -> bool {
        self.pinned.iter().any(|n| n == name)
    }

    /// Merge a mapping into the raw keyword set, bypassing validation.
    pub fn merge_raw(&self, fragment: Map<String, Value>) -> Snapshot {
        let mut next = self.clone();
        let raw = Arc::make_mut(&mut next.raw);
        for (key, value) in fragment {
            raw.insert(key, value);
        }
        next
    }

    /// Apply `update` to the focused node and rebuild this node around it.
    pub fn update_focus<F>(&self, update: F) -> Result<Snapshot>
    where
        F: FnOnce(&Snapshot) -> Result<Snapshot>,
    {
        match self.properties.last() {
            Some(last) => {
                let replaced = update(&last.node)?;
                let mut next = self.clone();
                let props = Arc::make_mut(&mut next.properties);
                if let Some(slot) = props.last_mut() {
                    slot.node = replaced;
                }
                Ok(next)
            }
            None => update(self),
        }
    }

    /// Infallible form of [`Snapshot::update_focus`].
    pub fn map_focus<F>(&self, update: F) -> Snapshot
    where
        F: FnOnce(&Snapshot) -> Snapshot,
    {
        match self.properties.last() {
            Some(last) => {
                let replaced = update(&last.node);
                let mut next = self.clone();
                if let Some(slot) = Arc::make_mut(&mut next.properties).last_mut() {
                    slot.node = replaced;
                }
                next
            }
            None => update(self),
        }
    }

    /// Apply `update` to the most recently added property.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidChain` naming `operation` when the node
    /// has no properties.
    pub fn update_last_property<F>(&self, operation: &str, update: F) -> Result<Snapshot>
    where
        F: FnOnce(&Snapshot) -> Result<Snapshot>,
    {
        if self.properties.is_empty() {
            return Err(SchemaError::invalid_chain(
                operation,
                "must follow a prop() call; the node has no properties",
            ));
        }
        self.update_focus(update)
    }

    /// Replace the declared type.
    pub fn with_types(&self, types: Option<TypeSet>) -> Snapshot {
        let mut next = self.clone();
        next.types = types;
        next
    }

    // ── Structural operations ───────────────────────────────────────

    pub(crate) fn push_named(&self, target: Target, name: String, node: Snapshot) -> Snapshot {
        let mut next = self.clone();
        let seq = match target {
            Target::Properties => Arc::make_mut(&mut next.properties),
            Target::Definitions => Arc::make_mut(&mut next.definitions),
        };
        if seq.iter().any(|n| n.name == name) {
            tracing::debug!(
                name = %name,
                target = target.as_str(),
                "name added twice; the last entry wins on serialization"
            );
        }
        seq.push(NamedNode { name, node });
        next
    }

    /// Append a property. Re-adding a name appends a new entry.
    pub fn push_property(&self, name: impl Into<String>, node: Snapshot) -> Snapshot {
        self.push_named(Target::Properties, name.into(), node)
    }

    /// Append a definition. Re-adding a name appends a new entry.
    pub fn push_definition(&self, name: impl Into<String>, node: Snapshot) -> Snapshot {
        self.push_named(Target::Definitions, name.into(), node)
    }

    /// Append names to `required`, skipping names already present.
    pub fn push_required<I, S>(&self, names: I) -> Snapshot
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.clone();
        let required = Arc::make_mut(&mut next.required);
        for name in names {
            let name = name.into();
            if !required.contains(&name) {
                required.push(name);
            }
        }
        next
    }

    /// Mark the most recently added property as required.
    ///
    /// # Errors
    ///
    /// Returns `SchemaError::InvalidChain` if the node has no properties.
    pub fn require_last_property(&self) -> Result<Snapshot> {
        let name = self
            .properties
            .last()
            .map(|p| p.name.clone())
            .ok_or_else(|| {
                SchemaError::invalid_chain(
                    "required",
                    "without arguments must follow a prop() call; the node has no properties",
                )
            })?;
        Ok(self.push_required([name]))
    }

    pub(crate) fn with_conditional(
        &self,
        if_branch: Snapshot,
        then_branch: Snapshot,
        else_branch: Option<Snapshot>,
    ) -> Snapshot {
        let mut next = self.clone();
        next.conditional = Some(Arc::new(Conditional {
            if_branch,
            then_branch,
            else_branch,
        }));
        next
    }

    pub(crate) fn with_composition(&self, kind: Composition, schemas: Vec<Snapshot>) -> Snapshot {
        let mut next = self.clone();
        let schemas = Arc::new(schemas);
        match kind {
            Composition::AllOf => next.all_of = schemas,
            Composition::AnyOf => next.any_of = schemas,
            Composition::OneOf => next.one_of = schemas,
        }
        next
    }

    pub(crate) fn with_not(&self, schema: Snapshot) -> Snapshot {
        let mut next = self.clone();
        next.not = Some(Arc::new(schema));
        next
    }

    pub fn if_branch(&self) -> Option<&Snapshot> {
        self.conditional.as_ref().map(|c| &c.if_branch)
    }

    pub fn then_branch(&self) -> Option<&Snapshot> {
        self.conditional.as_ref().map(|c| &c.then_branch)
    }

    pub fn else_branch(&self) -> Option<&Snapshot> {
        self.conditional.as_ref().and_then(|c| c.else_branch.as_ref())
    }
}
