//! Explicit schema declarations for config nodes.
//!
//! A config node is any `Default` struct that implements [`ConfigNode`] by
//! describing its fields through a [`Schema`]. Each declared field bundles a
//! [`Decl`] (name, logical segment, comment lines) with accessor closures, so
//! the binder never needs runtime type introspection.
//!
//! ```ignore
//! #[derive(Debug, Default)]
//! struct ServerSection {
//!     max_players: i64,
//!     motd: Option<String>,
//! }
//!
//! impl ConfigNode for ServerSection {
//!     fn schema(schema: Schema<Self>) -> Schema<Self> {
//!         schema
//!             .value(
//!                 Decl::new("max_players")
//!                     .segment("maxPlayers")
//!                     .comment("Max players")
//!                     .comment("Default: 20"),
//!                 |s| &s.max_players,
//!                 |s| &mut s.max_players,
//!             )
//!             .optional("motd", |s| &s.motd, |s| &mut s.motd)
//!     }
//! }
//! ```
//!
//! Fields come in two kinds:
//!
//! - **Values** ([`Schema::value`], [`Schema::optional`]) hold anything that
//!   converts to and from a `toml::Value` through serde. `Option` fields that
//!   are `None` are never written.
//! - **Nodes** ([`Schema::node`]) hold another config node. Their fields are
//!   bound below the node's own path.
//!
//! [`Schema::embed`] merges the fields of a base node stored inside this one
//! into this node's own field list, at the same path level. This is how a
//! family of nodes shares common settings.

use std::any::type_name;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use toml::Value;

use crate::discover::discover;
use crate::document::{Document, edit_value_to_value};
use crate::error::BindError;
use crate::types::Strictness;

/// A struct that can be bound to a document.
pub trait ConfigNode: Default + 'static {
    /// Describe this node's fields by adding them to `schema`, which starts
    /// out empty.
    fn schema(schema: Schema<Self>) -> Schema<Self>;

    /// Create an empty node before population.
    ///
    /// Override this when a node needs more than `Default` to come into
    /// existence. Failure aborts the load as a [`BindError::Construct`].
    fn construct() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        Ok(Self::default())
    }
}

/// Declaration of one field: its name, logical path segment and comments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    name: &'static str,
    segment: Option<&'static str>,
    comments: Vec<String>,
}

impl Decl {
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            segment: None,
            comments: Vec::new(),
        }
    }

    /// Override the path segment (default: the field name).
    pub fn segment(mut self, segment: &'static str) -> Self {
        self.segment = Some(segment);
        self
    }

    /// Append one comment line.
    pub fn comment(mut self, line: impl Into<String>) -> Self {
        self.comments.push(line.into());
        self
    }

    /// Append several comment lines, in order.
    pub fn comments<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.comments.extend(lines.into_iter().map(Into::into));
        self
    }
}

impl From<&'static str> for Decl {
    fn from(name: &'static str) -> Self {
        Decl::new(name)
    }
}

type ReadFn<N> = Arc<dyn Fn(&N) -> Result<Option<Value>, String>>;
type WriteFn<N> = Arc<dyn Fn(&mut N, Value) -> Result<(), String>>;
type WalkFn<N> =
    Arc<dyn Fn(&N, &str, &mut dyn FnMut(&str, Value), Strictness) -> Result<(), BindError>>;
type PopulateFn<N> = Arc<dyn Fn(&mut N, &dyn Document, &str, Strictness) -> Result<(), BindError>>;
type Getter<N, B> = Arc<dyn Fn(&N) -> &B>;
type GetterMut<N, B> = Arc<dyn Fn(&mut N) -> &mut B>;
type EmbedFn<N> = Arc<dyn Fn() -> Result<Vec<Field<N>>, BindError>>;

/// Serialize a field value. A value that serializes as `None` reads as unset.
fn to_value<V: Serialize + ?Sized>(value: &V) -> Result<Option<Value>, String> {
    match value.serialize(toml_edit::ser::ValueSerializer::new()) {
        Ok(v) => Ok(Some(edit_value_to_value(&v))),
        Err(toml_edit::ser::Error::UnsupportedNone) => Ok(None),
        Err(e) => Err(e.to_string()),
    }
}

/// A discovered field of node type `N`.
pub struct Field<N> {
    decl: Decl,
    kind: FieldKind<N>,
}

impl<N> Field<N> {
    /// The field's declared name.
    pub fn name(&self) -> &'static str {
        self.decl.name
    }

    /// The logical segment this field contributes to paths.
    pub fn segment(&self) -> &'static str {
        self.decl.segment.unwrap_or(self.decl.name)
    }

    pub fn comments(&self) -> &[String] {
        &self.decl.comments
    }

    /// Name of the field's declared Rust type.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            FieldKind::Value(v) => v.type_name,
            FieldKind::Node(n) => n.type_name,
        }
    }

    pub fn kind(&self) -> &FieldKind<N> {
        &self.kind
    }

    pub fn is_node(&self) -> bool {
        matches!(self.kind, FieldKind::Node(_))
    }
}

impl<N> Clone for Field<N> {
    fn clone(&self) -> Self {
        Self {
            decl: self.decl.clone(),
            kind: self.kind.clone(),
        }
    }
}

impl<N> std::fmt::Debug for Field<N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.name())
            .field("segment", &self.segment())
            .field("comments", &self.comments())
            .field("type_name", &self.type_name())
            .field("node", &self.is_node())
            .finish()
    }
}

pub enum FieldKind<N> {
    /// A scalar (or opaque serde) value stored directly in the document.
    Value(ValueField<N>),
    /// A nested config node bound below this field's path.
    Node(NodeField<N>),
}

impl<N> Clone for FieldKind<N> {
    fn clone(&self) -> Self {
        match self {
            FieldKind::Value(v) => FieldKind::Value(v.clone()),
            FieldKind::Node(n) => FieldKind::Node(n.clone()),
        }
    }
}

/// Accessors for a value field.
pub struct ValueField<N> {
    type_name: &'static str,
    read: ReadFn<N>,
    write: WriteFn<N>,
}

impl<N> ValueField<N> {
    /// Read the field as a document value. `Ok(None)` means the field is unset.
    pub fn read(&self, node: &N) -> Result<Option<Value>, String> {
        (self.read)(node)
    }

    /// Convert a document value into the field's type and assign it.
    pub fn write(&self, node: &mut N, value: Value) -> Result<(), String> {
        (self.write)(node, value)
    }
}

impl<N> Clone for ValueField<N> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            read: Arc::clone(&self.read),
            write: Arc::clone(&self.write),
        }
    }
}

/// Recursion hooks for a nested node field.
pub struct NodeField<N> {
    type_name: &'static str,
    walk: WalkFn<N>,
    populate: PopulateFn<N>,
    resolve: fn(&str) -> Vec<String>,
}

impl<N> NodeField<N> {
    pub(crate) fn walk(
        &self,
        node: &N,
        path: &str,
        sink: &mut dyn FnMut(&str, Value),
        strictness: Strictness,
    ) -> Result<(), BindError> {
        (self.walk)(node, path, sink, strictness)
    }

    pub(crate) fn populate(
        &self,
        node: &mut N,
        doc: &dyn Document,
        path: &str,
        strictness: Strictness,
    ) -> Result<(), BindError> {
        (self.populate)(node, doc, path, strictness)
    }

    /// Resolve the comments of `rest`, a path relative to this nested node.
    pub fn resolve_comments(&self, rest: &str) -> Vec<String> {
        (self.resolve)(rest)
    }
}

impl<N> Clone for NodeField<N> {
    fn clone(&self) -> Self {
        Self {
            type_name: self.type_name,
            walk: Arc::clone(&self.walk),
            populate: Arc::clone(&self.populate),
            resolve: self.resolve,
        }
    }
}

/// The declared fields of node type `N`: its own fields in order, followed by
/// embedded base sections in order.
pub struct Schema<N> {
    fields: Vec<Field<N>>,
    embedded: Vec<EmbedFn<N>>,
}

impl<N: 'static> Schema<N> {
    pub fn new() -> Self {
        Self {
            fields: Vec::new(),
            embedded: Vec::new(),
        }
    }

    /// Declare a value field. A value that serializes as `None` (an `Option`
    /// declared here rather than through [`optional`](Self::optional)) is
    /// skipped on store.
    pub fn value<V>(
        mut self,
        decl: impl Into<Decl>,
        get: impl Fn(&N) -> &V + 'static,
        get_mut: impl Fn(&mut N) -> &mut V + 'static,
    ) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
    {
        let read: ReadFn<N> = Arc::new(move |node: &N| to_value(get(node)));
        let write: WriteFn<N> = Arc::new(move |node: &mut N, value: Value| -> Result<(), String> {
            *get_mut(node) = value.try_into().map_err(|e: toml::de::Error| e.to_string())?;
            Ok(())
        });
        self.fields.push(Field {
            decl: decl.into(),
            kind: FieldKind::Value(ValueField {
                type_name: type_name::<V>(),
                read,
                write,
            }),
        });
        self
    }

    /// Declare an optional value field. `None` is never written to a document.
    pub fn optional<V>(
        mut self,
        decl: impl Into<Decl>,
        get: impl Fn(&N) -> &Option<V> + 'static,
        get_mut: impl Fn(&mut N) -> &mut Option<V> + 'static,
    ) -> Self
    where
        V: Serialize + DeserializeOwned + 'static,
    {
        let read: ReadFn<N> = Arc::new(move |node: &N| to_value(get(node)));
        let write: WriteFn<N> = Arc::new(move |node: &mut N, value: Value| -> Result<(), String> {
            let parsed: V = value.try_into().map_err(|e: toml::de::Error| e.to_string())?;
            *get_mut(node) = Some(parsed);
            Ok(())
        });
        self.fields.push(Field {
            decl: decl.into(),
            kind: FieldKind::Value(ValueField {
                type_name: type_name::<Option<V>>(),
                read,
                write,
            }),
        });
        self
    }

    /// Declare a nested node field.
    pub fn node<C: ConfigNode>(
        mut self,
        decl: impl Into<Decl>,
        get: impl Fn(&N) -> &C + 'static,
        get_mut: impl Fn(&mut N) -> &mut C + 'static,
    ) -> Self {
        let walk: WalkFn<N> = Arc::new(
            move |node: &N,
                  path: &str,
                  sink: &mut dyn FnMut(&str, Value),
                  strictness: Strictness| {
                crate::walk::walk(get(node), path, sink, strictness)
            },
        );
        let populate: PopulateFn<N> = Arc::new(
            move |node: &mut N,
                  doc: &dyn Document,
                  path: &str,
                  strictness: Strictness|
                  -> Result<(), BindError> {
                *get_mut(node) = crate::populate::populate::<C>(doc, path, strictness)?;
                Ok(())
            },
        );
        self.fields.push(Field {
            decl: decl.into(),
            kind: FieldKind::Node(NodeField {
                type_name: type_name::<C>(),
                walk,
                populate,
                resolve: crate::resolve::resolve_comments::<C>,
            }),
        });
        self
    }

    /// Embed a base node stored inside `N`. Its fields join `N`'s field list
    /// after `N`'s own fields, at the same path level.
    pub fn embed<B: ConfigNode>(
        mut self,
        get: impl Fn(&N) -> &B + 'static,
        get_mut: impl Fn(&mut N) -> &mut B + 'static,
    ) -> Self {
        let get: Getter<N, B> = Arc::new(get);
        let get_mut: GetterMut<N, B> = Arc::new(get_mut);
        let embed: EmbedFn<N> = Arc::new(move || -> Result<Vec<Field<N>>, BindError> {
            Ok(discover::<B>()?
                .into_iter()
                .map(|field| field.lift(Arc::clone(&get), Arc::clone(&get_mut)))
                .collect())
        });
        self.embedded.push(embed);
        self
    }

    /// Own fields followed by the fields of every embedded base.
    pub(crate) fn into_fields(self) -> Result<Vec<Field<N>>, BindError> {
        let mut fields = self.fields;
        for embed in &self.embedded {
            fields.extend(embed()?);
        }
        Ok(fields)
    }
}

impl<N: ConfigNode> Schema<N> {
    /// The declared schema of `N`.
    pub fn of() -> Self {
        N::schema(Self::new())
    }
}

impl<N: 'static> Default for Schema<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: 'static> Field<B> {
    /// Re-root a base node's field onto the node embedding it.
    fn lift<N: 'static>(self, get: Getter<N, B>, get_mut: GetterMut<N, B>) -> Field<N> {
        let kind = match self.kind {
            FieldKind::Value(v) => {
                let (read, write) = (v.read, v.write);
                let read: ReadFn<N> = Arc::new(move |node: &N| read(get(node)));
                let write: WriteFn<N> =
                    Arc::new(move |node: &mut N, value: Value| write(get_mut(node), value));
                FieldKind::Value(ValueField {
                    type_name: v.type_name,
                    read,
                    write,
                })
            }
            FieldKind::Node(n) => {
                let (walk, populate) = (n.walk, n.populate);
                let walk: WalkFn<N> = Arc::new(
                    move |node: &N,
                          path: &str,
                          sink: &mut dyn FnMut(&str, Value),
                          strictness: Strictness| {
                        walk(get(node), path, sink, strictness)
                    },
                );
                let populate: PopulateFn<N> = Arc::new(
                    move |node: &mut N,
                          doc: &dyn Document,
                          path: &str,
                          strictness: Strictness| {
                        populate(get_mut(node), doc, path, strictness)
                    },
                );
                FieldKind::Node(NodeField {
                    type_name: n.type_name,
                    walk,
                    populate,
                    resolve: n.resolve,
                })
            }
        };
        Field {
            decl: self.decl,
            kind,
        }
    }
}
