//! Bind trees of typed config nodes to hierarchical, dotted-path TOML
//! documents, with per-field comments.
//!
//! A config node is a plain struct that declares which of its fields take
//! part in binding. The binder walks that declaration to write a node tree
//! into a document, to build a node tree back out of one, and to answer
//! "what comments belong to this path?" for renderers that annotate keys.
//!
//! ```ignore
//! #[derive(Default)]
//! struct ServerSection {
//!     max_players: i64,
//!     port: u16,
//! }
//!
//! impl ConfigNode for ServerSection {
//!     fn schema(schema: Schema<Self>) -> Schema<Self> {
//!         schema
//!             .value(
//!                 Decl::new("max_players")
//!                     .segment("maxPlayers")
//!                     .comments(["Max players", "Default: 20"]),
//!                 |s| &s.max_players,
//!                 |s| &mut s.max_players,
//!             )
//!             .value("port", |s| &s.port, |s| &mut s.port)
//!     }
//! }
//!
//! let server: ServerSection = Binder::builder().section("game").load(&doc)?;
//! ```
//!
//! # Declaring a node
//!
//! [`ConfigNode::schema`] lists the bindable fields of a type, in order. Each
//! field is one of:
//!
//! - **a value** ([`Schema::value`], [`Schema::optional`]): anything that
//!   round-trips through serde into a [`toml::Value`]. Strings, numbers,
//!   booleans, enums, and lists all work. An `Option` that is `None` is
//!   simply not written.
//! - **a nested node** ([`Schema::node`]): another `ConfigNode`, bound one
//!   path segment deeper.
//! - **an embedded base** ([`Schema::embed`]): a `ConfigNode` whose fields
//!   are bound as if they were declared on the embedding node, after its own
//!   fields. This is how a family of nodes shares common settings.
//!
//! Every field carries a [`Decl`]: its name, an optional path segment
//! overriding that name, and zero or more comment lines. Undeclared struct
//! fields are invisible to the binder.
//!
//! # Paths
//!
//! A node stored under prefix `P` writes field segment `s` at `P.s`, or at
//! `s` when `P` is empty. Nested nodes extend the prefix with their own
//! segment, so a tree maps onto TOML sections:
//!
//! ```text
//! name = "survival"          # ServerConfig.name
//!
//! [server]                   # ServerConfig.server
//! maxPlayers = 40            # ServerSection.max_players, segment "maxPlayers"
//! ```
//!
//! Segments must be non-empty, must not contain `.`, and must be unique
//! within one node (embedded fields included). Violations are schema errors,
//! reported on first use of the type.
//!
//! # Loading and storing
//!
//! [`store`] writes every present value of a tree through the [`Document`]
//! trait. [`populate`] creates a node with [`ConfigNode::construct`] and
//! fills in every value found in the document; nested nodes are always
//! created, even when the document has nothing for them. Values missing from
//! the document keep what the constructor gave them.
//!
//! `Document` is implemented for [`toml::Table`] and
//! [`toml_edit::DocumentMut`]. The latter keeps existing comments and
//! formatting, which is what [`save_file`] relies on to patch user files in
//! place.
//!
//! # Strictness
//!
//! Strict mode is **on by default**: a value that cannot be converted (a
//! string where an integer is declared, a `u64` too large for TOML) fails
//! the whole operation with the offending path. Lenient mode logs a warning
//! and skips the field instead. Schema errors and construction failures are
//! always fatal. See [`BinderBuilder::strict`].
//!
//! # Comments
//!
//! [`resolve_comments`] maps a full dotted path to the comment lines of the
//! field it names, following segments (not field names) through nested
//! nodes. [`SchemaComments`] wraps this as a [`CommentsProvider`] for a node
//! bound below a section; [`render`] and [`save_file`] use it to emit each
//! comment block above its key or section header.
//!
//! # Logging
//!
//! The crate logs through the [`log`] facade: skipped fields at `warn`,
//! fallback decisions at `debug`, and per-path traversal at `trace`. Install
//! any `log` backend to see them.
//!
//! # Error handling
//!
//! All fallible operations return [`BindError`].
//! [`is_schema_error`](BindError::is_schema_error) separates mistakes in a
//! node's declaration from problems with a particular document.

pub mod error;
pub mod types;

mod builder;
mod discover;
mod document;
mod ops;
mod path;
mod persist;
mod populate;
mod resolve;
mod schema;
mod walk;

#[cfg(test)]
mod fixtures;

pub use builder::{Binder, BinderBuilder};
pub use discover::discover;
pub use document::{Document, table_get};
pub use error::BindError;
pub use ops::{ConfigResult, get_value, list_values};
pub use persist::{annotate, generate_template, load_file, render, save_file, store_annotated};
pub use populate::{load_as_root, load_section, populate};
pub use resolve::{CommentsProvider, SchemaComments, resolve_comments};
pub use schema::{ConfigNode, Decl, Field, FieldKind, NodeField, Schema, ValueField};
pub use types::Strictness;
pub use walk::{collect, store, store_at_root, walk};
