use std::marker::PhantomData;
use std::path::Path;

use toml_edit::DocumentMut;

use crate::document::Document;
use crate::error::BindError;
use crate::ops::{self, ConfigResult};
use crate::persist;
use crate::populate::populate;
use crate::resolve::{CommentsProvider, SchemaComments};
use crate::schema::ConfigNode;
use crate::types::Strictness;
use crate::walk::store;

/// Entry point for binding a node type to documents.
pub struct Binder;

impl Binder {
    pub fn builder<N: ConfigNode>() -> BinderBuilder<N> {
        BinderBuilder::new()
    }
}

/// Builder for loading and storing a node tree.
///
/// Controls two orthogonal settings:
///
/// - **Section**: [`section()`](Self::section) is the dotted path the root
///   node is bound under. Empty (the default) means the document root.
/// - **Strictness**: [`strict()`](Self::strict) decides whether a field that
///   cannot be converted aborts the operation or is logged and skipped.
pub struct BinderBuilder<N: ConfigNode> {
    section: String,
    strictness: Strictness,
    _phantom: PhantomData<fn() -> N>,
}

impl<N: ConfigNode> BinderBuilder<N> {
    fn new() -> Self {
        Self {
            section: String::new(),
            strictness: Strictness::default(),
            _phantom: PhantomData,
        }
    }

    /// Bind the root node below this dotted section path.
    pub fn section(mut self, section: &str) -> Self {
        self.section = section.to_string();
        self
    }

    /// Enable or disable strict mode (default: `true`).
    /// In lenient mode, fields whose values cannot be converted are skipped.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strictness = if strict {
            Strictness::Strict
        } else {
            Strictness::Lenient
        };
        self
    }

    /// Shorthand for `.strict(false)`.
    pub fn lenient(self) -> Self {
        self.strict(false)
    }

    /// Build an `N` from the document.
    pub fn load(&self, doc: &dyn Document) -> Result<N, BindError> {
        populate(doc, &self.section, self.strictness)
    }

    /// Write every value of `node` into the document.
    pub fn store(&self, node: &N, doc: &mut dyn Document) -> Result<(), BindError> {
        store(node, doc, &self.section, self.strictness)
    }

    /// Comment lines declared for a full document path.
    pub fn comments(&self, path: &str) -> Vec<String> {
        self.comments_provider().comments(path)
    }

    /// A [`CommentsProvider`] scoped to this builder's section.
    pub fn comments_provider(&self) -> SchemaComments<N> {
        SchemaComments::under(&self.section)
    }

    /// Render `node` as a commented TOML document, below the section.
    pub fn render(&self, node: &N) -> Result<String, BindError> {
        let mut doc = DocumentMut::new();
        persist::store_annotated(
            node,
            &mut doc,
            &self.section,
            &self.comments_provider(),
            self.strictness,
        )?;
        Ok(doc.to_string())
    }

    /// Load `N` from a TOML file. A missing file yields a fresh node.
    pub fn load_file(&self, path: &Path) -> Result<N, BindError> {
        persist::read_file(path, &self.section, self.strictness)
    }

    /// Store `node` into a TOML file, preserving content the node does not own.
    pub fn save_file(&self, node: &N, path: &Path) -> Result<(), BindError> {
        persist::write_file(node, path, &self.section, self.strictness)
    }

    /// Look up one stored value along with its comments. Keys are relative
    /// to the node, not to the section. In lenient mode, unrepresentable
    /// values are skipped and report as not found.
    pub fn get(&self, node: &N, key: &str) -> Result<ConfigResult, BindError> {
        ops::lookup(node, key, self.strictness)
    }

    /// List every stored value, skipping unrepresentable ones when lenient.
    pub fn list(&self, node: &N) -> Result<ConfigResult, BindError> {
        ops::listing(node, self.strictness)
    }
}
