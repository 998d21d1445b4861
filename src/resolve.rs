//! Path resolution: from a dotted path back to the field that produced it.
//!
//! Used by document writers to annotate keys with the comment lines declared
//! on their fields. Paths are matched segment by segment against each node's
//! discovered fields (embedded base fields included), always by logical
//! segment. Every non-terminal segment must name a nested node field.
//!
//! A path that matches nothing is normal: resolution returns an empty list
//! instead of an error.

use std::marker::PhantomData;

use crate::discover::discover;
use crate::path::strip_section;
use crate::schema::{ConfigNode, FieldKind};

/// Comment lines declared for the field at `path` in `N`, or empty if the
/// path does not resolve.
pub fn resolve_comments<N: ConfigNode>(path: &str) -> Vec<String> {
    let fields = match discover::<N>() {
        Ok(fields) => fields,
        Err(e) => {
            log::debug!("Cannot resolve `{path}`: {e}");
            return Vec::new();
        }
    };

    match path.split_once('.') {
        None => fields
            .iter()
            .find(|f| f.segment() == path)
            .map(|f| f.comments().to_vec())
            .unwrap_or_default(),
        Some((head, rest)) => match fields.iter().find(|f| f.segment() == head) {
            Some(field) => match field.kind() {
                FieldKind::Node(nested) => nested.resolve_comments(rest),
                FieldKind::Value(_) => {
                    log::trace!("`{head}` is a value, not a section; `{path}` has no comments");
                    Vec::new()
                }
            },
            None => Vec::new(),
        },
    }
}

/// Something that can supply comment lines for a document path.
pub trait CommentsProvider {
    fn comments(&self, path: &str) -> Vec<String>;
}

impl<F> CommentsProvider for F
where
    F: Fn(&str) -> Vec<String>,
{
    fn comments(&self, path: &str) -> Vec<String> {
        self(path)
    }
}

/// Comments declared by the schema of `N`, optionally for a node stored below
/// a section of the document.
#[derive(Debug, Clone)]
pub struct SchemaComments<N> {
    section: String,
    _phantom: PhantomData<fn() -> N>,
}

impl<N: ConfigNode> SchemaComments<N> {
    /// Comments for a node stored at the document root.
    pub fn new() -> Self {
        Self::under("")
    }

    /// Comments for a node stored below `section`. Paths outside the section
    /// have no comments.
    pub fn under(section: &str) -> Self {
        Self {
            section: section.to_string(),
            _phantom: PhantomData,
        }
    }
}

impl<N: ConfigNode> Default for SchemaComments<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: ConfigNode> CommentsProvider for SchemaComments<N> {
    fn comments(&self, path: &str) -> Vec<String> {
        match strip_section(&self.section, path) {
            Some(relative) => resolve_comments::<N>(relative),
            None => Vec::new(),
        }
    }
}
