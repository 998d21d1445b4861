//! Store direction: walk a node tree and emit `(path, value)` pairs.
//!
//! Value fields are read and handed to the sink under their full dotted path.
//! Unset values (`Option::None`) are skipped. Nested node fields are walked
//! recursively with their own path as the new prefix, so a field `c` of a
//! node stored at `b` is emitted as `"b.c"`.

use toml::Value;

use crate::discover::discover;
use crate::document::Document;
use crate::error::BindError;
use crate::path::dotted;
use crate::schema::{ConfigNode, FieldKind};
use crate::types::Strictness;

/// Walk `node` depth-first, calling `sink` for every set value field.
pub fn walk<N: ConfigNode>(
    node: &N,
    prefix: &str,
    sink: &mut dyn FnMut(&str, Value),
    strictness: Strictness,
) -> Result<(), BindError> {
    for field in discover::<N>()? {
        let path = dotted(prefix, field.segment());
        match field.kind() {
            FieldKind::Value(value) => match value.read(node) {
                Ok(Some(v)) => sink(&path, v),
                Ok(None) => log::trace!("`{path}` is unset, not storing it"),
                Err(reason) => strictness.absorb(BindError::Unrepresentable { path, reason })?,
            },
            FieldKind::Node(nested) => {
                log::trace!("Walking nested node `{path}` ({})", field.type_name());
                nested.walk(node, &path, sink, strictness)?;
            }
        }
    }
    Ok(())
}

/// Store `node` into `doc` below `section` (empty for the document root).
pub fn store<N: ConfigNode>(
    node: &N,
    doc: &mut dyn Document,
    section: &str,
    strictness: Strictness,
) -> Result<(), BindError> {
    walk(node, section, &mut |path: &str, value: Value| doc.set(path, value), strictness)
}

/// Store `node` at the root of `doc`.
pub fn store_at_root<N: ConfigNode>(node: &N, doc: &mut dyn Document) -> Result<(), BindError> {
    store(node, doc, "", Strictness::Strict)
}

/// Collect every `(path, value)` pair `node` would store, in walk order.
pub fn collect<N: ConfigNode>(
    node: &N,
    prefix: &str,
    strictness: Strictness,
) -> Result<Vec<(String, Value)>, BindError> {
    let mut pairs = Vec::new();
    walk(
        node,
        prefix,
        &mut |path: &str, value: Value| pairs.push((path.to_string(), value)),
        strictness,
    )?;
    Ok(pairs)
}
