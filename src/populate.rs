//! Load direction: build a node tree from a document.
//!
//! Every node is created through [`ConfigNode::construct`] and then filled
//! field by field. Nested nodes are always materialized, even when the
//! document has nothing below their path, so callers never need a presence
//! check. Value fields whose path is absent from the document keep the value
//! the node was constructed with.

use std::any::type_name;

use crate::discover::discover;
use crate::document::Document;
use crate::error::BindError;
use crate::path::dotted;
use crate::schema::{ConfigNode, FieldKind};
use crate::types::Strictness;

/// Construct an `N` and populate it from `doc` below `prefix`.
pub fn populate<N: ConfigNode>(
    doc: &dyn Document,
    prefix: &str,
    strictness: Strictness,
) -> Result<N, BindError> {
    let mut node = construct::<N>()?;

    for field in discover::<N>()? {
        let path = dotted(prefix, field.segment());
        match field.kind() {
            FieldKind::Node(nested) => {
                log::trace!("Populating nested node `{path}` ({})", field.type_name());
                nested.populate(&mut node, doc, &path, strictness)?;
            }
            FieldKind::Value(value) => {
                let Some(v) = doc.get(&path) else {
                    log::trace!("`{path}` is absent, keeping default");
                    continue;
                };
                if let Err(reason) = value.write(&mut node, v) {
                    strictness.absorb(BindError::InvalidValue {
                        path,
                        expected: field.type_name(),
                        reason,
                    })?;
                }
            }
        }
    }

    Ok(node)
}

/// Create an empty `N`, surfacing construction failure as a schema error.
pub(crate) fn construct<N: ConfigNode>() -> Result<N, BindError> {
    N::construct().map_err(|source| BindError::Construct {
        type_name: type_name::<N>(),
        source,
    })
}

/// Load an `N` from the section of `doc` at `prefix`.
pub fn load_section<N: ConfigNode>(doc: &dyn Document, prefix: &str) -> Result<N, BindError> {
    populate(doc, prefix, Strictness::Strict)
}

/// Load an `N` from the root of `doc`.
pub fn load_as_root<N: ConfigNode>(doc: &dyn Document) -> Result<N, BindError> {
    populate(doc, "", Strictness::Strict)
}
