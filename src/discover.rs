//! Field discovery: the ordered list of a node type's bindable fields.
//!
//! A node's own fields come first, in declaration order, followed by the
//! fields of each embedded base section in declaration order. Discovery is a
//! pure function of the type's [`Schema`](crate::Schema), so repeated calls
//! yield the same order.

use std::any::type_name;
use std::collections::HashSet;

use crate::error::BindError;
use crate::schema::{ConfigNode, Field, Schema};

/// Discover the bindable fields of `N`, including embedded base fields.
///
/// Fails with a schema error if a segment is empty or contains `.`, or if
/// two fields of `N` share a segment. A node with no fields yields an empty
/// list.
pub fn discover<N: ConfigNode>() -> Result<Vec<Field<N>>, BindError> {
    let fields = Schema::<N>::of().into_fields()?;
    check_segments(&fields, type_name::<N>())?;
    Ok(fields)
}

fn check_segments<N>(fields: &[Field<N>], type_name: &'static str) -> Result<(), BindError> {
    let mut seen = HashSet::new();
    for field in fields {
        let segment = field.segment();
        if segment.is_empty() || segment.contains('.') {
            return Err(BindError::InvalidSegment {
                type_name,
                field: field.name(),
                segment: segment.to_string(),
            });
        }
        if !seen.insert(segment) {
            return Err(BindError::DuplicateSegment {
                type_name,
                segment: segment.to_string(),
            });
        }
    }
    Ok(())
}
