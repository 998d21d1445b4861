//! Config operations: key lookup, listing, and result types.
//!
//! Provides the logic behind "show me this key" and "show me everything" for a
//! bound node, and the `ConfigResult` enum that callers use to display results.

use std::fmt;

use crate::error::BindError;
use crate::resolve::resolve_comments;
use crate::schema::ConfigNode;
use crate::types::Strictness;
use crate::walk::collect;

/// Result of a config operation. Returned to the caller for display.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigResult {
    /// A key's current value and its declared comments.
    KeyValue {
        key: String,
        value: String,
        doc: Vec<String>,
    },
    /// Every stored key-value pair, in walk order.
    Listing { entries: Vec<(String, String)> },
}

impl fmt::Display for ConfigResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigResult::KeyValue { key, value, doc } => {
                for line in doc {
                    writeln!(f, "# {line}")?;
                }
                write!(f, "{key} = {value}")
            }
            ConfigResult::Listing { entries } => {
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{key} = {value}")?;
                }
                Ok(())
            }
        }
    }
}

/// Get a node's value by dotted key, including its declared comments.
///
/// Unset optional fields and section paths are reported as
/// [`BindError::KeyNotFound`]: only keys the node would store can be read.
pub fn get_value<N: ConfigNode>(node: &N, key: &str) -> Result<ConfigResult, BindError> {
    lookup(node, key, Strictness::Strict)
}

/// List every value the node would store as dotted key-value pairs.
pub fn list_values<N: ConfigNode>(node: &N) -> Result<ConfigResult, BindError> {
    listing(node, Strictness::Strict)
}

pub(crate) fn lookup<N: ConfigNode>(
    node: &N,
    key: &str,
    strictness: Strictness,
) -> Result<ConfigResult, BindError> {
    let value = collect(node, "", strictness)?
        .into_iter()
        .find(|(path, _)| path == key)
        .map(|(_, value)| value)
        .ok_or_else(|| BindError::KeyNotFound(key.into()))?;

    Ok(ConfigResult::KeyValue {
        key: key.into(),
        value: format_value(&value),
        doc: resolve_comments::<N>(key),
    })
}

pub(crate) fn listing<N: ConfigNode>(
    node: &N,
    strictness: Strictness,
) -> Result<ConfigResult, BindError> {
    let entries = collect(node, "", strictness)?
        .into_iter()
        .map(|(key, value)| (key, format_value(&value)))
        .collect();
    Ok(ConfigResult::Listing { entries })
}

/// Format a TOML value for display.
fn format_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(d) => d.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => value.to_string(),
    }
}
