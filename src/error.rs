use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BindError {
    #[error("Failed to construct config node {type_name}: {source}")]
    Construct {
        type_name: &'static str,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Duplicate segment '{segment}' in config node {type_name}")]
    DuplicateSegment {
        type_name: &'static str,
        segment: String,
    },

    #[error("Invalid segment '{segment}' for field '{field}' in config node {type_name}")]
    InvalidSegment {
        type_name: &'static str,
        field: &'static str,
        segment: String,
    },

    #[error("Invalid value at '{path}' (expected {expected}): {reason}")]
    InvalidValue {
        path: String,
        expected: &'static str,
        reason: String,
    },

    #[error("Cannot store value at '{path}': {reason}")]
    Unrepresentable { path: String, reason: String },

    #[error("Key not found: {0}")]
    KeyNotFound(String),

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml_edit::TomlError,
    },

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

impl BindError {
    /// Whether this error points at a defect in a schema declaration rather
    /// than at the document being bound.
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            BindError::Construct { .. }
                | BindError::DuplicateSegment { .. }
                | BindError::InvalidSegment { .. }
        )
    }
}
