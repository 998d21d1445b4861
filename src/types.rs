use crate::error::BindError;

/// How field access errors are treated while loading or storing.
///
/// Only [`BindError::InvalidValue`] and [`BindError::Unrepresentable`] are
/// affected. Schema errors (failed construction, bad or duplicate segments)
/// always abort the operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Any field that cannot be read or written aborts the whole operation.
    #[default]
    Strict,
    /// Fields that cannot be read or written are logged and skipped, leaving
    /// the rest of the tree bound.
    Lenient,
}

impl Strictness {
    /// Apply this policy to a field access error.
    pub(crate) fn absorb(self, err: BindError) -> Result<(), BindError> {
        match self {
            Strictness::Strict => Err(err),
            Strictness::Lenient => {
                log::warn!("{err}; skipping field");
                Ok(())
            }
        }
    }
}
