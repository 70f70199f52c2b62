//! Error types for typeahead engine operations.

use formkit_model::ModelError;
use thiserror::Error;

use crate::selection::SelectionKind;

/// Errors from engine mutations.
///
/// Every mutation is all-or-nothing: when one of these is returned, the
/// engine state is exactly what it was before the call.
#[derive(Debug, Error)]
pub enum TypeaheadError {
    /// The replacement option list is malformed; the old catalog stays.
    #[error("invalid catalog: {0}")]
    InvalidCatalog(#[from] ModelError),

    /// The referenced value is not in the current catalog.
    #[error("unknown option: {value}")]
    UnknownOption { value: String },

    /// A bulk tag assignment is not a proper set of strings.
    #[error("invalid selection: {reason}")]
    InvalidSelection { reason: String },

    /// The operation does not exist for this selection mode.
    #[error("{operation} is not supported in {mode} mode")]
    UnsupportedOperation {
        operation: &'static str,
        mode: SelectionKind,
    },

    /// An inbound attribute could not be translated into a command.
    #[error("invalid attribute '{name}': {reason}")]
    InvalidAttribute { name: String, reason: String },
}

impl TypeaheadError {
    pub(crate) fn unknown(value: impl Into<String>) -> Self {
        Self::UnknownOption {
            value: value.into(),
        }
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, TypeaheadError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            TypeaheadError::unknown("zzz").to_string(),
            "unknown option: zzz"
        );
        let err = TypeaheadError::UnsupportedOperation {
            operation: "add_tag",
            mode: SelectionKind::Single,
        };
        assert_eq!(err.to_string(), "add_tag is not supported in single mode");
    }

    #[test]
    fn test_error_from_model() {
        let model = ModelError::InvalidCatalog {
            index: 0,
            reason: "value must not be empty".to_string(),
        };
        let err: TypeaheadError = model.into();
        assert!(matches!(err, TypeaheadError::InvalidCatalog(_)));
    }
}
