//! Error types for Orion Publish identities.

use thiserror::Error;

/// A value was rejected by a validating constructor.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty (or only whitespace).
    #[error("{field} must not be empty")]
    Empty {
        /// Name of the offending field.
        field: &'static str,
    },

    /// A document path was not a relative, normalized vault path.
    #[error("invalid document path {path:?}: {reason}")]
    InvalidPath {
        /// The path as given.
        path: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}
