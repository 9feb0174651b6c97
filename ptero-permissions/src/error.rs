//! Error types for permission resolution.

use thiserror::Error;

/// Errors raised while resolving permission input.
///
/// Both variants describe malformed local input and are raised before any
/// state is built, so a caller can always recover by correcting the input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionError {
    /// The input mixed flag names and numeric codes.
    #[error("Permissions must be all strings or all numbers.")]
    MixedTypes,

    /// The entry is neither a known flag name nor a known code.
    #[error("Unknown permission '{0}'.")]
    Unknown(String),
}

/// Result type for permission operations.
pub type PermissionResult<T> = Result<T, PermissionError>;
