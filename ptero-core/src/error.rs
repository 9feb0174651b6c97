//! Error types for the entity engine.
//!
//! Two families exist. [`TransportError`] is produced by the transport
//! collaborator and passed through untouched. [`Error`] is what every engine
//! operation returns; its `Validation` variant is raised before any network
//! call is attempted.
//!
//! A cache miss or a failed resolution is not an error: those paths return
//! `Option`.

use thiserror::Error;

/// Errors raised by a transport while talking to the panel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// The request could not be sent or no response arrived.
    #[error("HTTP request failed: {0}")]
    Request(String),

    /// The API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error body returned by the API.
        message: String,
    },

    /// The API key was rejected.
    #[error("Authentication failed")]
    AuthenticationFailed,

    /// The requested path does not exist on the panel.
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// The response body was not valid JSON.
    #[error("Invalid API response: {0}")]
    InvalidResponse(String),
}

impl TransportError {
    /// Check if repeating the request could succeed.
    ///
    /// Network failures, rate limiting and server-side errors are
    /// transient; everything else is a property of the request itself.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Request(_) => true,
            TransportError::Api { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Get the HTTP status associated with the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            TransportError::Api { status, .. } => Some(*status),
            TransportError::AuthenticationFailed => Some(401),
            TransportError::NotFound(_) => Some(404),
            _ => None,
        }
    }
}

/// Errors returned by engine operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Local input was rejected before any network call.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// The transport failed; the error is passed through unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The payload could not be mapped onto the entity type.
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),
}

impl Error {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation(message.into())
    }

    /// Check if this is a local validation failure.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_classification() {
        assert!(TransportError::Request("timeout".into()).is_transient());
        assert!(TransportError::Api { status: 502, message: String::new() }.is_transient());
        assert!(TransportError::Api { status: 429, message: String::new() }.is_transient());
        assert!(!TransportError::Api { status: 422, message: String::new() }.is_transient());
        assert!(!TransportError::AuthenticationFailed.is_transient());
        assert!(!TransportError::NotFound("/locations/9".into()).is_transient());
    }

    #[test]
    fn test_transport_error_is_transparent() {
        let err: Error = TransportError::NotFound("/locations/9".into()).into();
        assert_eq!(err.to_string(), "Resource not found: /locations/9");
        assert!(!err.is_validation());
    }
}
