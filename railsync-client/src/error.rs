//! Error types for remote operations.

use railsync_model::{MappingError, ValidationErrors};
use thiserror::Error;

/// Result type for remote operations.
pub type RemoteResult<T> = Result<T, RemoteError>;

/// Errors surfaced by a remote operation. Exactly one is produced per failed
/// operation; the client never retries.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// The server rejected a create/update with per-attribute reasons (422).
    /// Recoverable — typically re-presented to the user.
    #[error("validation failed: {0}")]
    Validation(ValidationErrors),

    /// Transport failure: unreachable host, timeout, connection reset. Not
    /// attributable to any field.
    #[error("could not reach server: {0}")]
    Connectivity(String),

    /// A non-2xx, non-422 status.
    #[error("server returned {status}: {body}")]
    Http { status: u16, body: String },

    /// The operation needs a persisted object but its remote id is unset.
    #[error("object has no remote id")]
    MissingRemoteId,

    /// A mapping-layer failure (declaration error, malformed response body,
    /// id conflict).
    #[error(transparent)]
    Mapping(#[from] MappingError),

    /// The response body was not valid JSON.
    #[error("unparsable response body: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl RemoteError {
    /// The translated validation errors, when this is a validation failure.
    #[must_use]
    pub fn validation(&self) -> Option<&ValidationErrors> {
        match self {
            RemoteError::Validation(errors) => Some(errors),
            _ => None,
        }
    }

    /// One user-presentable line: aggregated field reasons for validation
    /// failures, a generic unreachable-server message for connectivity
    /// failures.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            RemoteError::Validation(errors) => errors.to_string(),
            RemoteError::Connectivity(_) => "could not reach the server".to_string(),
            other => other.to_string(),
        }
    }
}
