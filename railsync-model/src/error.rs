//! Error types for the mapping layer.

use crate::id::RemoteId;
use thiserror::Error;

/// Result type for mapping operations.
pub type MappingResult<T> = Result<T, MappingError>;

/// Errors that can occur while declaring mappings, building envelopes, or
/// applying responses.
///
/// Declaration problems ([`InvalidPropertyName`](Self::InvalidPropertyName),
/// [`ConflictingRemoteKey`](Self::ConflictingRemoteKey),
/// [`KindMismatch`](Self::KindMismatch)) are programmer errors and surface on
/// the first serialization attempt rather than being silently swallowed.
#[derive(Debug, Error)]
pub enum MappingError {
    /// A property was declared with an empty or whitespace name.
    #[error("invalid property name {0:?}")]
    InvalidPropertyName(String),

    /// Two declarations produce the same outbound key with different kinds.
    #[error("remote key `{key}` is declared by both `{first}` and `{second}` with different kinds")]
    ConflictingRemoteKey {
        key: String,
        first: String,
        second: String,
    },

    /// A model encoded a property with a value shape that does not match its
    /// declared kind (e.g. a scalar for a has-many association).
    #[error("property `{property}` encoded as {got}, but its declaration expects {expected}")]
    KindMismatch {
        property: String,
        expected: &'static str,
        got: &'static str,
    },

    /// A response body did not have the expected JSON shape.
    #[error("malformed response: expected {0}")]
    MalformedResponse(&'static str),

    /// A response tried to rebind an object to a different remote row.
    #[error("response id {incoming} conflicts with already-assigned id {assigned}")]
    RemoteIdConflict {
        assigned: RemoteId,
        incoming: RemoteId,
    },

    /// A remote timestamp string could not be parsed.
    #[error("invalid timestamp {0:?}")]
    InvalidTimestamp(String),

    /// A remote value had the wrong type for the property decoding it.
    #[error("property `{property}`: expected {expected}")]
    UnexpectedValue {
        property: String,
        expected: &'static str,
    },
}
