//! The server-assigned row identifier.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier correlating a local object with its persisted remote row.
///
/// Carried as `Option<RemoteId>` on every synchronized object; `None` means
/// "not yet persisted remotely". [`apply`](crate::apply) populates it exactly
/// once from a create response and refuses to rebind it to a different row;
/// a destroy clears it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RemoteId(i64);

impl RemoteId {
    /// Wraps a raw id as received from the server.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Returns the raw id.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl From<i64> for RemoteId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RemoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
