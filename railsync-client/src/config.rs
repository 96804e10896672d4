//! Client configuration.

use serde::{Deserialize, Serialize};

/// HTTP method used for update operations.
///
/// Rails applications vary: classic apps take `PUT`, newer ones `PATCH`.
/// `replace` always uses `PUT` regardless of this setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateMethod {
    Put,
    Patch,
}

/// Configuration for a [`RemoteClient`](crate::RemoteClient).
///
/// An explicit value passed at construction — there is no process-wide
/// default config. Clone it to derive variants for a second server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Root URL of the app, e.g. `http://localhost:3000`.
    pub base_url: String,
    /// Username for HTTP basic authentication, if the server uses it.
    pub username: Option<String>,
    /// Password for HTTP basic authentication.
    pub password: Option<String>,
    /// Bearer token, if the server uses token authentication instead.
    pub bearer_token: Option<String>,
    /// Additional headers sent with every request.
    pub extra_headers: Vec<(String, String)>,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
    /// HTTP method for `update` operations.
    pub update_method: UpdateMethod,
}

impl Default for ClientConfig {
    /// Local development server, 60s timeout, `PUT` updates, no credentials.
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3000".to_string(),
            username: None,
            password: None,
            bearer_token: None,
            extra_headers: Vec::new(),
            timeout_secs: 60,
            update_method: UpdateMethod::Put,
        }
    }
}

impl ClientConfig {
    /// Creates a config for the given base URL with default settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }
}
