//! Asynchronous REST client for railsync remote models.
//!
//! One [`RemoteClient`] serves a whole application: it holds an explicit
//! [`ClientConfig`] (base URL, credentials, update method — no hidden global
//! state) and performs the standard CRUD operations against Rails resource
//! routes, delegating all payload shaping to `railsync-model`.
//!
//! # Operation contract
//!
//! Every operation resolves exactly once, with a populated result or a
//! [`RemoteError`], never both. The client classifies failures and never
//! retries — backoff policy belongs to the caller.
//!
//! # Concurrency
//!
//! The client is cheap to clone and safe to share across tasks. Operations on
//! the *same* object are not coordinated: if two requests for one object are
//! in flight, the last response applied wins on the in-memory fields. This is
//! a known race the library does not resolve.
//!
//! # Example
//!
//! ```no_run
//! use railsync_client::{ClientConfig, RemoteClient};
//!
//! let client = RemoteClient::new(ClientConfig::new("http://localhost:3000"));
//! ```

mod client;
mod config;
mod error;
mod route;

pub use client::RemoteClient;
pub use config::{ClientConfig, UpdateMethod};
pub use error::{RemoteError, RemoteResult};
pub use route::Route;
