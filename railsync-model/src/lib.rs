//! Remote mapping layer for railsync.
//!
//! Defines the declarative contract between local model objects and their
//! remote JSON representation on a Rails-style REST backend:
//! - [`Mapping`] / [`Property`] — per-type declarations of which properties
//!   synchronize, under which remote key, and with which association policy
//! - [`RemoteModel`] — the trait a synchronized type implements (names,
//!   mapping, id accessors, encode/decode hooks)
//! - [`Envelope`] — the outgoing nested-attributes payload built per write
//! - [`apply`] / [`merge_many`] / [`merge_one`] — applying a response body
//!   back onto the in-memory object graph
//! - [`ValidationErrors`] — keyed validation failures translated from remote
//!   attribute names to local property names
//!
//! Everything here is pure data shaping: no I/O, no retries, no locking. The
//! HTTP side lives in `railsync-client`.

mod envelope;
mod error;
mod errors;
mod id;
pub mod inflect;
mod mapping;
mod remote;

pub use envelope::{apply, decode, envelope, merge_many, merge_one, Encoded, Envelope, NestedRecord};
pub use error::{MappingError, MappingResult};
pub use errors::ValidationErrors;
pub use id::RemoteId;
pub use mapping::{Mapping, NestingPolicy, Property, PropertyKind, TypeHint};
pub use remote::RemoteModel;
