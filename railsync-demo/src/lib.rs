//! Model definitions for the railsync demo board.
//!
//! Two small domains, matching the reference server:
//! - [`Post`] has many [`Response`]s (message board with embedded replies)
//! - [`Person`] has one [`Brain`] which has many [`Thought`]s
//!   (deep nested-attribute persistence, including nested destroys)

mod models;

pub use models::{Brain, Person, Post, Response, Thought};
