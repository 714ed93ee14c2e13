//! Content schema for the Blogicum publishing application.
//!
//! - `domain`: posts, categories, locations, comments and the repository
//!   ports that persist them.
//! - `outbound`: PostgreSQL (Diesel) and in-memory implementations of those
//!   ports.
//! - `config`: database settings.

pub mod config;
pub mod domain;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
