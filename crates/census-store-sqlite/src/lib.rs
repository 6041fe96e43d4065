//! SQLite backend for the Census person store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. [`ConnectionProvider`] owns the one
//! shared connection a process uses.

mod encode;
mod query;
mod schema;
mod store;

pub mod connection;
pub mod error;

pub use connection::{ConnectionProvider, DatabaseConfig};
pub use error::{Error, Result};
pub use store::SqliteStore;
