//! SQLite backend for the Dossier expert registry.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime.

mod encode;
mod schema;
mod search;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;
