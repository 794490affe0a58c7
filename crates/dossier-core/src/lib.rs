//! Core types and trait definitions for the Dossier expert registry.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! Every other crate in the workspace depends on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod date;
pub mod error;
pub mod expert;
pub mod export;
pub mod profile;
pub mod records;
pub mod search;
pub mod store;
pub mod validate;

pub use error::{Error, ErrorKind, Result};
