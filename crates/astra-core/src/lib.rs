//! Core types and trait definitions for the Astra reading service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod companion;
pub mod error;
pub mod flow;
pub mod history;
pub mod oracle;
pub mod profile;
pub mod reading;
pub mod replay;
pub mod seed;
pub mod sign;
pub mod store;

pub use error::{Error, Result};
pub use seed::{Seed, derive_seed};
