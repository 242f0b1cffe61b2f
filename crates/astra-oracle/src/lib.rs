//! Gemini-backed implementation of [`astra_core::oracle::Oracle`].
//!
//! The oracle is a single-exchange HTTP collaborator: one prompt, an optional
//! response schema, an optional seed, one structured payload back. No retry
//! policy lives here — a failed exchange surfaces as an error and the caller
//! decides.
//!
//! Reproducibility caveat: we pass the seed through on every call, but
//! whether the hosted model honours it across versions is an assumption the
//! service cannot verify. See `DESIGN.md`.

pub mod client;
pub mod error;
pub mod prompt;
pub mod schema;

pub use client::{GeminiOracle, OracleConfig};
pub use error::{Error, Result};
