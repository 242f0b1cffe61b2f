//! SQLite implementation of [`astra_core::store::ProfileStore`].
//!
//! One file holds both the profile documents and the capped history log.

mod encode;
pub mod error;
mod schema;
mod store;


pub use error::{Error, Result};
pub use store::SqliteStore;
