//! Error type for `astra-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// A stored column failed to decode back into its domain type.
  #[error("stored value could not be decoded: {0}")]
  Decode(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
