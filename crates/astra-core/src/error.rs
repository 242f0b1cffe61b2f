//! Error types for `astra-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("unknown zodiac sign: {0:?}")]
  UnknownSign(String),

  #[error("invalid flow transition: {event} while {state}")]
  InvalidTransition {
    state: &'static str,
    event: &'static str,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
