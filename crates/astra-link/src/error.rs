//! Error type for `astra-link`.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
  /// No subject key (`s`, or `s1`+`s2`) present in the query string.
  #[error("deep link carries no subject")]
  MissingSubject,

  /// A subject code that matches no known sign. Surfaced to the user as
  /// "content not found"; reconstruction is aborted before any oracle call.
  #[error("unknown subject: {0:?}")]
  UnknownSubject(String),

  /// A `seed` key was present but not a base-10 integer. This is an error
  /// rather than a fallback: silently re-deriving would break the
  /// reproducibility the link promises.
  #[error("malformed seed: {0:?}")]
  InvalidSeed(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
