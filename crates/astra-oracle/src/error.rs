//! Error type for `astra-oracle`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("generation API returned {status}: {body}")]
  Api {
    status: reqwest::StatusCode,
    body: String,
  },

  /// The API answered 200 but with no candidate text to parse.
  #[error("generation API returned an empty response")]
  EmptyResponse,

  #[error("malformed generation payload: {0}")]
  Payload(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
