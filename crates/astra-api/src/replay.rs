//! `GET /replay` — reconstruct a reading from a share-link query string.
//!
//! The whole query string is handed to the deep-link codec verbatim; axum's
//! typed `Query` extractor is deliberately bypassed so the codec alone owns
//! the wire format.

use astra_core::{
  oracle::Oracle, reading::ReadingKind, replay::ReadingRequest,
  sign::ReadingSubjects, store::ProfileStore,
};
use axum::{
  Json,
  extract::{RawQuery, State},
};

use crate::{
  AppState,
  error::ApiError,
  readings::{ReadingResponse, run},
};

/// `GET /replay?s=Leo&seed=42&…`
///
/// An unknown sign code is a 404 — the shared content cannot exist — and is
/// rejected before any oracle call. A malformed seed is a 400; silently
/// re-deriving would break reproducibility.
pub async fn replay<S, O>(
  State(state): State<AppState<S, O>>,
  RawQuery(query): RawQuery,
) -> Result<Json<ReadingResponse>, ApiError>
where
  S: ProfileStore,
  O: Oracle,
{
  let query = query.unwrap_or_default();
  let link = astra_link::decode(&query).map_err(|e| match e {
    astra_link::Error::UnknownSubject(code) => {
      ApiError::NotFound(format!("unknown sign {code:?}"))
    }
    other => ApiError::BadRequest(other.to_string()),
  })?;

  // Links carry no explicit kind; subject arity determines it. Single-subject
  // links were minted from the fortune surface, pairs from the match surface.
  let kind = match link.subjects {
    ReadingSubjects::Single(_) => ReadingKind::Fortune,
    ReadingSubjects::Pair(..) => ReadingKind::Match,
  };

  run(
    &state,
    ReadingRequest {
      kind,
      subjects: link.subjects,
      context: link.context,
      seed: link.seed,
    },
  )
  .await
}
