//! Handlers for the reading endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/fortune` | Body: `{"sign":"Leo","name":…,"birthDate":…}` |
//! | `POST` | `/match` | Body: `{"first":"Leo","second":"Aries",…}` |
//! | `POST` | `/mystery` | Body: `{"sign":"Leo",…}` |
//!
//! Every response carries the seed actually used, so the client can mint a
//! share link from it, plus a result fingerprint for replay verification.

use astra_core::{
  oracle::Oracle,
  profile::{Gender, SubjectContext},
  reading::ReadingKind,
  replay::{CompletedReading, ReadingRequest, fetch_reproducible},
  seed::Seed,
  sign::{ReadingSubjects, ZodiacSign},
  store::ProfileStore,
};
use axum::{Json, extract::State};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, fingerprint::fingerprint};

// ─── Shared body pieces ──────────────────────────────────────────────────────

/// The context fields every reading body may carry.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContextBody {
  #[serde(default)]
  pub name: String,
  pub birth_date: Option<NaiveDate>,
  #[serde(default)]
  pub gender: Gender,
}

impl ContextBody {
  pub fn into_context(self) -> SubjectContext {
    SubjectContext {
      display_name: self.name,
      birth_date: self.birth_date,
      gender: self.gender,
    }
  }
}

#[derive(Debug, Deserialize)]
pub struct SingleBody {
  pub sign: ZodiacSign,
  pub seed: Option<Seed>,
  #[serde(flatten)]
  pub context: ContextBody,
}

#[derive(Debug, Deserialize)]
pub struct PairBody {
  pub first: ZodiacSign,
  pub second: ZodiacSign,
  pub seed: Option<Seed>,
  #[serde(flatten)]
  pub context: ContextBody,
}

/// A completed reading plus its fingerprint.
#[derive(Debug, Serialize)]
pub struct ReadingResponse {
  #[serde(flatten)]
  pub completed: CompletedReading,
  pub fingerprint: String,
}

pub(crate) async fn run<S, O>(
  state: &AppState<S, O>,
  request: ReadingRequest,
) -> Result<Json<ReadingResponse>, ApiError>
where
  S: ProfileStore,
  O: Oracle,
{
  let completed =
    fetch_reproducible(state.oracle.as_ref(), state.store.as_ref(), request).await?;
  let fingerprint = fingerprint(&completed.reading)?;
  Ok(Json(ReadingResponse {
    completed,
    fingerprint,
  }))
}

// ─── Handlers ────────────────────────────────────────────────────────────────

/// `POST /fortune` — a daily fortune needs the full identity triple.
pub async fn fortune<S, O>(
  State(state): State<AppState<S, O>>,
  Json(body): Json<SingleBody>,
) -> Result<Json<ReadingResponse>, ApiError>
where
  S: ProfileStore,
  O: Oracle,
{
  let context = body.context.into_context();
  if !context.is_complete() {
    return Err(ApiError::BadRequest(
      "fortune readings need a name and birth date".to_owned(),
    ));
  }
  run(
    &state,
    ReadingRequest {
      kind: ReadingKind::Fortune,
      subjects: ReadingSubjects::Single(body.sign),
      context,
      seed: body.seed,
    },
  )
  .await
}

/// `POST /match`
pub async fn match_pair<S, O>(
  State(state): State<AppState<S, O>>,
  Json(body): Json<PairBody>,
) -> Result<Json<ReadingResponse>, ApiError>
where
  S: ProfileStore,
  O: Oracle,
{
  run(
    &state,
    ReadingRequest {
      kind: ReadingKind::Match,
      subjects: ReadingSubjects::Pair(body.first, body.second),
      context: body.context.into_context(),
      seed: body.seed,
    },
  )
  .await
}

/// `POST /mystery`
pub async fn mystery<S, O>(
  State(state): State<AppState<S, O>>,
  Json(body): Json<SingleBody>,
) -> Result<Json<ReadingResponse>, ApiError>
where
  S: ProfileStore,
  O: Oracle,
{
  run(
    &state,
    ReadingRequest {
      kind: ReadingKind::MysteryBox,
      subjects: ReadingSubjects::Single(body.sign),
      context: body.context.into_context(),
      seed: body.seed,
    },
  )
  .await
}
