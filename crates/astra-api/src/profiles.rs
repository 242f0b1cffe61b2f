//! Handlers for `/profiles` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`    | `/profiles/{uid}` | 404 if not found |
//! | `PUT`    | `/profiles/{uid}` | Upsert; absent fields stay unchanged |
//! | `DELETE` | `/profiles/{uid}` | 204 on removal |
//! | `POST`   | `/profiles/{uid}/share` | Apply the share reward |
//! | `POST`   | `/profiles/{uid}/check-in` | Idempotent within a day |

use astra_core::{
  profile::{Gender, UserProfile},
  store::ProfileStore,
};
use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{AppState, error::ApiError};

fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> ApiError {
  ApiError::Store(Box::new(e))
}

async fn load<S: ProfileStore>(store: &S, uid: Uuid) -> Result<UserProfile, ApiError> {
  store
    .get_profile(uid)
    .await
    .map_err(store_err)?
    .ok_or_else(|| ApiError::NotFound(format!("profile {uid} not found")))
}

// ─── Get / update / delete ───────────────────────────────────────────────────

/// `GET /profiles/{uid}`
pub async fn get_one<S, O>(
  State(state): State<AppState<S, O>>,
  Path(uid): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError>
where
  S: ProfileStore,
{
  Ok(Json(load(state.store.as_ref(), uid).await?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBody {
  pub name: Option<String>,
  pub birth_date: Option<NaiveDate>,
  pub gender: Option<Gender>,
}

/// `PUT /profiles/{uid}` — creates the profile (with the initial energy
/// grant) when it does not exist yet.
pub async fn update<S, O>(
  State(state): State<AppState<S, O>>,
  Path(uid): Path<Uuid>,
  Json(body): Json<UpdateBody>,
) -> Result<Json<UserProfile>, ApiError>
where
  S: ProfileStore,
{
  let store = state.store.as_ref();
  let mut profile = store
    .get_profile(uid)
    .await
    .map_err(store_err)?
    .unwrap_or_else(|| UserProfile::new(uid));

  if let Some(name) = body.name {
    profile.name = name;
  }
  if let Some(birth_date) = body.birth_date {
    profile.birth_date = Some(birth_date);
  }
  if let Some(gender) = body.gender {
    profile.gender = gender;
  }

  let saved = store.save_profile(profile).await.map_err(store_err)?;
  Ok(Json(saved))
}

/// `DELETE /profiles/{uid}`
pub async fn delete<S, O>(
  State(state): State<AppState<S, O>>,
  Path(uid): Path<Uuid>,
) -> Result<StatusCode, ApiError>
where
  S: ProfileStore,
{
  let removed = state
    .store
    .delete_profile(uid)
    .await
    .map_err(store_err)?;
  if removed {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(ApiError::NotFound(format!("profile {uid} not found")))
  }
}

// ─── Rewards ─────────────────────────────────────────────────────────────────

/// `POST /profiles/{uid}/share`
pub async fn share<S, O>(
  State(state): State<AppState<S, O>>,
  Path(uid): Path<Uuid>,
) -> Result<Json<UserProfile>, ApiError>
where
  S: ProfileStore,
{
  let store = state.store.as_ref();
  let mut profile = load(store, uid).await?;
  profile.apply_share_reward();
  let saved = store.save_profile(profile).await.map_err(store_err)?;
  Ok(Json(saved))
}

#[derive(Debug, Serialize)]
pub struct CheckInResponse {
  /// Whether energy was granted, i.e. this was the first check-in today.
  pub granted: bool,
  pub profile: UserProfile,
}

/// `POST /profiles/{uid}/check-in`
pub async fn check_in<S, O>(
  State(state): State<AppState<S, O>>,
  Path(uid): Path<Uuid>,
) -> Result<Json<CheckInResponse>, ApiError>
where
  S: ProfileStore,
{
  let store = state.store.as_ref();
  let mut profile = load(store, uid).await?;
  let granted = profile.check_in(Local::now().date_naive());
  let profile = store.save_profile(profile).await.map_err(store_err)?;
  Ok(Json(CheckInResponse { granted, profile }))
}
