//! Handlers for the companion endpoints: the virtual pet and the chat
//! advisor. Neither is part of the reproducibility contract.

use astra_core::{
  companion::{ChatTurn, PetPersona, PetReply},
  oracle::Oracle,
  sign::ZodiacSign,
  store::ProfileStore,
};
use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError, readings::ContextBody};

// ─── Pet ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct PetBody {
  pub pet: PetPersona,
  pub sign: ZodiacSign,
  /// Absent for ambient chatter; present when the user spoke to the pet.
  pub message: Option<String>,
  #[serde(flatten)]
  pub context: ContextBody,
}

/// `POST /pet`
///
/// Never fails: an unreachable oracle yields the canned fallback reply with
/// a 200. The pet shrugging is product behaviour, not an error surface.
pub async fn pet<S, O>(
  State(state): State<AppState<S, O>>,
  Json(body): Json<PetBody>,
) -> Json<PetReply>
where
  S: ProfileStore,
  O: Oracle,
{
  let context = body.context.into_context();
  let reply = state
    .oracle
    .pet_reply(&body.pet, &context, body.sign, body.message.as_deref())
    .await
    .unwrap_or_else(|_| PetReply::fallback());
  Json(reply)
}

// ─── Advisor ─────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ChatBody {
  pub message: String,
  /// Prior turns, oldest first.
  #[serde(default)]
  pub history: Vec<ChatTurn>,
  pub sign: ZodiacSign,
  #[serde(flatten)]
  pub context: ContextBody,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
  pub reply: String,
}

/// `POST /chat`
pub async fn chat<S, O>(
  State(state): State<AppState<S, O>>,
  Json(body): Json<ChatBody>,
) -> Result<Json<ChatResponse>, ApiError>
where
  S: ProfileStore,
  O: Oracle,
{
  let context = body.context.into_context();
  let reply = state
    .oracle
    .advise(&body.message, &body.history, &context, body.sign)
    .await
    .map_err(|e| ApiError::Generation(Box::new(e)))?;
  Ok(Json(ChatResponse { reply }))
}
