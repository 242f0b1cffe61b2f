//! Handler for `GET /history`.

use astra_core::{
  history::{HistoryEntry, HistoryOrder, HistoryQuery},
  reading::ReadingKind,
  store::ProfileStore,
};
use axum::{
  Json,
  extract::{Query, State},
};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct HistoryParams {
  pub kind: Option<ReadingKind>,
  #[serde(default)]
  pub order: HistoryOrder,
  pub limit: Option<usize>,
}

/// `GET /history[?kind=fortune&order=oldest_first&limit=10]`
pub async fn list<S, O>(
  State(state): State<AppState<S, O>>,
  Query(params): Query<HistoryParams>,
) -> Result<Json<Vec<HistoryEntry>>, ApiError>
where
  S: ProfileStore,
{
  let query = HistoryQuery {
    kind: params.kind,
    order: params.order,
    limit: params.limit,
  };
  let entries = state
    .store
    .list_history(&query)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(entries))
}
