//! HTTP server assembly for Astra.
//!
//! Mounts the `astra-api` router under `/api`, wraps it in Basic auth and
//! request tracing, and owns the runtime configuration shape.

pub mod auth;

use std::{path::PathBuf, sync::Arc};

use astra_core::{oracle::Oracle, store::ProfileStore};
use axum::{Router, middleware};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` with
/// `ASTRA_*` environment overrides.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,

  /// Empty to disable auth (loopback development).
  #[serde(default)]
  pub auth_username:      String,
  #[serde(default)]
  pub auth_password_hash: String,

  pub gemini_api_key: String,
  /// Optional model overrides.
  pub fast_model: Option<String>,
  pub deep_model: Option<String>,
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full application router: `/api/*` plus ambient layers.
pub fn router<S, O>(store: Arc<S>, oracle: Arc<O>, auth: Arc<AuthConfig>) -> Router
where
  S: ProfileStore + 'static,
  O: Oracle + 'static,
{
  Router::new()
    .nest("/api", astra_api::api_router(store, oracle))
    .layer(middleware::from_fn_with_state(auth, auth::require_auth))
    .layer(TraceLayer::new_for_http())
}
