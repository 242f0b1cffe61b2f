//! HTTP Basic-auth verification, applied as a middleware over the API.

use std::sync::Arc;

use argon2::{Argon2, PasswordHash, PasswordVerifier};
use axum::{
  Json,
  extract::{Request, State},
  http::{HeaderMap, StatusCode, header},
  middleware::Next,
  response::{IntoResponse, Response},
};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as B64;
use serde_json::json;

/// Credentials accepted as valid for this server instance.
///
/// An empty username disables auth entirely — the intended mode for local
/// development against a loopback bind.
#[derive(Clone)]
pub struct AuthConfig {
  pub username:      String,
  /// PHC string produced by argon2, e.g. `$argon2id$v=19$…`
  pub password_hash: String,
}

impl AuthConfig {
  pub fn enabled(&self) -> bool {
    !self.username.is_empty()
  }
}

fn unauthorized() -> Response {
  (
    StatusCode::UNAUTHORIZED,
    [(header::WWW_AUTHENTICATE, "Basic realm=\"astra\"")],
    Json(json!({ "error": "unauthorized" })),
  )
    .into_response()
}

/// Verify credentials directly from headers.
pub fn verify_auth(headers: &HeaderMap, config: &AuthConfig) -> Result<(), Response> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or_else(unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or_else(unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| unauthorized())?;
  let creds = std::str::from_utf8(&decoded).map_err(|_| unauthorized())?;

  let (username, password) = creds.split_once(':').ok_or_else(unauthorized)?;

  if username != config.username {
    return Err(unauthorized());
  }

  let parsed_hash =
    PasswordHash::new(&config.password_hash).map_err(|_| unauthorized())?;

  Argon2::default()
    .verify_password(password.as_bytes(), &parsed_hash)
    .map_err(|_| unauthorized())?;

  Ok(())
}

/// Axum middleware enforcing Basic auth on every request.
pub async fn require_auth(
  State(config): State<Arc<AuthConfig>>,
  request: Request,
  next: Next,
) -> Response {
  if !config.enabled() {
    return next.run(request).await;
  }
  match verify_auth(request.headers(), &config) {
    Ok(()) => next.run(request).await,
    Err(rejection) => rejection,
  }
}
