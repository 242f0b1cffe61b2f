//! JSON REST API for Astra.
//!
//! Exposes an axum [`Router`] backed by any [`astra_core::store::ProfileStore`]
//! and [`astra_core::oracle::Oracle`]. Auth, TLS, and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", astra_api::api_router(store.clone(), oracle.clone()))
//! ```

pub mod companions;
pub mod error;
pub mod fingerprint;
pub mod history;
pub mod profiles;
pub mod readings;
pub mod replay;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use astra_core::{oracle::Oracle, store::ProfileStore};
use axum::{
  Router,
  routing::{get, post},
};

pub use error::ApiError;

/// Shared handler state: the persistence backend and the generative oracle.
pub struct AppState<S, O> {
  pub store: Arc<S>,
  pub oracle: Arc<O>,
}

// Manual impl: `S`/`O` themselves need not be `Clone` behind the `Arc`s.
impl<S, O> Clone for AppState<S, O> {
  fn clone(&self) -> Self {
    Self {
      store: Arc::clone(&self.store),
      oracle: Arc::clone(&self.oracle),
    }
  }
}

/// Build a fully-materialised API router for `store` and `oracle`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, O>(store: Arc<S>, oracle: Arc<O>) -> Router<()>
where
  S: ProfileStore + 'static,
  O: Oracle + 'static,
{
  let state = AppState { store, oracle };
  Router::new()
    // Readings
    .route("/fortune", post(readings::fortune::<S, O>))
    .route("/match", post(readings::match_pair::<S, O>))
    .route("/mystery", post(readings::mystery::<S, O>))
    .route("/replay", get(replay::replay::<S, O>))
    // Companions
    .route("/pet", post(companions::pet::<S, O>))
    .route("/chat", post(companions::chat::<S, O>))
    // Profiles
    .route(
      "/profiles/{uid}",
      get(profiles::get_one::<S, O>)
        .put(profiles::update::<S, O>)
        .delete(profiles::delete::<S, O>),
    )
    .route("/profiles/{uid}/share", post(profiles::share::<S, O>))
    .route("/profiles/{uid}/check-in", post(profiles::check_in::<S, O>))
    // History
    .route("/history", get(history::list::<S, O>))
    .with_state(state)
}
