//! The `ProfileStore` trait.
//!
//! Implemented by storage backends (e.g. `astra-store-sqlite`). Higher layers
//! (`astra-api`, `astra-server`) depend on this abstraction, not on any
//! concrete backend — context capture and the history log never touch ambient
//! global state.

use std::future::Future;

use uuid::Uuid;

use crate::{
  history::{HistoryEntry, HistoryQuery},
  profile::UserProfile,
};

/// Abstraction over profile and history persistence.
///
/// Profiles are simple keyed documents. History writes are append-only from
/// the caller's perspective; the backend enforces the retention cap
/// internally via oldest-eviction.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Profiles ──────────────────────────────────────────────────────────

  /// Retrieve a profile by UID. Returns `None` if not found.
  fn get_profile(
    &self,
    uid: Uuid,
  ) -> impl Future<Output = Result<Option<UserProfile>, Self::Error>> + Send + '_;

  /// Insert or replace a profile. The store stamps `last_sync` and returns
  /// the persisted value.
  fn save_profile(
    &self,
    profile: UserProfile,
  ) -> impl Future<Output = Result<UserProfile, Self::Error>> + Send + '_;

  /// Delete a profile. Returns `true` when something was removed.
  fn delete_profile(
    &self,
    uid: Uuid,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── History ───────────────────────────────────────────────────────────

  /// Append an entry, evicting the oldest beyond
  /// [`HISTORY_CAP`](crate::history::HISTORY_CAP).
  fn append_history(
    &self,
    entry: HistoryEntry,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// List entries per `query`. An empty log yields an empty vec.
  fn list_history<'a>(
    &'a self,
    query: &'a HistoryQuery,
  ) -> impl Future<Output = Result<Vec<HistoryEntry>, Self::Error>> + Send + 'a;
}
