//! History log types.
//!
//! The log is a pure local cache of past readings — append-only from the
//! caller's perspective, capped at [`HISTORY_CAP`] entries with oldest-first
//! eviction. It is not part of the reproducibility contract; replaying a link
//! never reads from it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{reading::ReadingKind, seed::Seed};

/// Maximum number of retained history entries.
pub const HISTORY_CAP: usize = 50;

/// A summarized record of one completed reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
  pub entry_id: Uuid,
  pub kind: ReadingKind,
  /// Subject label, e.g. `"Leo"` or `"Leo & Aries"`.
  pub subjects: String,
  /// Short digest of the result, not the result itself.
  pub digest: String,
  /// The seed the reading was generated with — enough to rebuild a share
  /// link later.
  pub seed: Seed,
  pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
  pub fn new(kind: ReadingKind, subjects: String, digest: String, seed: Seed) -> Self {
    Self {
      entry_id: Uuid::new_v4(),
      kind,
      subjects,
      digest,
      seed,
      recorded_at: Utc::now(),
    }
  }
}

/// Listing order. Ties on `recorded_at` break by insertion sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryOrder {
  #[default]
  NewestFirst,
  OldestFirst,
}

/// Parameters for [`ProfileStore::list_history`](crate::store::ProfileStore::list_history).
#[derive(Debug, Clone, Default)]
pub struct HistoryQuery {
  /// Restrict to one reading kind.
  pub kind: Option<ReadingKind>,
  pub order: HistoryOrder,
  pub limit: Option<usize>,
}
