//! Column encoding and the raw row types read back from SQLite.

use astra_core::{
  history::HistoryEntry,
  profile::{Gender, UserProfile},
  reading::ReadingKind,
  seed::Seed,
};
use chrono::{DateTime, NaiveDate, Utc};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Scalar encoders ─────────────────────────────────────────────────────────

pub(crate) fn encode_uuid(id: Uuid) -> String {
  id.to_string()
}

pub(crate) fn encode_dt(dt: DateTime<Utc>) -> String {
  dt.to_rfc3339()
}

fn parse_dt(raw: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(raw)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::Decode(format!("timestamp {raw:?}: {e}")))
}

pub(crate) fn encode_date(d: NaiveDate) -> String {
  d.format("%Y-%m-%d").to_string()
}

fn parse_date(raw: &str) -> Result<NaiveDate> {
  raw
    .parse()
    .map_err(|e| Error::Decode(format!("date {raw:?}: {e}")))
}

pub(crate) fn encode_badges(badges: &[String]) -> Result<String> {
  Ok(serde_json::to_string(badges)?)
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

/// A `profiles` row as read from SQLite, before domain decoding.
pub(crate) struct RawProfile {
  pub uid: String,
  pub name: String,
  pub birth_date: Option<String>,
  pub gender: String,
  pub star_energy: i64,
  pub share_count: i64,
  pub badges: String,
  pub last_check_in: Option<String>,
  pub last_sync: String,
}

impl RawProfile {
  pub fn into_profile(self) -> Result<UserProfile> {
    let gender: Gender = self
      .gender
      .parse()
      .map_err(|_| Error::Decode(format!("gender {:?}", self.gender)))?;

    Ok(UserProfile {
      uid: Uuid::parse_str(&self.uid)?,
      name: self.name,
      birth_date: self.birth_date.as_deref().map(parse_date).transpose()?,
      gender,
      star_energy: self.star_energy,
      share_count: self.share_count as u32,
      badges: serde_json::from_str(&self.badges)?,
      last_check_in: self.last_check_in.as_deref().map(parse_date).transpose()?,
      last_sync: parse_dt(&self.last_sync)?,
    })
  }
}

/// A `history` row as read from SQLite.
pub(crate) struct RawHistoryEntry {
  pub entry_id: String,
  pub kind: String,
  pub subjects: String,
  pub digest: String,
  pub seed: i64,
  pub recorded_at: String,
}

impl RawHistoryEntry {
  pub fn into_entry(self) -> Result<HistoryEntry> {
    let kind: ReadingKind = self
      .kind
      .parse()
      .map_err(|_| Error::Decode(format!("reading kind {:?}", self.kind)))?;

    Ok(HistoryEntry {
      entry_id: Uuid::parse_str(&self.entry_id)?,
      kind,
      subjects: self.subjects,
      digest: self.digest,
      seed: Seed(self.seed as u32),
      recorded_at: parse_dt(&self.recorded_at)?,
    })
  }
}
