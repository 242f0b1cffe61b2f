//! [`SqliteStore`] — the SQLite implementation of [`ProfileStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use uuid::Uuid;

use astra_core::{
  history::{HISTORY_CAP, HistoryEntry, HistoryOrder, HistoryQuery},
  profile::UserProfile,
  store::ProfileStore,
};

use crate::{
  Error, Result,
  encode::{RawHistoryEntry, RawProfile, encode_badges, encode_date, encode_dt, encode_uuid},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An Astra profile/history store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// The on-disk schema version (`PRAGMA user_version`).
  pub async fn schema_version(&self) -> Result<i64> {
    let version = self
      .conn
      .call(|conn| {
        let v: i64 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
        Ok(v)
      })
      .await?;
    Ok(version)
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  // ── Profiles ──────────────────────────────────────────────────────────────

  async fn get_profile(&self, uid: Uuid) -> Result<Option<UserProfile>> {
    let uid_str = encode_uuid(uid);

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT uid, name, birth_date, gender, star_energy, share_count,
                      badges, last_check_in, last_sync
               FROM profiles WHERE uid = ?1",
              rusqlite::params![uid_str],
              |row| {
                Ok(RawProfile {
                  uid: row.get(0)?,
                  name: row.get(1)?,
                  birth_date: row.get(2)?,
                  gender: row.get(3)?,
                  star_energy: row.get(4)?,
                  share_count: row.get(5)?,
                  badges: row.get(6)?,
                  last_check_in: row.get(7)?,
                  last_sync: row.get(8)?,
                })
              },
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn save_profile(&self, mut profile: UserProfile) -> Result<UserProfile> {
    profile.last_sync = Utc::now();

    let uid_str = encode_uuid(profile.uid);
    let name = profile.name.clone();
    let birth_date = profile.birth_date.map(encode_date);
    let gender = profile.gender.to_string();
    let star_energy = profile.star_energy;
    let share_count = i64::from(profile.share_count);
    let badges = encode_badges(&profile.badges)?;
    let last_check_in = profile.last_check_in.map(encode_date);
    let last_sync = encode_dt(profile.last_sync);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT OR REPLACE INTO profiles (
             uid, name, birth_date, gender, star_energy, share_count,
             badges, last_check_in, last_sync
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            uid_str,
            name,
            birth_date,
            gender,
            star_energy,
            share_count,
            badges,
            last_check_in,
            last_sync,
          ],
        )?;
        Ok(())
      })
      .await?;

    Ok(profile)
  }

  async fn delete_profile(&self, uid: Uuid) -> Result<bool> {
    let uid_str = encode_uuid(uid);

    let removed = self
      .conn
      .call(move |conn| {
        let n = conn.execute(
          "DELETE FROM profiles WHERE uid = ?1",
          rusqlite::params![uid_str],
        )?;
        Ok(n > 0)
      })
      .await?;

    Ok(removed)
  }

  // ── History ───────────────────────────────────────────────────────────────

  async fn append_history(&self, entry: HistoryEntry) -> Result<()> {
    let entry_id = encode_uuid(entry.entry_id);
    let kind = entry.kind.to_string();
    let subjects = entry.subjects;
    let digest = entry.digest;
    let seed = i64::from(entry.seed.0);
    let recorded_at = encode_dt(entry.recorded_at);

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO history (entry_id, kind, subjects, digest, seed, recorded_at)
           VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![entry_id, kind, subjects, digest, seed, recorded_at],
        )?;

        // Retention cap: evict the oldest rows (by insertion sequence)
        // beyond the cap.
        conn.execute(
          "DELETE FROM history WHERE seq NOT IN
             (SELECT seq FROM history ORDER BY seq DESC LIMIT ?1)",
          rusqlite::params![HISTORY_CAP as i64],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn list_history(&self, query: &HistoryQuery) -> Result<Vec<HistoryEntry>> {
    let kind_str = query.kind.map(|k| k.to_string());
    let direction = match query.order {
      HistoryOrder::NewestFirst => "DESC",
      HistoryOrder::OldestFirst => "ASC",
    };
    // i64::MAX as "no limit" keeps the statement shape constant.
    let limit_val = query.limit.map_or(i64::MAX, |l| l as i64);

    let raws: Vec<RawHistoryEntry> = self
      .conn
      .call(move |conn| {
        let filter = if kind_str.is_some() {
          "WHERE kind = ?1"
        } else {
          ""
        };
        let sql = format!(
          "SELECT entry_id, kind, subjects, digest, seed, recorded_at
           FROM history {filter}
           ORDER BY recorded_at {direction}, seq {direction}
           LIMIT ?2"
        );

        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(
            rusqlite::params![kind_str.as_deref(), limit_val],
            |row| {
              Ok(RawHistoryEntry {
                entry_id: row.get(0)?,
                kind: row.get(1)?,
                subjects: row.get(2)?,
                digest: row.get(3)?,
                seed: row.get(4)?,
                recorded_at: row.get(5)?,
              })
            },
          )?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHistoryEntry::into_entry).collect()
  }
}
