//! User profiles and the request-time context snapshot.
//!
//! The profile is the only mutable state the app owns. The reading core never
//! mutates it — it reads a [`SubjectContext`] snapshot captured fresh at
//! request time, since the profile may have been edited since the last
//! capture.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};
use uuid::Uuid;

/// Star energy granted to a brand-new profile.
pub const INITIAL_STAR_ENERGY: i64 = 1000;
/// Star energy awarded per completed share.
pub const SHARE_REWARD_ENERGY: i64 = 5;
/// Star energy awarded by the daily check-in.
pub const CHECK_IN_ENERGY: i64 = 10;
/// Shares required to unlock the broadcaster badge.
pub const BROADCASTER_THRESHOLD: u32 = 3;

/// Badge granted to every new profile.
pub const BADGE_OBSERVER: &str = "observer";
/// Badge granted after [`BROADCASTER_THRESHOLD`] shares.
pub const BADGE_BROADCASTER: &str = "broadcaster";

/// Self-reported gender, carried into prompts and deep links.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  Display,
  EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
  Other,
  #[default]
  Unspecified,
}

// ─── Profile ─────────────────────────────────────────────────────────────────

/// A user profile as persisted by a [`ProfileStore`](crate::store::ProfileStore).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
  pub uid: Uuid,
  pub name: String,
  pub birth_date: Option<NaiveDate>,
  pub gender: Gender,
  pub star_energy: i64,
  pub share_count: u32,
  pub badges: Vec<String>,
  pub last_check_in: Option<NaiveDate>,
  /// Set by the store on every save.
  pub last_sync: DateTime<Utc>,
}

impl UserProfile {
  /// A fresh profile with the initial energy grant and the observer badge.
  pub fn new(uid: Uuid) -> Self {
    Self {
      uid,
      name: String::new(),
      birth_date: None,
      gender: Gender::Unspecified,
      star_energy: INITIAL_STAR_ENERGY,
      share_count: 0,
      badges: vec![BADGE_OBSERVER.to_owned()],
      last_check_in: None,
      last_sync: Utc::now(),
    }
  }

  /// Apply the share reward: bump the counter, grant energy, and unlock the
  /// broadcaster badge once the threshold is reached.
  pub fn apply_share_reward(&mut self) {
    self.share_count += 1;
    self.star_energy += SHARE_REWARD_ENERGY;
    if self.share_count >= BROADCASTER_THRESHOLD
      && !self.badges.iter().any(|b| b == BADGE_BROADCASTER)
    {
      self.badges.push(BADGE_BROADCASTER.to_owned());
    }
  }

  /// Daily check-in. Returns `false` (and changes nothing) when already
  /// checked in on `today`.
  pub fn check_in(&mut self, today: NaiveDate) -> bool {
    if self.last_check_in == Some(today) {
      return false;
    }
    self.last_check_in = Some(today);
    self.star_energy += CHECK_IN_ENERGY;
    true
  }
}

// ─── Context capture ─────────────────────────────────────────────────────────

/// The minimal identity triple a reproducible request needs.
///
/// A read-only snapshot: capturing never fails — missing profile fields fall
/// back to defined defaults (empty name, no birth date, unspecified gender).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubjectContext {
  pub display_name: String,
  pub birth_date: Option<NaiveDate>,
  pub gender: Gender,
}

impl SubjectContext {
  /// Snapshot the currently-known profile fields.
  pub fn capture(profile: &UserProfile) -> Self {
    Self {
      display_name: profile.name.clone(),
      birth_date: profile.birth_date,
      gender: profile.gender,
    }
  }

  /// Whether the context carries everything a personalised reading needs.
  pub fn is_complete(&self) -> bool {
    !self.display_name.trim().is_empty() && self.birth_date.is_some()
  }

  /// The birth date as an ISO string, or empty when unknown. This exact
  /// representation feeds seed derivation, so it must stay stable.
  pub fn birth_date_string(&self) -> String {
    self
      .birth_date
      .map(|d| d.format("%Y-%m-%d").to_string())
      .unwrap_or_default()
  }
}
