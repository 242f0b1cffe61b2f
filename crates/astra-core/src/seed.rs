//! Deterministic seed derivation.
//!
//! A seed is either derived fresh from (subject identity, calendar day) or
//! carried verbatim from a deep link. Derived seeds are stable: the same
//! identity on the same day always yields the same integer, so a result can
//! be regenerated byte-for-byte without storing it anywhere.

use std::{fmt, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::profile::SubjectContext;

/// A non-negative 32-bit generation seed.
///
/// Carried seeds are opaque — they are never re-derived or mutated, only
/// passed through to the oracle verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Seed(pub u32);

impl fmt::Display for Seed {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    self.0.fmt(f)
  }
}

impl FromStr for Seed {
  type Err = std::num::ParseIntError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    s.parse().map(Seed)
  }
}

/// Derive a seed from a subject key, a context key and a calendar day.
///
/// The subject key is normalised (trimmed, lowercased) before hashing; the
/// folded string is `"{subject_key}-{context_key}-{YYYY-MM-DD}"`. The fold is
/// `h = h*31 + unit` over **UTF-16 code units** with wrapping 32-bit signed
/// arithmetic, followed by `unsigned_abs` — the historical recurrence the
/// deployed share links were minted with, so it must not change.
///
/// Total over all inputs: empty keys still produce a valid (if less entropic)
/// seed. Collisions are acceptable and not treated as errors.
pub fn derive_seed(subject_key: &str, context_key: &str, day: NaiveDate) -> Seed {
  let input = format!(
    "{}-{}-{}",
    subject_key.trim().to_lowercase(),
    context_key,
    day.format("%Y-%m-%d"),
  );

  let mut h: i32 = 0;
  for unit in input.encode_utf16() {
    h = h.wrapping_mul(31).wrapping_add(i32::from(unit));
  }
  Seed(h.unsigned_abs())
}

/// Derive a seed for a captured [`SubjectContext`] on the given day.
///
/// The display name is the subject key and the birth date (empty string when
/// unknown) is the context key.
pub fn derive_for_context(context: &SubjectContext, day: NaiveDate) -> Seed {
  derive_seed(&context.display_name, &context.birth_date_string(), day)
}

#[cfg(test)]
mod tests {
  use super::*;

  fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  #[test]
  fn repeated_calls_agree() {
    let a = derive_seed("Alice", "1990-05-20", date("2024-06-01"));
    let b = derive_seed("Alice", "1990-05-20", date("2024-06-01"));
    assert_eq!(a, b);
  }

  #[test]
  fn crossing_a_day_boundary_changes_the_seed() {
    // Documented expectation for this concrete pair, not a universal
    // guarantee — collisions across inputs are allowed.
    let d1 = derive_seed("alice", "1990-01-01", date("2024-01-01"));
    let d2 = derive_seed("alice", "1990-01-01", date("2024-01-02"));
    assert_ne!(d1, d2);
  }

  #[test]
  fn subject_key_is_normalised() {
    let day = date("2024-06-01");
    assert_eq!(
      derive_seed("  Alice ", "1990-05-20", day),
      derive_seed("alice", "1990-05-20", day),
    );
  }

  #[test]
  fn empty_keys_still_produce_a_seed() {
    // Total function: no failure path, just low entropy.
    let _ = derive_seed("", "", date("2024-06-01"));
  }

  #[test]
  fn non_ascii_names_fold_over_utf16_units() {
    // "星语" is two UTF-16 code units (0x661F, 0x8BED); the fold must run
    // over those units, not over bytes or chars.
    let mut h: i32 = 0;
    for unit in "星语-b-2024-06-01".encode_utf16() {
      h = h.wrapping_mul(31).wrapping_add(i32::from(unit));
    }
    assert_eq!(
      derive_seed("星语", "b", date("2024-06-01")),
      Seed(h.unsigned_abs()),
    );
  }

  #[test]
  fn seed_parses_from_base10() {
    assert_eq!("42".parse::<Seed>().unwrap(), Seed(42));
    assert_eq!(Seed(0).to_string(), "0");
    assert!("-1".parse::<Seed>().is_err());
  }
}
