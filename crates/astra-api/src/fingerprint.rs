//! Result fingerprints.
//!
//! A fingerprint is a SHA-256 hash over a reading's canonical JSON form,
//! truncated to 16 hex characters. Responses carry it so a replayed link can
//! be checked against the original result — the upstream oracle's seed
//! contract is an assumption, not a guarantee, and a fingerprint mismatch is
//! how drift surfaces.

use astra_core::reading::Reading;
use sha2::{Digest, Sha256};

use crate::error::ApiError;

const FINGERPRINT_LEN: usize = 16;

/// Compute the fingerprint of a reading.
///
/// Stable: `serde_json` serialises struct fields in declaration order, so the
/// same reading always yields the same bytes.
pub fn fingerprint(reading: &Reading) -> Result<String, ApiError> {
  let canonical =
    serde_json::to_vec(reading).map_err(|e| ApiError::Store(Box::new(e)))?;
  let hash = Sha256::digest(&canonical);
  let mut hex = hex::encode(hash);
  hex.truncate(FINGERPRINT_LEN);
  Ok(hex)
}

#[cfg(test)]
mod tests {
  use astra_core::reading::MatchReading;

  use super::*;

  fn reading(score: u8) -> Reading {
    Reading::Match(MatchReading {
      score,
      analysis: "A volatile but rewarding pairing.".into(),
      advice: "Talk more.".into(),
    })
  }

  #[test]
  fn equal_readings_share_a_fingerprint() {
    assert_eq!(
      fingerprint(&reading(87)).unwrap(),
      fingerprint(&reading(87)).unwrap()
    );
  }

  #[test]
  fn different_readings_differ() {
    assert_ne!(
      fingerprint(&reading(87)).unwrap(),
      fingerprint(&reading(88)).unwrap()
    );
  }

  #[test]
  fn fingerprint_is_short_hex() {
    let fp = fingerprint(&reading(1)).unwrap();
    assert_eq!(fp.len(), FINGERPRINT_LEN);
    assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
  }
}
