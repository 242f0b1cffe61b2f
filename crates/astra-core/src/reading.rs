//! Structured reading payloads returned by the oracle.
//!
//! Field names stay camelCase on the wire — they double as the response
//! schema the oracle is asked to fill, and deployed clients already consume
//! this shape.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The reading flavours the reproducible-request core knows about.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ReadingKind {
  Fortune,
  Match,
  MysteryBox,
}

/// Daily fortune report for a single sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FortuneReading {
  pub summary: String,
  pub overall_score: u8,
  pub love: u8,
  pub love_detail: String,
  pub work: u8,
  pub work_detail: String,
  pub health: u8,
  pub health_detail: String,
  pub money: u8,
  pub money_detail: String,
  pub lucky_color: String,
  pub lucky_number: u32,
  pub best_match: String,
  pub suggestion: String,
}

/// Compatibility analysis for a pair of signs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReading {
  pub score: u8,
  pub analysis: String,
  pub advice: String,
}

/// Personality "mystery box" for a single sign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MysteryBoxReading {
  pub traits: Vec<String>,
  pub strengths: Vec<String>,
  pub weaknesses: Vec<String>,
  pub outlook: String,
  pub spirit_animal: String,
}

/// Any completed reading payload. Untagged: the surrounding envelope already
/// carries the kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reading {
  Fortune(FortuneReading),
  Match(MatchReading),
  MysteryBox(MysteryBoxReading),
}

impl Reading {
  pub fn kind(&self) -> ReadingKind {
    match self {
      Self::Fortune(_) => ReadingKind::Fortune,
      Self::Match(_) => ReadingKind::Match,
      Self::MysteryBox(_) => ReadingKind::MysteryBox,
    }
  }

  /// A short human-readable summary for history entries.
  pub fn digest(&self) -> String {
    match self {
      Self::Fortune(f) => {
        format!("{} · {}", f.overall_score, truncate(&f.summary, 60))
      }
      Self::Match(m) => {
        format!("{}% · {}", m.score, truncate(&m.analysis, 60))
      }
      Self::MysteryBox(b) => {
        format!("{} · {}", b.spirit_animal, truncate(&b.outlook, 60))
      }
    }
  }
}

/// Truncate to at most `max` characters, appending an ellipsis when cut.
/// Operates on chars, not bytes, so multi-byte text never splits.
fn truncate(s: &str, max: usize) -> String {
  if s.chars().count() <= max {
    return s.to_owned();
  }
  let cut: String = s.chars().take(max).collect();
  format!("{cut}…")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn truncate_is_char_safe() {
    assert_eq!(truncate("short", 60), "short");
    let long = "星".repeat(80);
    let cut = truncate(&long, 60);
    assert_eq!(cut.chars().count(), 61); // 60 + ellipsis
  }

  #[test]
  fn digest_mentions_the_score() {
    let reading = Reading::Match(MatchReading {
      score: 87,
      analysis: "A volatile but rewarding pairing.".into(),
      advice: "Talk more.".into(),
    });
    assert!(reading.digest().starts_with("87%"));
    assert_eq!(reading.kind(), ReadingKind::Match);
  }

  #[test]
  fn fortune_serialises_camel_case() {
    let f = FortuneReading {
      summary: "calm".into(),
      overall_score: 80,
      love: 70,
      love_detail: "steady".into(),
      work: 75,
      work_detail: "focused".into(),
      health: 90,
      health_detail: "rested".into(),
      money: 60,
      money_detail: "hold".into(),
      lucky_color: "indigo".into(),
      lucky_number: 7,
      best_match: "Libra".into(),
      suggestion: "write".into(),
    };
    let json = serde_json::to_value(&f).unwrap();
    assert_eq!(json["overallScore"], 80);
    assert_eq!(json["luckyNumber"], 7);
  }
}
