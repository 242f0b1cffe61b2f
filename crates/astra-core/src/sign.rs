//! The zodiac sign — the subject every reading is generated about.
//!
//! Sign codes (`Aries` … `Pisces`) are the stable identifiers carried in
//! deep links and API bodies; they never change between releases.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::{Error, Result};

/// One of the twelve western zodiac signs.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ZodiacSign {
  Aries,
  Taurus,
  Gemini,
  Cancer,
  Leo,
  Virgo,
  Libra,
  Scorpio,
  Sagittarius,
  Capricorn,
  Aquarius,
  Pisces,
}

impl ZodiacSign {
  /// Parse a sign code as carried in a deep link (`s=Leo`).
  ///
  /// Unlike a plain `FromStr`, an unknown code is reported as
  /// [`Error::UnknownSign`] so callers can abort reconstruction before any
  /// oracle call is made.
  pub fn from_code(code: &str) -> Result<Self> {
    code
      .parse()
      .map_err(|_| Error::UnknownSign(code.to_owned()))
  }

  /// The stable identifier used on the wire. Identical to the variant name.
  pub fn code(self) -> &'static str {
    match self {
      Self::Aries => "Aries",
      Self::Taurus => "Taurus",
      Self::Gemini => "Gemini",
      Self::Cancer => "Cancer",
      Self::Leo => "Leo",
      Self::Virgo => "Virgo",
      Self::Libra => "Libra",
      Self::Scorpio => "Scorpio",
      Self::Sagittarius => "Sagittarius",
      Self::Capricorn => "Capricorn",
      Self::Aquarius => "Aquarius",
      Self::Pisces => "Pisces",
    }
  }

  /// The astrological symbol, for display surfaces.
  pub fn symbol(self) -> &'static str {
    match self {
      Self::Aries => "♈",
      Self::Taurus => "♉",
      Self::Gemini => "♊",
      Self::Cancer => "♋",
      Self::Leo => "♌",
      Self::Virgo => "♍",
      Self::Libra => "♎",
      Self::Scorpio => "♏",
      Self::Sagittarius => "♐",
      Self::Capricorn => "♑",
      Self::Aquarius => "♒",
      Self::Pisces => "♓",
    }
  }

  /// Calendar date range, `month.day` inclusive on both ends.
  pub fn date_range(self) -> &'static str {
    match self {
      Self::Aries => "3.21-4.19",
      Self::Taurus => "4.20-5.20",
      Self::Gemini => "5.21-6.21",
      Self::Cancer => "6.22-7.22",
      Self::Leo => "7.23-8.22",
      Self::Virgo => "8.23-9.22",
      Self::Libra => "9.23-10.23",
      Self::Scorpio => "10.24-11.22",
      Self::Sagittarius => "11.23-12.21",
      Self::Capricorn => "12.22-1.19",
      Self::Aquarius => "1.20-2.18",
      Self::Pisces => "2.19-3.20",
    }
  }
}

// ─── Subjects ────────────────────────────────────────────────────────────────

/// The subject(s) of a reading: one sign (fortune, mystery box) or a pair
/// (match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReadingSubjects {
  Single(ZodiacSign),
  Pair(ZodiacSign, ZodiacSign),
}

impl ReadingSubjects {
  /// The sign whose identity drives seed derivation.
  pub fn primary(self) -> ZodiacSign {
    match self {
      Self::Single(s) | Self::Pair(s, _) => s,
    }
  }

  /// Human-readable label used in history entries: `"Leo"` or `"Leo & Aries"`.
  pub fn label(self) -> String {
    match self {
      Self::Single(s) => s.code().to_owned(),
      Self::Pair(a, b) => format!("{} & {}", a.code(), b.code()),
    }
  }
}
