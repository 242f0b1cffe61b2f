//! Deep-link codec for shareable reading links.
//!
//! Converts between [`ShareLink`] and a URL query string, and back. Pure
//! synchronous; no HTTP or database dependencies.
//!
//! The wire keys are frozen — deployed links were minted with them:
//!
//! | key | value |
//! |-----|-------|
//! | `s` | subject sign code (single-subject readings) |
//! | `s1`, `s2` | the pair's sign codes (match readings) |
//! | `seed` | base-10 seed; absent means "derive fresh" |
//! | `gen` | gender token (`male`/`female`/`other`/`unspecified`) |
//! | `bday` | birth date, `YYYY-MM-DD` |
//!
//! All values are percent-encoded. Absent optional fields are omitted
//! entirely, never sent as empty strings. `decode` is the left inverse of
//! `encode` for every value `encode` produces.

pub mod error;

pub use error::{Error, Result};

use std::collections::HashMap;

use astra_core::{
  profile::{Gender, SubjectContext},
  seed::Seed,
  sign::{ReadingSubjects, ZodiacSign},
};
use url::form_urlencoded;

// ─── Public types ────────────────────────────────────────────────────────────

/// Everything a recipient needs to reproduce a shared result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareLink {
  pub subjects: ReadingSubjects,
  /// `None` marks a first-time visit: the consumer derives a fresh seed.
  pub seed: Option<Seed>,
  /// Partial context carried along for seed derivation and prompts.
  pub context: SubjectContext,
}

// ─── Encode ──────────────────────────────────────────────────────────────────

/// Serialize a [`ShareLink`] into a percent-encoded query string
/// (no leading `?`).
pub fn encode(link: &ShareLink) -> String {
  let mut query = form_urlencoded::Serializer::new(String::new());

  match link.subjects {
    ReadingSubjects::Single(sign) => {
      query.append_pair("s", sign.code());
    }
    ReadingSubjects::Pair(first, second) => {
      query.append_pair("s1", first.code());
      query.append_pair("s2", second.code());
    }
  }

  if let Some(seed) = link.seed {
    query.append_pair("seed", &seed.to_string());
  }
  if link.context.gender != Gender::Unspecified {
    query.append_pair("gen", &link.context.gender.to_string());
  }
  if link.context.birth_date.is_some() {
    query.append_pair("bday", &link.context.birth_date_string());
  }

  query.finish()
}

// ─── Decode ──────────────────────────────────────────────────────────────────

/// Parse a query string (with or without a leading `?`) back into a
/// [`ShareLink`].
///
/// Tolerant where the format allows it: a missing `seed` yields `None`, and
/// missing or unparseable `gen`/`bday` values fall back to context defaults.
/// Strict where it matters: an unknown sign code or a malformed `seed` is an
/// error, and the caller must abort reconstruction.
pub fn decode(query: &str) -> Result<ShareLink> {
  let query = query.strip_prefix('?').unwrap_or(query);

  // Last occurrence wins, matching router param semantics.
  let params: HashMap<String, String> = form_urlencoded::parse(query.as_bytes())
    .map(|(k, v)| (k.into_owned(), v.into_owned()))
    .collect();

  let subjects = decode_subjects(&params)?;

  let seed = match params.get("seed") {
    None => None,
    Some(raw) => Some(
      raw
        .parse::<Seed>()
        .map_err(|_| Error::InvalidSeed(raw.clone()))?,
    ),
  };

  let gender = params
    .get("gen")
    .and_then(|g| g.parse::<Gender>().ok())
    .unwrap_or_default();
  let birth_date = params.get("bday").and_then(|b| b.parse().ok());

  Ok(ShareLink {
    subjects,
    seed,
    context: SubjectContext {
      display_name: String::new(),
      birth_date,
      gender,
    },
  })
}

fn decode_subjects(params: &HashMap<String, String>) -> Result<ReadingSubjects> {
  let sign = |code: &str| {
    ZodiacSign::from_code(code).map_err(|_| Error::UnknownSubject(code.to_owned()))
  };

  match (params.get("s1"), params.get("s2")) {
    (Some(a), Some(b)) => Ok(ReadingSubjects::Pair(sign(a)?, sign(b)?)),
    _ => match params.get("s") {
      Some(code) => Ok(ReadingSubjects::Single(sign(code)?)),
      None => Err(Error::MissingSubject),
    },
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
