//! The `Oracle` trait — the external generative service as seen by the core.
//!
//! The oracle is treated as an opaque collaborator whose one obligation is
//! *same seed + same prompt parameters ⇒ same structured payload*. That
//! contract cannot be verified or enforced here; the core only guarantees it
//! passes the same tuple every time a link is replayed.

use std::future::Future;

use crate::{
  companion::{ChatTurn, PetPersona, PetReply},
  profile::SubjectContext,
  reading::{FortuneReading, MatchReading, MysteryBoxReading},
  seed::Seed,
  sign::ZodiacSign,
};

/// A generative oracle producing structured readings.
///
/// Implemented by `astra-oracle` over the Gemini `generateContent` API, and
/// by scripted fakes in tests.
pub trait Oracle: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Today's fortune report for one sign. Seeded.
  fn daily_fortune<'a>(
    &'a self,
    sign: ZodiacSign,
    context: &'a SubjectContext,
    seed: Seed,
  ) -> impl Future<Output = Result<FortuneReading, Self::Error>> + Send + 'a;

  /// Compatibility analysis for a pair of signs. Seeded.
  fn match_analysis<'a>(
    &'a self,
    first: ZodiacSign,
    second: ZodiacSign,
    context: &'a SubjectContext,
    seed: Seed,
  ) -> impl Future<Output = Result<MatchReading, Self::Error>> + Send + 'a;

  /// Personality mystery box for one sign. Seeded.
  fn mystery_box<'a>(
    &'a self,
    sign: ZodiacSign,
    context: &'a SubjectContext,
    seed: Seed,
  ) -> impl Future<Output = Result<MysteryBoxReading, Self::Error>> + Send + 'a;

  /// A pet reply. Unseeded — variation is the point.
  fn pet_reply<'a>(
    &'a self,
    pet: &'a PetPersona,
    context: &'a SubjectContext,
    sign: ZodiacSign,
    user_input: Option<&'a str>,
  ) -> impl Future<Output = Result<PetReply, Self::Error>> + Send + 'a;

  /// Free-text advisor reply over a running conversation. Unseeded.
  fn advise<'a>(
    &'a self,
    message: &'a str,
    history: &'a [ChatTurn],
    context: &'a SubjectContext,
    sign: ZodiacSign,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
