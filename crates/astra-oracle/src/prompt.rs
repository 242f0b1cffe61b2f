//! Prompt assembly.
//!
//! Prompts are part of the reproducibility tuple: for a fixed (sign, context,
//! day) the assembled text must be byte-identical, or a carried seed stops
//! reproducing. Keep these builders pure and deterministic.

use astra_core::{
  companion::{ChatRole, ChatTurn, PetPersona},
  profile::{Gender, SubjectContext},
  sign::ZodiacSign,
};
use chrono::NaiveDate;

/// Age bucket folded into the fortune prompt, e.g. `"the golden prime (31)"`.
///
/// Unknown birth dates map to a neutral catch-all so the prompt stays total.
pub fn life_stage(birth_date: Option<NaiveDate>, today: NaiveDate) -> String {
  let Some(birth) = birth_date else {
    return "an unknown stage of life".to_owned();
  };

  // years_since is None for future dates; treat those as age zero.
  let age = today.years_since(birth).unwrap_or(0);

  match age {
    0..=17 => format!("the student years ({age})"),
    18..=24 => format!("the rising-talent years ({age})"),
    25..=34 => format!("the golden prime ({age})"),
    35..=49 => format!("the steady mid-life years ({age})"),
    _ => format!("the sage years ({age})"),
  }
}

fn gender_word(gender: Gender) -> &'static str {
  match gender {
    Gender::Male => "male",
    Gender::Female => "female",
    Gender::Other => "nonbinary",
    Gender::Unspecified => "unspecified-gender",
  }
}

/// Prompt for the daily fortune report.
pub fn fortune(sign: ZodiacSign, context: &SubjectContext, today: NaiveDate) -> String {
  format!(
    "You are a mentor versed in psychology and astrology. Compose today's \
     personal fortune report for \"{name}\", a {gender} {sign} in {stage}.",
    name = context.display_name,
    gender = gender_word(context.gender),
    sign = sign.code(),
    stage = life_stage(context.birth_date, today),
  )
}

/// Prompt for the compatibility analysis. Deliberately terse: the pairing is
/// the whole story, and extra context would perturb carried-seed replays.
pub fn match_analysis(first: ZodiacSign, second: ZodiacSign) -> String {
  format!(
    "Analyse the pairing of {} and {}.",
    first.code(),
    second.code()
  )
}

/// Prompt for the personality mystery box.
pub fn mystery_box(sign: ZodiacSign) -> String {
  format!(
    "Open the blind-box personality profile for {}.",
    sign.code()
  )
}

// ─── Companions ──────────────────────────────────────────────────────────────

/// System instruction keeping the pet in character.
pub fn pet_system(pet: &PetPersona) -> String {
  format!(
    "You are the owner's star pet, a {species} through and through. \
     No rambling; answer at once.",
    species = pet.species,
  )
}

/// User-visible turn for the pet exchange.
pub fn pet_message(
  pet: &PetPersona,
  context: &SubjectContext,
  sign: ZodiacSign,
  user_input: Option<&str>,
) -> String {
  let event = match user_input {
    Some(input) => format!("Your owner \"{}\" says: \"{input}\".", context.display_name),
    None => format!("Your owner \"{}\" is watching you.", context.display_name),
  };
  format!(
    "You are the {species} \"{pet_name}\" (mood {mood}/100). Your owner is a \
     {sign}. {event} Reply in under 30 words, with a mood change and an \
     emotion.",
    species = pet.species,
    pet_name = pet.name,
    mood = pet.mood,
    sign = sign.code(),
  )
}

/// System instruction for the chat advisor.
pub fn advisor_system(context: &SubjectContext, sign: ZodiacSign) -> String {
  format!(
    "You are a mentor versed in psychology and astrology. You are answering a \
     traveller named \"{name}\", sign {sign}, born {birth}.",
    name = context.display_name,
    sign = sign.code(),
    birth = context.birth_date_string(),
  )
}

/// Conversation turns for the advisor call: prior history plus the new
/// message. The API rejects a conversation opening with a model turn, so any
/// leading model turns are dropped.
pub fn advisor_turns(message: &str, history: &[ChatTurn]) -> Vec<ChatTurn> {
  let mut turns: Vec<ChatTurn> = history
    .iter()
    .skip_while(|turn| turn.role == ChatRole::Model)
    .cloned()
    .collect();
  turns.push(ChatTurn {
    role: ChatRole::User,
    text: message.to_owned(),
  });
  turns
}

#[cfg(test)]
mod tests {
  use astra_core::companion::PetSpecies;

  use super::*;

  fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
  }

  #[test]
  fn life_stage_buckets() {
    let today = date("2024-06-01");
    assert_eq!(
      life_stage(Some(date("2010-01-01")), today),
      "the student years (14)"
    );
    assert_eq!(
      life_stage(Some(date("2000-01-01")), today),
      "the rising-talent years (24)"
    );
    assert_eq!(
      life_stage(Some(date("1990-05-20")), today),
      "the golden prime (34)"
    );
    assert_eq!(
      life_stage(Some(date("1980-01-01")), today),
      "the steady mid-life years (44)"
    );
    assert_eq!(life_stage(Some(date("1960-01-01")), today), "the sage years (64)");
    assert_eq!(life_stage(None, today), "an unknown stage of life");
  }

  #[test]
  fn birthday_later_in_the_year_has_not_aged_yet() {
    // Born 1990-07-01, asked on 2024-06-01: still 33.
    assert_eq!(
      life_stage(Some(date("1990-07-01")), date("2024-06-01")),
      "the golden prime (33)"
    );
  }

  #[test]
  fn prompts_are_deterministic() {
    let ctx = SubjectContext {
      display_name: "Alice".into(),
      birth_date: Some(date("1990-05-20")),
      gender: Gender::Female,
    };
    let today = date("2024-06-01");
    assert_eq!(
      fortune(ZodiacSign::Leo, &ctx, today),
      fortune(ZodiacSign::Leo, &ctx, today)
    );
    assert!(fortune(ZodiacSign::Leo, &ctx, today).contains("\"Alice\""));
    assert_eq!(
      match_analysis(ZodiacSign::Leo, ZodiacSign::Aries),
      "Analyse the pairing of Leo and Aries."
    );
  }

  #[test]
  fn advisor_drops_leading_model_turns() {
    let history = vec![
      ChatTurn {
        role: ChatRole::Model,
        text: "welcome".into(),
      },
      ChatTurn {
        role: ChatRole::User,
        text: "hi".into(),
      },
      ChatTurn {
        role: ChatRole::Model,
        text: "hello".into(),
      },
    ];
    let turns = advisor_turns("what now?", &history);
    assert_eq!(turns.first().unwrap().role, ChatRole::User);
    assert_eq!(turns.last().unwrap().text, "what now?");
    assert_eq!(turns.len(), 3);
  }

  #[test]
  fn pet_message_mentions_the_input() {
    let pet = PetPersona {
      species: PetSpecies::Cat,
      name: "Nova".into(),
      mood: 80,
    };
    let ctx = SubjectContext {
      display_name: "Alice".into(),
      ..Default::default()
    };
    let msg = pet_message(&pet, &ctx, ZodiacSign::Leo, Some("good morning"));
    assert!(msg.contains("good morning"));
    assert!(msg.contains("Nova"));
  }
}
