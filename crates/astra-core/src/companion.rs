//! Companion features riding on the same oracle: the virtual pet and the
//! chat advisor. Neither is seeded — their replies are meant to vary.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// The species a pet can hatch as.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString,
)]
pub enum PetSpecies {
  Cat,
  Fox,
  Owl,
}

/// What the oracle needs to know to speak as the pet.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PetPersona {
  pub species: PetSpecies,
  pub name: String,
  /// Current mood, 0–100. Feeds the prompt so replies track the pet's state.
  pub mood: u8,
}

/// A pet's reply: short text plus a mood delta and an emoji.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PetReply {
  pub text: String,
  pub mood_change: i32,
  pub emotion: String,
}

impl PetReply {
  /// Canned reply shown when the oracle is unreachable. The pet shrugging is
  /// part of the product, not an error surface.
  pub fn fallback() -> Self {
    Self {
      text: "The star signal is wavering... meow?".to_owned(),
      mood_change: 0,
      emotion: "📡".to_owned(),
    }
  }
}

/// One turn of the advisor conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
  pub role: ChatRole,
  pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
  User,
  Model,
}
