//! Response-schema builders for structured generation.
//!
//! The generation API accepts a structural schema describing the expected
//! output fields and their primitive types (string / integer /
//! array-of-string). Schemas are built as plain JSON values; the property
//! names must match the serde names of the reading structs in `astra-core`.

use serde_json::{Value, json};

/// The primitive property kinds the readings need.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropKind {
  String,
  Integer,
  StringArray,
}

impl PropKind {
  fn to_value(self) -> Value {
    match self {
      Self::String => json!({ "type": "STRING" }),
      Self::Integer => json!({ "type": "INTEGER" }),
      Self::StringArray => json!({
        "type": "ARRAY",
        "items": { "type": "STRING" },
      }),
    }
  }
}

/// An OBJECT schema with the given properties, all required.
pub fn object(props: &[(&str, PropKind)]) -> Value {
  let properties: serde_json::Map<String, Value> = props
    .iter()
    .map(|(name, kind)| ((*name).to_owned(), kind.to_value()))
    .collect();
  let required: Vec<&str> = props.iter().map(|(name, _)| *name).collect();

  json!({
    "type": "OBJECT",
    "properties": properties,
    "required": required,
  })
}

/// Schema for [`astra_core::reading::FortuneReading`].
pub fn fortune() -> Value {
  use PropKind::*;
  object(&[
    ("summary", String),
    ("overallScore", Integer),
    ("love", Integer),
    ("loveDetail", String),
    ("work", Integer),
    ("workDetail", String),
    ("health", Integer),
    ("healthDetail", String),
    ("money", Integer),
    ("moneyDetail", String),
    ("luckyColor", String),
    ("luckyNumber", Integer),
    ("bestMatch", String),
    ("suggestion", String),
  ])
}

/// Schema for [`astra_core::reading::MatchReading`].
pub fn match_analysis() -> Value {
  use PropKind::*;
  object(&[
    ("score", Integer),
    ("analysis", String),
    ("advice", String),
  ])
}

/// Schema for [`astra_core::reading::MysteryBoxReading`].
pub fn mystery_box() -> Value {
  use PropKind::*;
  object(&[
    ("traits", StringArray),
    ("strengths", StringArray),
    ("weaknesses", StringArray),
    ("outlook", String),
    ("spiritAnimal", String),
  ])
}

/// Schema for [`astra_core::companion::PetReply`].
pub fn pet_reply() -> Value {
  use PropKind::*;
  object(&[
    ("text", String),
    ("moodChange", Integer),
    ("emotion", String),
  ])
}
