//! Async HTTP client for the Gemini `generateContent` API.

use std::time::Duration;

use astra_core::{
  companion::{ChatRole, ChatTurn, PetPersona, PetReply},
  oracle::Oracle,
  profile::SubjectContext,
  reading::{FortuneReading, MatchReading, MysteryBoxReading},
  seed::Seed,
  sign::ZodiacSign,
};
use chrono::Local;
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::Value;

use crate::{Error, Result, prompt, schema};

/// Connection settings for the generation API.
#[derive(Debug, Clone)]
pub struct OracleConfig {
  pub api_key: String,
  pub base_url: String,
  /// Model for structured readings and pet replies.
  pub fast_model: String,
  /// Model for the chat advisor.
  pub deep_model: String,
}

impl OracleConfig {
  pub fn new(api_key: impl Into<String>) -> Self {
    Self {
      api_key: api_key.into(),
      base_url: "https://generativelanguage.googleapis.com".to_owned(),
      fast_model: "gemini-3-flash-preview".to_owned(),
      deep_model: "gemini-3-pro-preview".to_owned(),
    }
  }
}

/// Async client for the generation API.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct GeminiOracle {
  client: Client,
  config: OracleConfig,
}

// ─── Wire types ──────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateBody {
  contents: Vec<Content>,
  #[serde(skip_serializing_if = "Option::is_none")]
  system_instruction: Option<Content>,
  generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
  #[serde(skip_serializing_if = "Option::is_none")]
  role: Option<String>,
  parts: Vec<Part>,
}

impl Content {
  fn text(role: Option<&str>, text: String) -> Self {
    Self {
      role: role.map(str::to_owned),
      parts: vec![Part { text: Some(text) }],
    }
  }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
  text: Option<String>,
}

#[derive(Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
  #[serde(skip_serializing_if = "Option::is_none")]
  seed: Option<u32>,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_mime_type: Option<&'static str>,
  #[serde(skip_serializing_if = "Option::is_none")]
  response_schema: Option<Value>,
  #[serde(skip_serializing_if = "Option::is_none")]
  thinking_config: Option<ThinkingConfig>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ThinkingConfig {
  thinking_budget: u32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
  #[serde(default)]
  candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
  content: Option<Content>,
}

// ─── Response hygiene ────────────────────────────────────────────────────────

/// Pull a JSON object out of model text that may be wrapped in prose or
/// ```` ```json ```` fences. Returns the outermost `{…}` span when one
/// exists, otherwise the fence-stripped text.
fn clean_json_text(text: &str) -> String {
  if let (Some(start), Some(end)) = (text.find('{'), text.rfind('}'))
    && start < end
  {
    return text[start..=end].to_owned();
  }
  text
    .replace("```json", "")
    .replace("```", "")
    .trim()
    .to_owned()
}

// ─── Client ──────────────────────────────────────────────────────────────────

impl GeminiOracle {
  pub fn new(config: OracleConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config })
  }

  fn url(&self, model: &str) -> String {
    format!(
      "{}/v1beta/models/{}:generateContent",
      self.config.base_url.trim_end_matches('/'),
      model,
    )
  }

  /// One request/response exchange. Returns the first candidate's text.
  async fn generate(&self, model: &str, body: &GenerateBody) -> Result<String> {
    tracing::debug!(model, "issuing generation request");

    let resp = self
      .client
      .post(self.url(model))
      .header("x-goog-api-key", &self.config.api_key)
      .json(body)
      .send()
      .await?;

    let status = resp.status();
    if !status.is_success() {
      let body = resp.text().await.unwrap_or_default();
      return Err(Error::Api { status, body });
    }

    let parsed: GenerateResponse = resp.json().await?;
    parsed
      .candidates
      .into_iter()
      .next()
      .and_then(|c| c.content)
      .and_then(|c| c.parts.into_iter().next())
      .and_then(|p| p.text)
      .filter(|t| !t.trim().is_empty())
      .ok_or(Error::EmptyResponse)
  }

  /// Structured generation: prompt + schema (+ optional seed) → typed value.
  async fn generate_json<T: DeserializeOwned>(
    &self,
    model: &str,
    prompt: String,
    system: Option<String>,
    response_schema: Value,
    seed: Option<Seed>,
    skip_thinking: bool,
  ) -> Result<T> {
    let body = GenerateBody {
      contents: vec![Content::text(Some("user"), prompt)],
      system_instruction: system.map(|s| Content::text(None, s)),
      generation_config: GenerationConfig {
        seed: seed.map(|s| s.0),
        response_mime_type: Some("application/json"),
        response_schema: Some(response_schema),
        thinking_config: skip_thinking.then_some(ThinkingConfig { thinking_budget: 0 }),
      },
    };

    let text = self.generate(model, &body).await?;
    Ok(serde_json::from_str(&clean_json_text(&text))?)
  }
}

// ─── Oracle impl ─────────────────────────────────────────────────────────────

impl Oracle for GeminiOracle {
  type Error = Error;

  async fn daily_fortune(
    &self,
    sign: ZodiacSign,
    context: &SubjectContext,
    seed: Seed,
  ) -> Result<FortuneReading> {
    let prompt = prompt::fortune(sign, context, Local::now().date_naive());
    self
      .generate_json(
        &self.config.fast_model,
        prompt,
        None,
        schema::fortune(),
        Some(seed),
        false,
      )
      .await
  }

  async fn match_analysis(
    &self,
    first: ZodiacSign,
    second: ZodiacSign,
    _context: &SubjectContext,
    seed: Seed,
  ) -> Result<MatchReading> {
    self
      .generate_json(
        &self.config.fast_model,
        prompt::match_analysis(first, second),
        None,
        schema::match_analysis(),
        Some(seed),
        false,
      )
      .await
  }

  async fn mystery_box(
    &self,
    sign: ZodiacSign,
    _context: &SubjectContext,
    seed: Seed,
  ) -> Result<MysteryBoxReading> {
    self
      .generate_json(
        &self.config.fast_model,
        prompt::mystery_box(sign),
        None,
        schema::mystery_box(),
        Some(seed),
        false,
      )
      .await
  }

  async fn pet_reply(
    &self,
    pet: &PetPersona,
    context: &SubjectContext,
    sign: ZodiacSign,
    user_input: Option<&str>,
  ) -> Result<PetReply> {
    // Latency matters more than depth here: thinking is disabled.
    self
      .generate_json(
        &self.config.fast_model,
        prompt::pet_message(pet, context, sign, user_input),
        Some(prompt::pet_system(pet)),
        schema::pet_reply(),
        None,
        true,
      )
      .await
  }

  async fn advise(
    &self,
    message: &str,
    history: &[ChatTurn],
    context: &SubjectContext,
    sign: ZodiacSign,
  ) -> Result<String> {
    let contents = prompt::advisor_turns(message, history)
      .into_iter()
      .map(|turn| {
        let role = match turn.role {
          ChatRole::User => "user",
          ChatRole::Model => "model",
        };
        Content::text(Some(role), turn.text)
      })
      .collect();

    let body = GenerateBody {
      contents,
      system_instruction: Some(Content::text(
        None,
        prompt::advisor_system(context, sign),
      )),
      generation_config: GenerationConfig::default(),
    };

    match self.generate(&self.config.deep_model, &body).await {
      Ok(text) => Ok(text),
      // An empty answer reads as haze, not as an outage.
      Err(Error::EmptyResponse) => Ok("The starfield is hazy right now...".to_owned()),
      Err(e) => Err(e),
    }
  }
}
