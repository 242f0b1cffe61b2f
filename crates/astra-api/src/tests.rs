//! Router-level tests driven through `tower::ServiceExt::oneshot`.

use std::sync::{Arc, Mutex};

use astra_core::{
  companion::{ChatTurn, PetPersona, PetReply},
  history::{HistoryEntry, HistoryQuery},
  oracle::Oracle,
  profile::{SubjectContext, UserProfile},
  reading::{FortuneReading, MatchReading, MysteryBoxReading},
  seed::Seed,
  sign::ZodiacSign,
  store::ProfileStore,
};
use axum::{
  Router,
  body::Body,
  http::{Request, StatusCode, header},
};
use serde_json::{Value, json};
use tower::ServiceExt as _;
use uuid::Uuid;

use crate::api_router;

// ─── Fakes ───────────────────────────────────────────────────────────────────

/// Deterministic oracle; flips to all-errors when `fail` is set.
struct ScriptedOracle {
  fail: bool,
}

impl ScriptedOracle {
  fn err(&self) -> Result<(), std::io::Error> {
    if self.fail {
      Err(std::io::Error::other("oracle unreachable"))
    } else {
      Ok(())
    }
  }
}

impl Oracle for ScriptedOracle {
  type Error = std::io::Error;

  async fn daily_fortune(
    &self,
    sign: ZodiacSign,
    _context: &SubjectContext,
    seed: Seed,
  ) -> Result<FortuneReading, Self::Error> {
    self.err()?;
    let score = (seed.0 % 101) as u8;
    Ok(FortuneReading {
      summary: format!("{} day", sign.code()),
      overall_score: score,
      love: score,
      love_detail: "steady".into(),
      work: score,
      work_detail: "focused".into(),
      health: score,
      health_detail: "rested".into(),
      money: score,
      money_detail: "hold".into(),
      lucky_color: "indigo".into(),
      lucky_number: seed.0 % 10,
      best_match: "Libra".into(),
      suggestion: "breathe".into(),
    })
  }

  async fn match_analysis(
    &self,
    first: ZodiacSign,
    second: ZodiacSign,
    _context: &SubjectContext,
    seed: Seed,
  ) -> Result<MatchReading, Self::Error> {
    self.err()?;
    Ok(MatchReading {
      score: (seed.0 % 101) as u8,
      analysis: format!("{} meets {}", first.code(), second.code()),
      advice: "talk".into(),
    })
  }

  async fn mystery_box(
    &self,
    sign: ZodiacSign,
    _context: &SubjectContext,
    seed: Seed,
  ) -> Result<MysteryBoxReading, Self::Error> {
    self.err()?;
    Ok(MysteryBoxReading {
      traits: vec![format!("{}-{}", sign.code(), seed.0)],
      strengths: vec!["calm".into()],
      weaknesses: vec!["stubborn".into()],
      outlook: "bright".into(),
      spirit_animal: "otter".into(),
    })
  }

  async fn pet_reply(
    &self,
    pet: &PetPersona,
    _context: &SubjectContext,
    _sign: ZodiacSign,
    _user_input: Option<&str>,
  ) -> Result<PetReply, Self::Error> {
    self.err()?;
    Ok(PetReply {
      text: format!("{} purrs", pet.name),
      mood_change: 1,
      emotion: "😺".into(),
    })
  }

  async fn advise(
    &self,
    message: &str,
    _history: &[ChatTurn],
    _context: &SubjectContext,
    _sign: ZodiacSign,
  ) -> Result<String, Self::Error> {
    self.err()?;
    Ok(format!("re: {message}"))
  }
}

#[derive(Default)]
struct MemStore {
  profiles: Mutex<Vec<UserProfile>>,
  entries: Mutex<Vec<HistoryEntry>>,
}

impl ProfileStore for MemStore {
  type Error = std::convert::Infallible;

  async fn get_profile(&self, uid: Uuid) -> Result<Option<UserProfile>, Self::Error> {
    Ok(
      self
        .profiles
        .lock()
        .unwrap()
        .iter()
        .find(|p| p.uid == uid)
        .cloned(),
    )
  }

  async fn save_profile(&self, profile: UserProfile) -> Result<UserProfile, Self::Error> {
    let mut profiles = self.profiles.lock().unwrap();
    profiles.retain(|p| p.uid != profile.uid);
    profiles.push(profile.clone());
    Ok(profile)
  }

  async fn delete_profile(&self, uid: Uuid) -> Result<bool, Self::Error> {
    let mut profiles = self.profiles.lock().unwrap();
    let before = profiles.len();
    profiles.retain(|p| p.uid != uid);
    Ok(profiles.len() < before)
  }

  async fn append_history(&self, entry: HistoryEntry) -> Result<(), Self::Error> {
    self.entries.lock().unwrap().push(entry);
    Ok(())
  }

  async fn list_history(&self, _: &HistoryQuery) -> Result<Vec<HistoryEntry>, Self::Error> {
    Ok(self.entries.lock().unwrap().clone())
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn router(fail: bool) -> (Router, Arc<MemStore>) {
  let store = Arc::new(MemStore::default());
  let app = api_router(store.clone(), Arc::new(ScriptedOracle { fail }));
  (app, store)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
  Request::builder()
    .method("POST")
    .uri(uri)
    .header(header::CONTENT_TYPE, "application/json")
    .body(Body::from(body.to_string()))
    .unwrap()
}

fn get(uri: &str) -> Request<Body> {
  Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
  let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
    .await
    .unwrap();
  serde_json::from_slice(&bytes).unwrap()
}

// ─── Readings ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn fortune_requires_a_complete_context() {
  let (app, _) = router(false);
  let response = app
    .oneshot(post_json("/fortune", json!({ "sign": "Leo" })))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn fortune_carries_seed_and_fingerprint() {
  let (app, store) = router(false);
  let response = app
    .oneshot(post_json(
      "/fortune",
      json!({
        "sign": "Leo",
        "seed": 42,
        "name": "Lena",
        "birthDate": "1990-05-20",
      }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let body = json_body(response).await;
  assert_eq!(body["kind"], "fortune");
  assert_eq!(body["seed"], 42);
  assert_eq!(body["reading"]["overallScore"], 42);
  assert!(body["fingerprint"].as_str().unwrap().len() == 16);

  // The request landed in the history log.
  assert_eq!(store.entries.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn oracle_failure_is_a_502_with_a_generic_message() {
  let (app, _) = router(true);
  let response = app
    .oneshot(post_json(
      "/mystery",
      json!({ "sign": "Virgo", "seed": 1 }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
  let body = json_body(response).await;
  assert_eq!(body["error"], "generation failed");
}

// ─── Replay ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn replay_unknown_sign_is_a_404() {
  let (app, store) = router(false);
  let response = app
    .oneshot(get("/replay?s=Ophiuchus&seed=1"))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
  assert!(store.entries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn replay_pair_link_yields_a_match_reading() {
  let (app, _) = router(false);
  let response = app
    .oneshot(get("/replay?s1=Leo&s2=Aries&seed=5"))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let body = json_body(response).await;
  assert_eq!(body["kind"], "match");
  assert_eq!(body["seed"], 5);
  assert_eq!(body["reading"]["analysis"], "Leo meets Aries");
}

#[tokio::test]
async fn replay_malformed_seed_is_a_400() {
  let (app, _) = router(false);
  let response = app.oneshot(get("/replay?s=Leo&seed=banana")).await.unwrap();
  assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ─── Companions ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn pet_falls_back_when_the_oracle_is_down() {
  let (app, _) = router(true);
  let response = app
    .oneshot(post_json(
      "/pet",
      json!({
        "pet": { "species": "Cat", "name": "Nova", "mood": 70 },
        "sign": "Leo",
      }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);

  let body = json_body(response).await;
  assert_eq!(body["text"], PetReply::fallback().text);
  assert_eq!(body["moodChange"], 0);
}

#[tokio::test]
async fn chat_relays_the_advisor_reply() {
  let (app, _) = router(false);
  let response = app
    .oneshot(post_json(
      "/chat",
      json!({ "message": "hello", "sign": "Leo" }),
    ))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  assert_eq!(json_body(response).await["reply"], "re: hello");
}

// ─── Profiles ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn profile_upsert_then_share_reward() {
  let (app, _) = router(false);
  let uid = Uuid::new_v4();

  let response = app
    .clone()
    .oneshot({
      Request::builder()
        .method("PUT")
        .uri(format!("/profiles/{uid}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(json!({ "name": "Lena" }).to_string()))
        .unwrap()
    })
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let body = json_body(response).await;
  assert_eq!(body["name"], "Lena");
  assert_eq!(body["star_energy"], 1000);

  let response = app
    .oneshot(post_json(&format!("/profiles/{uid}/share"), json!({})))
    .await
    .unwrap();
  let body = json_body(response).await;
  assert_eq!(body["share_count"], 1);
  assert_eq!(body["star_energy"], 1005);
}

#[tokio::test]
async fn check_in_grants_once_per_day() {
  let (app, store) = router(false);
  let uid = Uuid::new_v4();
  store
    .save_profile(UserProfile::new(uid))
    .await
    .unwrap();

  let uri = format!("/profiles/{uid}/check-in");
  let first = json_body(
    app
      .clone()
      .oneshot(post_json(&uri, json!({})))
      .await
      .unwrap(),
  )
  .await;
  assert_eq!(first["granted"], true);
  assert_eq!(first["profile"]["star_energy"], 1010);

  let second = json_body(app.oneshot(post_json(&uri, json!({}))).await.unwrap()).await;
  assert_eq!(second["granted"], false);
  assert_eq!(second["profile"]["star_energy"], 1010);
}

#[tokio::test]
async fn missing_profile_is_a_404() {
  let (app, _) = router(false);
  let response = app
    .oneshot(get(&format!("/profiles/{}", Uuid::new_v4())))
    .await
    .unwrap();
  assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ─── History ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn history_lists_recorded_readings() {
  let (app, _) = router(false);

  app
    .clone()
    .oneshot(post_json(
      "/mystery",
      json!({ "sign": "Virgo", "seed": 9 }),
    ))
    .await
    .unwrap();

  let response = app.oneshot(get("/history")).await.unwrap();
  assert_eq!(response.status(), StatusCode::OK);
  let body = json_body(response).await;
  assert_eq!(body.as_array().unwrap().len(), 1);
  assert_eq!(body[0]["kind"], "mystery_box");
  assert_eq!(body[0]["seed"], 9);
}
