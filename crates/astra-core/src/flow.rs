//! Per-flow request state machine.
//!
//! Each result-producing flow (fortune, match, mystery box) owns one of
//! these: `Idle → AwaitingContext → Requesting → {Ready | Failed}`.
//! `AwaitingContext` is skipped when the context arrived complete (from a
//! deep link or a filled profile). At most one request is in flight per flow;
//! a `Failed` flow moves again only on an explicit retry.

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlowState {
  #[default]
  Idle,
  /// Required subject context is missing; the user is being prompted.
  AwaitingContext,
  /// A generation request is in flight. No new request may start.
  Requesting,
  Ready,
  Failed,
}

impl FlowState {
  fn name(self) -> &'static str {
    match self {
      Self::Idle => "idle",
      Self::AwaitingContext => "awaiting context",
      Self::Requesting => "requesting",
      Self::Ready => "ready",
      Self::Failed => "failed",
    }
  }

  fn invalid(self, event: &'static str) -> Error {
    Error::InvalidTransition {
      state: self.name(),
      event,
    }
  }

  /// Start a flow. Goes to `Requesting` when the context is complete, to
  /// `AwaitingContext` otherwise. Rejected while a request is in flight.
  pub fn begin(self, context_complete: bool) -> Result<Self> {
    match self {
      Self::Idle | Self::AwaitingContext => Ok(if context_complete {
        Self::Requesting
      } else {
        Self::AwaitingContext
      }),
      other => Err(other.invalid("begin")),
    }
  }

  /// The user supplied the missing context; the request may now go out.
  pub fn context_supplied(self) -> Result<Self> {
    match self {
      Self::AwaitingContext => Ok(Self::Requesting),
      other => Err(other.invalid("context supplied")),
    }
  }

  pub fn succeed(self) -> Result<Self> {
    match self {
      Self::Requesting => Ok(Self::Ready),
      other => Err(other.invalid("succeed")),
    }
  }

  pub fn fail(self) -> Result<Self> {
    match self {
      Self::Requesting => Ok(Self::Failed),
      other => Err(other.invalid("fail")),
    }
  }

  /// Explicit user-triggered retry after a failure. Never automatic.
  pub fn retry(self) -> Result<Self> {
    match self {
      Self::Failed => Ok(Self::Requesting),
      other => Err(other.invalid("retry")),
    }
  }

  /// Back/reset. Always allowed; abandoning `Requesting` abandons interest
  /// in the in-flight response (the response, if any, is discarded).
  pub fn reset(self) -> Self {
    Self::Idle
  }
}
