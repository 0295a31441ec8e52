//! CompletionService trait: the abstraction over the text-completion backend.
//!
//! The classroom core never talks HTTP. It issues two call shapes: free-text
//! completions and JSON-constrained completions, both of which may fail with
//! a [`CompletionError`]. Callers must treat even a successful JSON-mode
//! response as untrusted text requiring parse-with-fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::CompletionError;

/// A single completion request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The system-role framing (persona role description, scheduler role, ...).
    pub system: String,

    /// The user-role content (the constructed instruction).
    pub user: String,

    /// Sampling temperature (0.0 = deterministic).
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Constrain the response to a parseable JSON object.
    #[serde(default)]
    pub json_mode: bool,
}

fn default_temperature() -> f32 {
    0.7
}

impl CompletionRequest {
    /// An unconstrained natural-language completion.
    pub fn free_text(
        system: impl Into<String>,
        user: impl Into<String>,
        temperature: f32,
    ) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
            json_mode: false,
        }
    }

    /// A completion constrained to emit a JSON object.
    pub fn json(system: impl Into<String>, user: impl Into<String>, temperature: f32) -> Self {
        Self {
            system: system.into(),
            user: user.into(),
            temperature,
            json_mode: true,
        }
    }
}

/// The external text-completion collaborator.
///
/// Implementations must be cancel-safe: dropping an in-flight `complete`
/// future must leave no observable side effects, so the discussion loop can
/// abort a turn without corrupting the transcript.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// A human-readable backend name (e.g. "openai", "deepseek").
    fn name(&self) -> &str;

    /// Send a request and return the raw completion text.
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> std::result::Result<String, CompletionError>;

    /// Health check: can we reach the backend?
    async fn health_check(&self) -> std::result::Result<bool, CompletionError> {
        Ok(true)
    }
}
