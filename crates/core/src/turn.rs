//! Turn and speaker domain types.
//!
//! A discussion is an ordered sequence of turns. Ordering is append order
//! and is semantically significant: the recency window and the "last
//! speaker" rules in the controller both depend on it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who produced an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Speaker {
    /// The human learner.
    Student,
    /// One of the teaching-assistant personas, by unique name.
    Persona(String),
    /// Framing messages from the orchestrating loop itself.
    System,
}

impl Speaker {
    pub fn persona(name: impl Into<String>) -> Self {
        Self::Persona(name.into())
    }

    pub fn is_student(&self) -> bool {
        matches!(self, Self::Student)
    }

    /// The persona name, if this speaker is a persona.
    pub fn persona_name(&self) -> Option<&str> {
        match self {
            Self::Persona(name) => Some(name),
            _ => None,
        }
    }
}

impl std::fmt::Display for Speaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Student => write!(f, "Student"),
            Self::Persona(name) => write!(f, "{name}"),
            Self::System => write!(f, "System"),
        }
    }
}

/// A single recorded utterance. Immutable once appended; owned exclusively
/// by the conversation context, which assigns the sequence index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Turn {
    /// Position in the transcript. Monotonic, never reused.
    pub seq: usize,

    /// Who spoke.
    pub speaker: Speaker,

    /// The utterance text.
    pub text: String,

    /// When the turn was recorded.
    pub timestamp: DateTime<Utc>,
}

impl Turn {
    pub fn new(seq: usize, speaker: Speaker, text: impl Into<String>) -> Self {
        Self {
            seq,
            speaker,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    /// Format as a transcript line: `speaker: text`.
    pub fn summary_line(&self) -> String {
        format!("{}: {}", self.speaker, self.text)
    }
}
