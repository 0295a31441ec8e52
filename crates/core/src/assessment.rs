//! The per-turn "theory of mind" estimate of the student's state.

use serde::{Deserialize, Serialize};

use crate::bloom::CognitiveLevel;

/// A structured classification of the student's mental state, produced
/// fresh each turn by the cognitive estimator and not persisted beyond the
/// turn that generated it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CognitiveAssessment {
    /// What the student currently seems to believe about the material.
    pub belief: String,

    /// What the student is trying to accomplish.
    pub intention: String,

    /// Assessed Bloom level of the utterance.
    pub level: CognitiveLevel,

    /// Apparent emotional state (confident, confused, eager, ...).
    pub emotion: String,

    /// Which response strategy was chosen for this assessment, filled in by
    /// the response engine for observability.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}

impl CognitiveAssessment {
    /// The default used whenever estimation fails: level `Understand`,
    /// everything else empty.
    pub fn default_understand() -> Self {
        Self {
            belief: String::new(),
            intention: String::new(),
            level: CognitiveLevel::Understand,
            emotion: String::new(),
            strategy: None,
        }
    }

    /// Compact one-line readout for transcripts and logs.
    pub fn readout(&self) -> String {
        format!(
            "level={} belief={:?} intention={:?} emotion={:?} strategy={}",
            self.level,
            self.belief,
            self.intention,
            self.emotion,
            self.strategy.as_deref().unwrap_or("-"),
        )
    }
}
