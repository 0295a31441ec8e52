//! Per-turn theory-of-mind inference.
//!
//! One JSON-constrained completion classifies the student's belief,
//! intention, Bloom level, and emotion. The response is untrusted text:
//! parse failures and transport failures both degrade to a default
//! assessment with level `Understand`. This component never errors.

use std::sync::Arc;

use chalkmate_core::{CognitiveAssessment, CognitiveLevel, CompletionRequest, CompletionService};
use serde::Deserialize;
use tracing::{debug, warn};

const ESTIMATOR_ROLE: &str = "You are an educational-psychology expert. Respond with JSON only.";

/// Infers the student's cognitive state from the recent conversation.
pub struct CognitiveEstimator {
    service: Arc<dyn CompletionService>,
    temperature: f32,
}

impl CognitiveEstimator {
    pub fn new(service: Arc<dyn CompletionService>, temperature: f32) -> Self {
        Self {
            service,
            temperature,
        }
    }

    /// Estimate the student's state behind `utterance`, given the recent
    /// context summary. Infallible by contract.
    pub async fn estimate(&self, recent_context: &str, utterance: &str) -> CognitiveAssessment {
        let prompt = format!(
            "Conversation history:\n{recent_context}\n\n\
            Current utterance: \"{utterance}\"\n\n\
            Infer the student's mental state and return a JSON object.\n\
            Most importantly, classify the student's cognitive level on Bloom's taxonomy:\n\
            记忆/Remember, 理解/Understand, 应用/Apply, 分析/Analyze, 评价/Evaluate, 创造/Create.\n\n\
            Return exactly:\n\
            {{\n\
              \"belief\": \"what the student currently understands\",\n\
              \"intention\": \"what the student is trying to solve\",\n\
              \"cognitive_level\": \"one of the six levels above\",\n\
              \"emotion\": \"confident / confused / eager / ...\"\n\
            }}"
        );

        let request = CompletionRequest::json(ESTIMATOR_ROLE, prompt, self.temperature);

        let raw = match self.service.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Estimation call failed, using default assessment");
                return CognitiveAssessment::default_understand();
            }
        };

        let assessment = Self::parse(&raw);
        debug!(level = %assessment.level, "Student state estimated");
        assessment
    }

    /// Parse a raw JSON response, defaulting on any malformation.
    fn parse(raw: &str) -> CognitiveAssessment {
        let parsed: RawAssessment = match serde_json::from_str(raw) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "Assessment JSON failed to parse, using default");
                return CognitiveAssessment::default_understand();
            }
        };

        let level = CognitiveLevel::parse_label(&parsed.cognitive_level)
            .unwrap_or(CognitiveLevel::Understand);

        CognitiveAssessment {
            belief: parsed.belief,
            intention: parsed.intention,
            level,
            emotion: parsed.emotion,
            strategy: None,
        }
    }
}

/// Wire shape of the estimation response. Field aliases accept the
/// capitalized keys some models emit.
#[derive(Debug, Deserialize)]
struct RawAssessment {
    #[serde(default, alias = "Belief")]
    belief: String,

    #[serde(default, alias = "Intention")]
    intention: String,

    #[serde(default, alias = "Cognitive_Level", alias = "CognitiveLevel")]
    cognitive_level: String,

    #[serde(default, alias = "Emotion")]
    emotion: String,
}
