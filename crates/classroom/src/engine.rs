//! Per-persona response pipeline with cognitive scaffolding.
//!
//! A persona's turn runs Estimating → Refining → Strategy-Selected →
//! Generating, strictly in sequence. Failures at the estimation or
//! refinement stages degrade to defaults; a failure at generation surfaces
//! as the reply text itself so the discussion can continue.

use std::sync::Arc;

use chalkmate_core::{
    CognitiveAssessment, CompletionRequest, CompletionService, DirectStyle, ElevateStyle, Persona,
    ResponseMode,
};
use tracing::{debug, info, warn};

use crate::context::ConversationContext;
use crate::estimator::CognitiveEstimator;

const REFINER_ROLE: &str = "Restate the situation through the persona's lens.";

/// A persona's resolved turn: the reply plus the assessment that shaped it.
#[derive(Debug, Clone)]
pub struct PersonaReply {
    pub text: String,
    pub assessment: CognitiveAssessment,
}

/// Drafts persona replies, selecting elevate vs. direct strategy per persona.
pub struct ResponseEngine {
    service: Arc<dyn CompletionService>,
    estimator: CognitiveEstimator,
    control_temperature: f32,
    reply_temperature: f32,
    history_window: usize,
}

impl ResponseEngine {
    pub fn new(
        service: Arc<dyn CompletionService>,
        control_temperature: f32,
        reply_temperature: f32,
        history_window: usize,
    ) -> Self {
        Self {
            estimator: CognitiveEstimator::new(service.clone(), control_temperature),
            service,
            control_temperature,
            reply_temperature,
            history_window,
        }
    }

    /// Produce `persona`'s reply to `utterance`.
    ///
    /// Never fails: estimation and refinement degrade to defaults, and a
    /// generation failure yields a reply carrying the error description.
    pub async fn respond(
        &self,
        persona: &Persona,
        utterance: &str,
        ctx: &ConversationContext,
    ) -> PersonaReply {
        let recent = ctx.recent_summary(self.history_window);

        // Stage 1: theory-of-mind estimate (infallible by contract).
        let mut assessment = self.estimator.estimate(&recent, utterance).await;

        // Stage 2: restate the estimate through the persona's role lens.
        let refined = self.refine(persona, &assessment).await;

        // Stage 3: strategy selection.
        let (instruction, strategy) = match persona.mode {
            ResponseMode::Elevate { style } => elevate_instruction(style, &assessment),
            ResponseMode::Direct { style } => (direct_instruction(style), "direct answer".into()),
        };
        assessment.strategy = Some(strategy);

        info!(
            persona = %persona.name,
            level = %assessment.level,
            strategy = assessment.strategy.as_deref().unwrap_or("-"),
            "Strategy selected"
        );

        // Stage 4: generation, soft-failing into the reply text.
        let prompt = match persona.mode {
            ResponseMode::Elevate { .. } => format!(
                "Scene: a peer study group working through C programming together.\n\
                Conversation history:\n{recent}\n\n\
                Your read of the situation: {refined}\n\n\
                Ground rules:\n\
                1. Talk like a real person — no lists, no markdown headings, no stiff formatting.\n\
                2. Pick up the thread naturally from the last speaker.\n\
                3. {instruction}\n\n\
                Reply as {name} in under 100 words.",
                name = persona.name,
            ),
            ResponseMode::Direct { .. } => {
                let reference = ctx.lookup_topics(utterance);
                format!(
                    "Scene: a peer study group working through C programming together.\n\
                    Conversation history:\n{recent}\n\n\
                    Course reference:\n{reference}\n\n\
                    Ground rules:\n\
                    1. Talk like a real person — no lists, no stiff formatting.\n\
                    2. {instruction}\n\
                    3. Warm but professional; nothing mechanical.\n\n\
                    Reply as {name} in under 100 words.",
                    name = persona.name,
                )
            }
        };

        let request =
            CompletionRequest::free_text(&persona.role_description, prompt, self.reply_temperature);

        let text = match self.service.complete(request).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!(persona = %persona.name, error = %e, "Generation failed, surfacing error reply");
                format!("({} could not respond: {e})", persona.name)
            }
        };

        PersonaReply { text, assessment }
    }

    /// One-sentence restatement of the assessment through the persona's role.
    /// Degrades to the raw assessment JSON on failure.
    async fn refine(&self, persona: &Persona, assessment: &CognitiveAssessment) -> String {
        let state_json = serde_json::to_string(assessment).unwrap_or_default();
        let prompt = format!(
            "Role: {}\nProfile: {}\nTheory-of-mind state: {state_json}\n\
            In one sentence, restate your read of the current situation from this role's perspective.",
            persona.name, persona.role_description,
        );

        let request = CompletionRequest::free_text(REFINER_ROLE, prompt, self.control_temperature);

        match self.service.complete(request).await {
            Ok(thought) => thought,
            Err(e) => {
                debug!(persona = %persona.name, error = %e, "Refinement failed, passing raw assessment forward");
                state_json
            }
        }
    }
}

/// Build the no-direct-answer scaffolding instruction: target one level
/// above the assessed level, capped at Create.
fn elevate_instruction(style: ElevateStyle, assessment: &CognitiveAssessment) -> (String, String) {
    let current = assessment.level;
    let target = current.one_above();

    let instruction = match style {
        ElevateStyle::Metaphor => format!(
            "Use a metaphor or a guiding question to lead the student into the {} level \
            (that is: {}). Do not hand over code or the answer — let the insight land on its own.",
            target.display_name(),
            target.guidance(),
        ),
        ElevateStyle::Counterexample => format!(
            "Raise one sharp counterexample or objection that forces the student to think at \
            the {} level (that is: {}). Point at the gap in their reasoning.",
            target.display_name(),
            target.guidance(),
        ),
    };

    let strategy = format!(
        "elevate {} -> {}",
        current.display_name(),
        target.display_name()
    );

    (instruction, strategy)
}

/// Build the concrete-answer instruction for non-scaffolding personas.
fn direct_instruction(style: DirectStyle) -> String {
    match style {
        DirectStyle::CodeFix => "Give the exact code snippet or syntax correction the student \
            needs. Be practical and rigorous — solve the concrete problem in front of them."
            .into(),
        DirectStyle::SystemsSummary => "Summarize from the underlying principles (memory, the \
            runtime, the system beneath the language). Lift the preceding discussion into one \
            authoritative conclusion."
            .into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeIndex;
    use crate::test_support::{FailingCompletion, SequentialMockCompletion};
    use chalkmate_core::error::CompletionError;
    use chalkmate_core::CognitiveLevel;

    fn sparker() -> Persona {
        Persona::new(
            "Insight Sparker",
            "You turn abstract C concepts into everyday metaphors.",
            ResponseMode::Elevate {
                style: ElevateStyle::Metaphor,
            },
        )
    }

    fn expert() -> Persona {
        Persona::new(
            "Synthesis Expert",
            "You integrate scattered points into systems-level conclusions.",
            ResponseMode::Direct {
                style: DirectStyle::SystemsSummary,
            },
        )
    }

    fn ctx() -> ConversationContext {
        ConversationContext::new(KnowledgeIndex::course_c_programming())
    }

    fn assessment_at(level: CognitiveLevel) -> CognitiveAssessment {
        CognitiveAssessment {
            level,
            ..CognitiveAssessment::default_understand()
        }
    }

    #[test]
    fn elevate_targets_one_level_up() {
        let (instruction, strategy) = elevate_instruction(
            ElevateStyle::Metaphor,
            &assessment_at(CognitiveLevel::Understand),
        );
        assert!(instruction.contains("Apply"));
        assert_eq!(strategy, "elevate Understand -> Apply");
    }

    #[test]
    fn elevate_from_evaluate_targets_create_never_beyond() {
        let (instruction, strategy) = elevate_instruction(
            ElevateStyle::Counterexample,
            &assessment_at(CognitiveLevel::Evaluate),
        );
        assert!(instruction.contains("Create"));
        assert_eq!(strategy, "elevate Evaluate -> Create");

        let (_, capped) = elevate_instruction(
            ElevateStyle::Counterexample,
            &assessment_at(CognitiveLevel::Create),
        );
        assert_eq!(capped, "elevate Create -> Create");
    }

    #[tokio::test]
    async fn respond_runs_estimate_refine_generate() {
        // Call 1: estimation JSON. Call 2: refinement. Call 3: generation.
        let service = Arc::new(SequentialMockCompletion::new(vec![
            Ok(r#"{"belief":"b","intention":"i","cognitive_level":"Apply","emotion":"e"}"#.into()),
            Ok("The student is ready to be nudged upward.".into()),
            Ok("Think of a pointer as a house address written on a sticky note.".into()),
        ]));

        let engine = ResponseEngine::new(service.clone(), 0.7, 0.8, 6);
        let reply = engine.respond(&sparker(), "what is a pointer?", &ctx()).await;

        assert_eq!(service.call_count(), 3);
        assert!(reply.text.contains("sticky note"));
        assert_eq!(reply.assessment.level, CognitiveLevel::Apply);
        assert_eq!(
            reply.assessment.strategy.as_deref(),
            Some("elevate Apply -> Analyze")
        );
    }

    #[tokio::test]
    async fn direct_persona_records_direct_strategy() {
        let service = Arc::new(SequentialMockCompletion::new(vec![
            Ok(r#"{"belief":"b","intention":"i","cognitive_level":"Remember","emotion":"e"}"#.into()),
            Ok("refined".into()),
            Ok("malloc allocates from the heap; free returns it.".into()),
        ]));

        let engine = ResponseEngine::new(service, 0.7, 0.8, 6);
        let reply = engine.respond(&expert(), "怎么用malloc的指针", &ctx()).await;

        assert_eq!(reply.assessment.strategy.as_deref(), Some("direct answer"));
        assert!(reply.text.contains("heap"));
    }

    #[tokio::test]
    async fn refinement_failure_degrades_without_aborting() {
        let service = Arc::new(SequentialMockCompletion::new(vec![
            Ok(r#"{"belief":"b","intention":"i","cognitive_level":"Understand","emotion":"e"}"#
                .into()),
            Err(CompletionError::Timeout("refine timed out".into())),
            Ok("final reply".into()),
        ]));

        let engine = ResponseEngine::new(service, 0.7, 0.8, 6);
        let reply = engine.respond(&sparker(), "hm", &ctx()).await;
        assert_eq!(reply.text, "final reply");
    }

    #[tokio::test]
    async fn generation_failure_becomes_the_reply() {
        let engine = ResponseEngine::new(Arc::new(FailingCompletion), 0.7, 0.8, 6);
        let reply = engine.respond(&expert(), "anything", &ctx()).await;

        assert!(reply.text.contains("Synthesis Expert could not respond"));
        assert!(reply.text.contains("connection refused"));
        // the turn still completed with a usable assessment
        assert_eq!(reply.assessment.level, CognitiveLevel::Understand);
    }
}
