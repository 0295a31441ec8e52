//! Discussion loop: orchestration glue over controller, engine, and context.
//!
//! Strictly sequential: each call to [`DiscussionLoop::step`] fully resolves
//! one persona turn (selection, estimation, refinement, generation) before
//! touching the transcript. The append happens last, so dropping an
//! in-flight step never leaves a partial turn behind.

use chalkmate_core::{CognitiveAssessment, Result, Speaker};
use tracing::debug;

use crate::context::ConversationContext;
use crate::controller::SpeakerController;
use crate::engine::ResponseEngine;

/// Framing used before anyone has spoken.
const OPENING_SITUATION: &str = "The C-programming lab session has just started";

/// One fully resolved persona turn.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    /// Which persona spoke.
    pub persona: String,
    /// What it said.
    pub reply: String,
    /// The theory-of-mind readout behind the reply.
    pub assessment: CognitiveAssessment,
}

/// Drives the classroom discussion turn by turn.
pub struct DiscussionLoop {
    context: ConversationContext,
    controller: SpeakerController,
    engine: ResponseEngine,
}

impl DiscussionLoop {
    pub fn new(
        context: ConversationContext,
        controller: SpeakerController,
        engine: ResponseEngine,
    ) -> Self {
        Self {
            context,
            controller,
            engine,
        }
    }

    pub fn context(&self) -> &ConversationContext {
        &self.context
    }

    /// Record a student utterance. The next step will respond to it.
    pub fn student_says(&mut self, text: &str) {
        self.context.append(Speaker::Student, text);
    }

    /// Resolve one persona turn: select a speaker, generate its reply,
    /// record it, and return the outcome.
    pub async fn step(&mut self) -> Result<TurnOutcome> {
        let (last_speaker, last_text) = match self.context.last_turn() {
            Some(turn) => (turn.speaker.clone(), turn.text.clone()),
            None => (Speaker::System, OPENING_SITUATION.to_string()),
        };

        debug!(%last_speaker, "Resolving next turn");

        let persona = self
            .controller
            .select_speaker(&last_speaker, &last_text, &self.context)
            .await?;

        let reply = self.engine.respond(&persona, &last_text, &self.context).await;

        // The turn is fully resolved; only now does it enter the transcript.
        self.context
            .append(Speaker::persona(&persona.name), &reply.text);

        Ok(TurnOutcome {
            persona: persona.name,
            reply: reply.text,
            assessment: reply.assessment,
        })
    }
}
