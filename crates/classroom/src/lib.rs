//! The chalkmate classroom: a simulated peer-tutoring discussion.
//!
//! Four teaching-assistant personas take turns responding to a student in a
//! C-programming course. Each full turn runs through:
//!
//! 1. **SpeakerController** picks who speaks next (direct address,
//!    anti-repetition pool, LLM scoring with a random fallback, tie-break)
//! 2. **CognitiveEstimator** infers the student's belief / intention /
//!    Bloom level / emotion from the recent context
//! 3. **ResponseEngine** selects a scaffolding strategy (elevate one
//!    level vs. answer directly) and drafts the persona's reply
//! 4. **ConversationContext** records the resolved turn
//!
//! The discussion loop is strictly sequential: a turn fully resolves before
//! the next begins, and the transcript is appended only after resolution, so
//! aborting an in-flight turn never leaves a partial record.

pub mod context;
pub mod controller;
pub mod discussion;
pub mod engine;
pub mod estimator;
pub mod knowledge;
pub mod roster;

pub use context::ConversationContext;
pub use controller::SpeakerController;
pub use discussion::{DiscussionLoop, TurnOutcome};
pub use engine::{PersonaReply, ResponseEngine};
pub use estimator::CognitiveEstimator;
pub use knowledge::{KnowledgeEntry, KnowledgeIndex};
pub use roster::default_roster;

#[cfg(test)]
pub(crate) mod test_support;
