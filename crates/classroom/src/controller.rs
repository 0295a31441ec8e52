//! Speaker selection: who talks next.
//!
//! Four rules, applied in order:
//!
//! 1. **Direct address** (absolute priority): a student utterance naming a
//!    persona by any alias picks that persona outright.
//! 2. **Candidate pool**: after a student turn every persona competes; after
//!    a persona turn that persona sits out one round (no back-to-back
//!    speaking); an unrecognized last speaker opens the full roster.
//! 3. **Scoring**: the completion service scores every candidate 0-10 as a
//!    JSON object; fractional or out-of-range values are discarded. Any
//!    failure or empty result degrades to uniform random scores in 1-10.
//! 4. **Selection**: unknown score keys are discarded (neutral 5 if nothing
//!    valid remains); the top scorer wins, except a top-two gap of at most 1
//!    is a tie resolved by coin flip.
//!
//! The random source is owned state, seedable for deterministic tests.

use std::sync::Arc;

use chalkmate_core::error::RosterError;
use chalkmate_core::{CompletionRequest, CompletionService, Persona, Result, Speaker};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

const SCHEDULER_ROLE: &str = "You are the classroom scheduler. Respond with JSON only.";

/// Top-two score gap at or below this is treated as a tie.
const TIE_THRESHOLD: i64 = 1;

/// Neutral score assigned when no valid scores survive filtering.
const NEUTRAL_SCORE: i64 = 5;

/// Decides which persona speaks next.
pub struct SpeakerController {
    roster: Vec<Persona>,
    service: Arc<dyn CompletionService>,
    temperature: f32,
    history_window: usize,
    rng: StdRng,
}

impl SpeakerController {
    pub fn new(
        roster: Vec<Persona>,
        service: Arc<dyn CompletionService>,
        temperature: f32,
        history_window: usize,
    ) -> Self {
        Self {
            roster,
            service,
            temperature,
            history_window,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Replace the random source with a seeded one, for reproducible runs.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn roster(&self) -> &[Persona] {
        &self.roster
    }

    /// Select the next speaker given the last turn.
    ///
    /// Fails only on roster misconfiguration (empty candidate pool);
    /// completion failures degrade to random scoring internally.
    pub async fn select_speaker(
        &mut self,
        last_speaker: &Speaker,
        last_utterance: &str,
        ctx: &crate::context::ConversationContext,
    ) -> Result<Persona> {
        // Rule 1: student direct address bypasses scoring entirely.
        if last_speaker.is_student() {
            if let Some(persona) = self
                .roster
                .iter()
                .find(|p| p.mentioned_in(last_utterance))
            {
                info!(persona = %persona.name, "Student addressed a persona directly");
                return Ok(persona.clone());
            }
        }

        // Rule 2: candidate pool with single-step anti-repetition.
        let pool = self.candidate_pool(last_speaker)?;

        // Rule 3: LLM scoring with a uniform-random fallback.
        let scores = self.score_candidates(&pool, last_speaker, last_utterance, ctx).await;

        // Rule 4: threshold selection over the filtered score map.
        let name = self.pick(&pool, scores);
        let persona = pool
            .into_iter()
            .find(|p| p.name == name)
            .ok_or_else(|| RosterError::UnknownPersona(name.clone()))?;

        info!(persona = %persona.name, "Speaker selected");
        Ok(persona)
    }

    /// The personas eligible to speak after `last_speaker`.
    fn candidate_pool(&self, last_speaker: &Speaker) -> Result<Vec<Persona>> {
        let pool: Vec<Persona> = match last_speaker {
            // Student just spoke: everyone competes.
            Speaker::Student | Speaker::System => self.roster.clone(),
            Speaker::Persona(name) => {
                if self.roster.iter().any(|p| &p.name == name) {
                    // A persona just spoke and the student is silent:
                    // exclude it so nobody speaks twice in a row.
                    self.roster
                        .iter()
                        .filter(|p| &p.name != name)
                        .cloned()
                        .collect()
                } else {
                    // Unrecognized last speaker: open the full roster.
                    self.roster.clone()
                }
            }
        };

        if pool.is_empty() {
            return Err(RosterError::NoEligibleCandidate(format!(
                "no persona eligible after speaker '{last_speaker}'"
            ))
            .into());
        }

        Ok(pool)
    }

    /// Ask the completion service to score each candidate 0-10; degrade to
    /// uniform random scores in 1-10 on any failure.
    async fn score_candidates(
        &mut self,
        pool: &[Persona],
        last_speaker: &Speaker,
        last_utterance: &str,
        ctx: &crate::context::ConversationContext,
    ) -> Vec<(String, i64)> {
        let situation = if last_speaker.is_student() {
            format!("The student just asked: '{last_utterance}'")
        } else {
            format!(
                "Teaching assistant [{last_speaker}] just finished speaking: \
                '{last_utterance}', and the student is staying silent"
            )
        };

        let roles: String = pool
            .iter()
            .map(|p| format!("- {}: {}", p.name, p.role_description))
            .collect::<Vec<_>>()
            .join("\n");

        let names: Vec<&str> = pool.iter().map(|p| p.name.as_str()).collect();

        let prompt = format!(
            "Conversation history:\n{}\n\n\
            Current situation: {situation}\n\n\
            Teaching-assistant roles:\n{roles}\n\n\
            Given the state of the discussion, which assistant is best placed to take \
            the floor and move the teaching forward?\n\
            Candidates: {names:?}\n\n\
            Score every candidate from 0 to 10.\n\
            Return a JSON object mapping candidate name to integer score, \
            e.g. {{\"{first}\": 8}}.",
            ctx.recent_summary(self.history_window),
            first = names[0],
        );

        let request = CompletionRequest::json(SCHEDULER_ROLE, prompt, self.temperature);

        let raw = match self.service.complete(request).await {
            Ok(text) => text,
            Err(e) => {
                warn!(error = %e, "Scoring call failed, falling back to random scores");
                return self.random_scores(pool);
            }
        };

        match parse_scores(&raw) {
            Some(scores) if !scores.is_empty() => {
                debug!(?scores, "Candidate scores received");
                scores
            }
            _ => {
                warn!(raw = %raw, "Score JSON unusable, falling back to random scores");
                self.random_scores(pool)
            }
        }
    }

    fn random_scores(&mut self, pool: &[Persona]) -> Vec<(String, i64)> {
        pool.iter()
            .map(|p| (p.name.clone(), self.rng.random_range(1..=10)))
            .collect()
    }

    /// Filter scores to the pool, default to neutral if nothing valid
    /// remains, then apply the tie-break threshold over the top two.
    fn pick(&mut self, pool: &[Persona], scores: Vec<(String, i64)>) -> String {
        // Discard unknown or stale keys, preserving roster (pool) order.
        let mut valid: Vec<(String, i64)> = pool
            .iter()
            .filter_map(|p| {
                scores
                    .iter()
                    .find(|(name, _)| name == &p.name)
                    .map(|(_, score)| (p.name.clone(), *score))
            })
            .collect();

        if valid.is_empty() {
            valid = pool
                .iter()
                .map(|p| (p.name.clone(), NEUTRAL_SCORE))
                .collect();
        }

        // Stable sort keeps pool order among equal scores.
        valid.sort_by_key(|(_, score)| std::cmp::Reverse(*score));

        if valid.len() == 1 {
            return valid[0].0.clone();
        }

        let (top_name, top_score) = &valid[0];
        let (second_name, second_score) = &valid[1];

        if top_score - second_score <= TIE_THRESHOLD {
            let coin = self.rng.random_bool(0.5);
            debug!(top = %top_name, second = %second_name, coin, "Tie-break between top two");
            if coin {
                top_name.clone()
            } else {
                second_name.clone()
            }
        } else {
            top_name.clone()
        }
    }
}

/// Parse the scoring response into (name, score) pairs. The model is asked
/// for integers in 0-10; entries that are fractional or outside that range
/// are discarded rather than repaired, so the random fallback stays the
/// single recovery mechanism. Non-object responses yield `None`.
fn parse_scores(raw: &str) -> Option<Vec<(String, i64)>> {
    let value: serde_json::Value = serde_json::from_str(raw).ok()?;
    let object = value.as_object()?;

    let scores: Vec<(String, i64)> = object
        .iter()
        .filter_map(|(name, v)| {
            let score = v
                .as_i64()
                .or_else(|| v.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))?;
            (0..=10).contains(&score).then(|| (name.clone(), score))
        })
        .collect();

    Some(scores)
}
