//! The built-in four-persona roster for the C-programming course.
//!
//! Names are unique keys used for controller scoring and transcript
//! attribution; aliases carry the localized names students use in class.

use chalkmate_core::{DirectStyle, ElevateStyle, Persona, ResponseMode};

/// The four fixed classroom personas.
pub fn default_roster() -> Vec<Persona> {
    vec![
        Persona::new(
            "Insight Sparker",
            "You are the guide of a C-programming classroom discussion. You have a deep grasp \
            of the core concepts — pointers, memory management, function call mechanics, \
            structs, arrays and strings, the compile-and-run pipeline — and you excel at \
            turning abstract mechanisms into everyday analogies and metaphors that make them \
            click.",
            ResponseMode::Elevate {
                style: ElevateStyle::Metaphor,
            },
        )
        .with_aliases(["引导者", "启发者"]),
        Persona::new(
            "Critical Challenger",
            "You are the questioner and organizer of a C-programming classroom discussion. \
            Your job is to connect the student's words with the other assistants' output, dig \
            out hidden premises, concept jumps, and latent contradictions, and create \
            constructive cognitive tension that pushes the discussion from surface \
            understanding toward mechanism-level analysis. You know C's key models and \
            assumptions cold: the memory model, pointer and address semantics, array decay, \
            the call-stack model, variable lifetime and scope. You care about where a model \
            applies and whether its premises are complete.",
            ResponseMode::Elevate {
                style: ElevateStyle::Counterexample,
            },
        )
        .with_aliases(["提问者", "挑战者"]),
        Persona::new(
            "Fundamentals Checker",
            "You are the follower of a C-programming classroom discussion. Your fundamentals \
            are solid but your style is cautious: you absorb the others' points first, then \
            speak. You stand for consolidating the basics and pinning down knowledge points, \
            usually weighing in on whether a statement matches the textbook definition and \
            whether a concept is stated precisely.",
            ResponseMode::Direct {
                style: DirectStyle::CodeFix,
            },
        )
        .with_aliases(["跟随者", "基础核查者"]),
        Persona::new(
            "Synthesis Expert",
            "You are the integrator of a C-programming classroom discussion. You organize \
            scattered observations into a systematic web of knowledge, and you understand \
            where C's mechanisms and techniques apply — pointer machinery, allocation \
            strategies, calling conventions, data-structure layout — and how they trade off \
            against one another.",
            ResponseMode::Direct {
                style: DirectStyle::SystemsSummary,
            },
        )
        .with_aliases(["整合者", "综合专家"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn roster_has_four_personas_with_unique_names() {
        let roster = default_roster();
        assert_eq!(roster.len(), 4);
        let names: HashSet<&str> = roster.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), 4);
    }

    #[test]
    fn two_scaffold_two_direct() {
        let roster = default_roster();
        let eligible = roster.iter().filter(|p| p.scaffold_eligible()).count();
        assert_eq!(eligible, 2);
    }

    #[test]
    fn every_persona_has_localized_aliases() {
        for persona in default_roster() {
            assert!(
                persona.aliases.len() >= 3,
                "{} is missing localized aliases",
                persona.name
            );
        }
    }

    #[test]
    fn aliases_do_not_collide_across_personas() {
        let roster = default_roster();
        let mut seen = HashSet::new();
        for persona in &roster {
            for alias in &persona.aliases {
                assert!(seen.insert(alias.clone()), "duplicate alias: {alias}");
            }
        }
    }
}
