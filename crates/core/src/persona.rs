//! Teaching-assistant persona types.
//!
//! Each persona carries a tagged response mode instead of having behavior
//! keyed off its name: scaffolding-eligible personas elevate the student one
//! cognitive level, direct personas answer concretely. The mode also selects
//! the instruction flavor the response engine builds.

use serde::{Deserialize, Serialize};

/// How a scaffolding-eligible persona elevates the student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElevateStyle {
    /// Metaphors and guided questions that lead to an "aha" moment.
    Metaphor,
    /// A sharp counterexample or challenge exposing a gap in the reasoning.
    Counterexample,
}

/// How a direct persona answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DirectStyle {
    /// Corrected code or syntax, aimed at the immediate problem.
    CodeFix,
    /// An authoritative systems-level summary (memory, ABI, runtime).
    SystemsSummary,
}

/// The persona's capability: elevate one Bloom level, or answer directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum ResponseMode {
    Elevate { style: ElevateStyle },
    Direct { style: DirectStyle },
}

/// A fixed classroom persona. Immutable after construction; the name is the
/// globally unique key used for roster lookup and controller scoring.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    /// Unique display name, e.g. "Insight Sparker".
    pub name: String,

    /// Names the student may use to address this persona, including
    /// localized alternates. Always contains `name` itself.
    pub aliases: Vec<String>,

    /// Static role description, used as the system framing for generation
    /// and embedded in the controller's scoring prompt.
    pub role_description: String,

    /// Elevate vs. direct capability, with instruction flavor.
    pub mode: ResponseMode,
}

impl Persona {
    pub fn new(
        name: impl Into<String>,
        role_description: impl Into<String>,
        mode: ResponseMode,
    ) -> Self {
        let name = name.into();
        Self {
            aliases: vec![name.clone()],
            name,
            role_description: role_description.into(),
            mode,
        }
    }

    /// Add alternate names for direct-address matching.
    pub fn with_aliases<I, S>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Whether this persona scaffolds (elevates) rather than answers directly.
    pub fn scaffold_eligible(&self) -> bool {
        matches!(self.mode, ResponseMode::Elevate { .. })
    }

    /// Whether any alias of this persona occurs as a substring of `text`.
    pub fn mentioned_in(&self, text: &str) -> bool {
        self.aliases.iter().any(|alias| text.contains(alias.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sparker() -> Persona {
        Persona::new(
            "Insight Sparker",
            "Turns abstract concepts into everyday metaphors.",
            ResponseMode::Elevate { style: ElevateStyle::Metaphor },
        )
        .with_aliases(["引导者", "启发者"])
    }

    #[test]
    fn name_is_always_an_alias() {
        let p = sparker();
        assert!(p.mentioned_in("Insight Sparker, what do you think?"));
    }

    #[test]
    fn localized_alias_matches() {
        let p = sparker();
        assert!(p.mentioned_in("引导者，指针到底是什么？"));
        assert!(!p.mentioned_in("整合者，请总结一下"));
    }

    #[test]
    fn scaffold_eligibility_follows_mode() {
        assert!(sparker().scaffold_eligible());
        let checker = Persona::new(
            "Fundamentals Checker",
            "Checks definitions against the textbook.",
            ResponseMode::Direct { style: DirectStyle::CodeFix },
        );
        assert!(!checker.scaffold_eligible());
    }

    #[test]
    fn mode_serialization_is_tagged() {
        let json = serde_json::to_string(&ResponseMode::Elevate {
            style: ElevateStyle::Counterexample,
        })
        .unwrap();
        assert!(json.contains("elevate"));
        assert!(json.contains("counterexample"));
    }
}
