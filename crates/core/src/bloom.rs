//! Bloom's-taxonomy cognitive ladder.
//!
//! Six ordered levels describe how deeply the student is engaging with the
//! material. Scaffolding-eligible personas aim their replies one level above
//! the student's assessed level; the ladder is capped at `Create`.

use serde::{Deserialize, Serialize};

/// One of the six ordered cognitive levels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CognitiveLevel {
    Remember,
    Understand,
    Apply,
    Analyze,
    Evaluate,
    Create,
}

impl CognitiveLevel {
    /// All levels in ladder order.
    pub const ALL: [CognitiveLevel; 6] = [
        Self::Remember,
        Self::Understand,
        Self::Apply,
        Self::Analyze,
        Self::Evaluate,
        Self::Create,
    ];

    /// Numeric rank, 1 (Remember) through 6 (Create).
    pub fn rank(self) -> u8 {
        match self {
            Self::Remember => 1,
            Self::Understand => 2,
            Self::Apply => 3,
            Self::Analyze => 4,
            Self::Evaluate => 5,
            Self::Create => 6,
        }
    }

    /// The scaffolding target: one level up, capped at `Create`.
    pub fn one_above(self) -> Self {
        match self {
            Self::Remember => Self::Understand,
            Self::Understand => Self::Apply,
            Self::Apply => Self::Analyze,
            Self::Analyze => Self::Evaluate,
            Self::Evaluate | Self::Create => Self::Create,
        }
    }

    /// Display name used in prompts and transcripts.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Remember => "Remember",
            Self::Understand => "Understand",
            Self::Apply => "Apply",
            Self::Analyze => "Analyze",
            Self::Evaluate => "Evaluate",
            Self::Create => "Create",
        }
    }

    /// Localized label, as the estimation prompt asks the model to answer.
    pub fn localized_label(self) -> &'static str {
        match self {
            Self::Remember => "记忆",
            Self::Understand => "理解",
            Self::Apply => "应用",
            Self::Analyze => "分析",
            Self::Evaluate => "评价",
            Self::Create => "创造",
        }
    }

    /// Operational definition of what working at this level looks like.
    /// Injected into the scaffolding instruction for the target level.
    pub fn guidance(self) -> &'static str {
        match self {
            Self::Remember => {
                "recall definitions, syntax forms, and standard library names verbatim"
            }
            Self::Understand => {
                "restate a mechanism in one's own words and explain what a given piece of code does"
            }
            Self::Apply => {
                "use a known construct to solve a new, concrete programming task"
            }
            Self::Analyze => {
                "break a program into parts and trace how data and control flow interact"
            }
            Self::Evaluate => {
                "judge competing implementations and justify the trade-offs against explicit criteria"
            }
            Self::Create => {
                "design a new program or data structure by combining mechanisms in an original way"
            }
        }
    }

    /// Best-effort parse of a free-text level label.
    ///
    /// Matches the English name (case-insensitive) or the localized label as
    /// a substring, so `"应用 (Apply)"` and `"apply"` both resolve. Returns
    /// `None` for unrecognized labels; callers default to `Understand`.
    pub fn parse_label(label: &str) -> Option<Self> {
        let lowered = label.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|level| {
            lowered.contains(&level.display_name().to_lowercase())
                || label.contains(level.localized_label())
        })
    }
}

impl std::fmt::Display for CognitiveLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_one_through_six() {
        let ranks: Vec<u8> = CognitiveLevel::ALL.iter().map(|l| l.rank()).collect();
        assert_eq!(ranks, vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn one_above_is_capped_at_create() {
        assert_eq!(CognitiveLevel::Evaluate.one_above(), CognitiveLevel::Create);
        assert_eq!(CognitiveLevel::Create.one_above(), CognitiveLevel::Create);
        assert_eq!(CognitiveLevel::Create.one_above().rank(), 6);
    }

    #[test]
    fn one_above_climbs_one_rank() {
        for level in CognitiveLevel::ALL {
            let target = level.one_above();
            assert_eq!(target.rank(), (level.rank() + 1).min(6));
        }
    }

    #[test]
    fn parse_english_labels() {
        assert_eq!(
            CognitiveLevel::parse_label("Analyze"),
            Some(CognitiveLevel::Analyze)
        );
        assert_eq!(
            CognitiveLevel::parse_label("  apply "),
            Some(CognitiveLevel::Apply)
        );
    }

    #[test]
    fn parse_localized_labels() {
        assert_eq!(CognitiveLevel::parse_label("评价"), Some(CognitiveLevel::Evaluate));
        assert_eq!(
            CognitiveLevel::parse_label("应用 (Apply)"),
            Some(CognitiveLevel::Apply)
        );
    }

    #[test]
    fn parse_unrecognized_returns_none() {
        assert_eq!(CognitiveLevel::parse_label("transcend"), None);
        assert_eq!(CognitiveLevel::parse_label(""), None);
    }
}
