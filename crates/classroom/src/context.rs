//! Conversation context: the append-only classroom transcript.
//!
//! Owns every [`Turn`] exclusively; ordering is append order. Turn count
//! grows unboundedly, which is acceptable for a bounded interactive session.

use chalkmate_core::{Speaker, Turn};

use crate::knowledge::KnowledgeIndex;

/// Default recency window for prompt summaries.
pub const DEFAULT_SUMMARY_WINDOW: usize = 6;

/// At most this many chapters of reference text per lookup, to keep the
/// generation prompt bounded.
const MAX_REFERENCE_CHAPTERS: usize = 2;

/// Returned when no chapter matches a lookup query.
pub const NO_MATCH_REFERENCE: &str =
    "(no chapter matched this question — answer from general C knowledge)";

/// The ordered discussion history plus the course knowledge index.
#[derive(Debug)]
pub struct ConversationContext {
    turns: Vec<Turn>,
    index: KnowledgeIndex,
}

impl ConversationContext {
    pub fn new(index: KnowledgeIndex) -> Self {
        Self {
            turns: Vec::new(),
            index,
        }
    }

    /// Record a turn. The sequence index is assigned here and is monotonic;
    /// turns are never reordered or deleted.
    pub fn append(&mut self, speaker: Speaker, text: impl Into<String>) -> &Turn {
        let seq = self.turns.len();
        self.turns.push(Turn::new(seq, speaker, text));
        &self.turns[seq]
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last_turn(&self) -> Option<&Turn> {
        self.turns.last()
    }

    /// The last `limit` turns as "speaker: text" lines, oldest first.
    /// Returns everything when fewer than `limit` turns exist.
    pub fn recent_summary(&self, limit: usize) -> String {
        let start = self.turns.len().saturating_sub(limit);
        self.turns[start..]
            .iter()
            .map(Turn::summary_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Formatted reference text for the chapters matching `query`, capped at
    /// the first two hits in declaration order.
    pub fn lookup_topics(&self, query: &str) -> String {
        let hits = self.index.match_chapters(query);
        if hits.is_empty() {
            return NO_MATCH_REFERENCE.to_string();
        }

        hits.iter()
            .take(MAX_REFERENCE_CHAPTERS)
            .map(|entry| {
                format!(
                    "[Reference chapter: {}]\nTopics: {}",
                    entry.chapter,
                    entry.topics.join(", ")
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeEntry;

    fn context() -> ConversationContext {
        ConversationContext::new(KnowledgeIndex::course_c_programming())
    }

    #[test]
    fn append_assigns_monotonic_sequence() {
        let mut ctx = context();
        ctx.append(Speaker::Student, "first");
        ctx.append(Speaker::persona("Insight Sparker"), "second");
        let seqs: Vec<usize> = ctx.turns().iter().map(|t| t.seq).collect();
        assert_eq!(seqs, vec![0, 1]);
    }

    #[test]
    fn recent_summary_caps_at_limit_oldest_first() {
        let mut ctx = context();
        for i in 0..10 {
            ctx.append(Speaker::Student, format!("message {i}"));
        }
        let summary = ctx.recent_summary(3);
        let lines: Vec<&str> = summary.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "Student: message 7");
        assert_eq!(lines[2], "Student: message 9");
    }

    #[test]
    fn recent_summary_with_large_limit_returns_everything_once() {
        let mut ctx = context();
        for i in 0..4 {
            ctx.append(Speaker::Student, format!("m{i}"));
        }
        let summary = ctx.recent_summary(100);
        assert_eq!(summary.lines().count(), 4);
        // verbatim, in order, no duplication
        assert_eq!(summary, "Student: m0\nStudent: m1\nStudent: m2\nStudent: m3");
    }

    #[test]
    fn recent_summary_of_empty_context_is_empty() {
        assert_eq!(context().recent_summary(6), "");
    }

    #[test]
    fn round_trip_all_turns() {
        let mut ctx = context();
        let texts = ["What is a pointer?", "A pointer holds an address.", "Got it"];
        ctx.append(Speaker::Student, texts[0]);
        ctx.append(Speaker::persona("Fundamentals Checker"), texts[1]);
        ctx.append(Speaker::Student, texts[2]);

        let summary = ctx.recent_summary(3);
        for text in texts {
            assert!(summary.contains(text));
        }
    }

    #[test]
    fn lookup_topics_no_match_is_canned() {
        let ctx = context();
        assert_eq!(ctx.lookup_topics("quantum entanglement"), NO_MATCH_REFERENCE);
    }

    #[test]
    fn lookup_topics_caps_at_two_chapters() {
        let index = KnowledgeIndex::new(vec![
            KnowledgeEntry::new("A", ["malloc"]),
            KnowledgeEntry::new("B", ["malloc"]),
            KnowledgeEntry::new("C", ["malloc"]),
        ]);
        let ctx = ConversationContext::new(index);
        let reference = ctx.lookup_topics("how does malloc work");
        assert!(reference.contains("[Reference chapter: A]"));
        assert!(reference.contains("[Reference chapter: B]"));
        assert!(!reference.contains("[Reference chapter: C]"));
    }
}
