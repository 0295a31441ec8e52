//! Keyword-based course knowledge index.
//!
//! A static chapter → topic-keywords mapping, loaded once and read-only for
//! the process lifetime. Lookup is deterministic substring matching; there
//! is no ranking weight; hit order follows declaration order.

/// One chapter of the course, with its topic keywords.
#[derive(Debug, Clone)]
pub struct KnowledgeEntry {
    pub chapter: String,
    pub topics: Vec<String>,
}

impl KnowledgeEntry {
    pub fn new<S, I, T>(chapter: S, topics: I) -> Self
    where
        S: Into<String>,
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            chapter: chapter.into(),
            topics: topics.into_iter().map(Into::into).collect(),
        }
    }
}

/// The course knowledge index.
#[derive(Debug, Clone)]
pub struct KnowledgeIndex {
    entries: Vec<KnowledgeEntry>,
}

impl KnowledgeIndex {
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// All chapters hit by `query`, in declaration order.
    ///
    /// A chapter hits if either:
    /// - any whitespace token of the lowercased query is a substring of the
    ///   chapter label, or
    /// - any declared topic keyword is a substring of the lowercased query.
    pub fn match_chapters(&self, query: &str) -> Vec<&KnowledgeEntry> {
        let lowered = query.to_lowercase();
        let tokens: Vec<&str> = lowered.split_whitespace().collect();

        self.entries
            .iter()
            .filter(|entry| {
                let chapter_lower = entry.chapter.to_lowercase();
                let label_hit = tokens.iter().any(|token| chapter_lower.contains(token));
                let topic_hit = entry
                    .topics
                    .iter()
                    .any(|topic| lowered.contains(&topic.to_lowercase()));
                label_hit || topic_hit
            })
            .collect()
    }

    /// The built-in C-programming course graph.
    pub fn course_c_programming() -> Self {
        Self::new(vec![
            KnowledgeEntry::new(
                "数组与字符串 Arrays & Strings",
                [
                    "数组", "array", "字符串", "string", "strlen", "strcpy", "下标",
                    "越界", "out of bounds",
                ],
            ),
            KnowledgeEntry::new(
                "指针 Pointers",
                [
                    "指针", "pointer", "malloc", "free", "地址", "address", "解引用",
                    "dereference", "野指针", "null",
                ],
            ),
            KnowledgeEntry::new(
                "内存管理 Memory Management",
                [
                    "内存", "memory", "堆", "heap", "栈", "stack", "sizeof", "泄漏",
                    "leak", "calloc", "realloc",
                ],
            ),
            KnowledgeEntry::new(
                "函数与调用栈 Functions & the Call Stack",
                [
                    "函数", "function", "参数", "parameter", "递归", "recursion",
                    "调用栈", "call stack", "返回值", "return value",
                ],
            ),
            KnowledgeEntry::new(
                "结构体 Structs",
                [
                    "结构体", "struct", "typedef", "成员", "member", "链表",
                    "linked list", "对齐", "alignment",
                ],
            ),
            KnowledgeEntry::new(
                "编译与运行 Compilation & Execution",
                [
                    "编译", "compile", "链接", "link", "预处理", "preprocessor", "宏",
                    "macro", "头文件", "header", "gcc",
                ],
            ),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pointer_chapter() -> KnowledgeIndex {
        KnowledgeIndex::new(vec![
            KnowledgeEntry::new("指针", ["malloc", "free", "指针", "地址"]),
            KnowledgeEntry::new("结构体", ["struct", "typedef", "结构体"]),
        ])
    }

    #[test]
    fn topic_keyword_in_query_hits() {
        let index = pointer_chapter();
        let hits = index.match_chapters("怎么用malloc的指针");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].chapter, "指针");
    }

    #[test]
    fn query_token_in_chapter_label_hits() {
        let index = KnowledgeIndex::course_c_programming();
        let hits = index.match_chapters("tell me about pointers");
        assert!(hits.iter().any(|e| e.chapter.contains("Pointers")));
    }

    #[test]
    fn matching_is_case_insensitive() {
        let index = KnowledgeIndex::course_c_programming();
        let hits = index.match_chapters("What does MALLOC return?");
        assert!(hits.iter().any(|e| e.chapter.contains("指针")));
    }

    #[test]
    fn no_hit_returns_empty() {
        let index = pointer_chapter();
        assert!(index.match_chapters("python list comprehension").is_empty());
    }

    #[test]
    fn hits_follow_declaration_order() {
        let index = KnowledgeIndex::new(vec![
            KnowledgeEntry::new("A", ["shared"]),
            KnowledgeEntry::new("B", ["shared"]),
            KnowledgeEntry::new("C", ["shared"]),
        ]);
        let hits = index.match_chapters("shared keyword");
        let chapters: Vec<&str> = hits.iter().map(|e| e.chapter.as_str()).collect();
        assert_eq!(chapters, vec!["A", "B", "C"]);
    }
}
