//! Query completion candidates.
//!
//! # Invariants
//! - Output is de-duplicated in first-encountered order.
//! - At most 8 entries, or 5 for an empty query.

use crate::model::catalog::{Label, Project};
use crate::model::task::Task;

const EMPTY_QUERY_LIMIT: usize = 5;
const QUERY_LIMIT: usize = 8;
const SEED_SUGGESTIONS: &[&str] = &["high priority", "overdue", "today", "completed"];
const SEED_PROJECT_COUNT: usize = 3;
const STATUS_VOCABULARY: &[&str] = &[
    "completed",
    "active",
    "overdue",
    "high priority",
    "medium priority",
    "low priority",
];
const MIN_TITLE_WORD_CHARS: usize = 3;

/// Insertion-ordered set with a hard cap.
struct OrderedSet {
    items: Vec<String>,
}

impl OrderedSet {
    fn new() -> Self {
        Self { items: Vec::new() }
    }

    fn insert(&mut self, value: String) {
        if !self.items.contains(&value) {
            self.items.push(value);
        }
    }

    fn into_limited(mut self, limit: usize) -> Vec<String> {
        self.items.truncate(limit);
        self.items
    }
}

/// Builds suggestions for the current query.
///
/// An empty query yields popular seeds and the first project names. A
/// non-empty query is lowercased (not trimmed) and matched against title
/// words, project/label names and the status vocabulary.
pub fn suggest(query: &str, tasks: &[Task], projects: &[Project], labels: &[Label]) -> Vec<String> {
    let mut suggestions = OrderedSet::new();

    if query.is_empty() {
        for seed in SEED_SUGGESTIONS {
            suggestions.insert((*seed).to_string());
        }
        for project in projects.iter().take(SEED_PROJECT_COUNT) {
            suggestions.insert(project.name.to_lowercase());
        }
        return suggestions.into_limited(EMPTY_QUERY_LIMIT);
    }

    let needle = query.to_lowercase();

    for task in tasks {
        for word in task.title.to_lowercase().split(' ') {
            if word.chars().count() >= MIN_TITLE_WORD_CHARS && word.starts_with(&needle) {
                suggestions.insert(word.to_string());
            }
        }
    }

    let names = projects
        .iter()
        .map(|project| project.name.as_str())
        .chain(labels.iter().map(|label| label.name.as_str()));
    for name in names {
        let lowered = name.to_lowercase();
        if lowered.contains(&needle) {
            suggestions.insert(lowered);
        }
    }

    for status in STATUS_VOCABULARY {
        if status.contains(&needle) {
            suggestions.insert((*status).to_string());
        }
    }

    suggestions.into_limited(QUERY_LIMIT)
}
