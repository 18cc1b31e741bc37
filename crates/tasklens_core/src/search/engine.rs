//! Weighted multi-entity fuzzy search.
//!
//! # Responsibility
//! - Build searchable field text for tasks, projects and labels.
//! - Score, filter and rank entities per type.
//! - Mark literal query occurrences for display.
//!
//! # Invariants
//! - Queries shorter than `min_query_chars` (after trim) return nothing.
//! - Every returned score is in `[0, 1]` and within its type threshold.
//! - Per-type results are sorted ascending by score; ties keep input order.
//! - Highlighting is literal-only: a fuzzy hit without a literal occurrence
//!   is returned unmarked.

use crate::config::{EntitySearchConfig, SearchConfig, SearchField};
use crate::model::catalog::{project_name, Label, Project};
use crate::model::task::Task;
use crate::search::fuzzy::{BitapMatcher, FuzzyMatcher};
use log::debug;
use regex::RegexBuilder;
use serde::Serialize;
use std::time::Instant;

/// Entity discriminator for merged result streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Task,
    Project,
    Label,
}

/// Matched span inside one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub field: SearchField,
    pub distance: f64,
    /// Char offsets `[start, end)` into the field text.
    pub start: usize,
    pub end: usize,
}

/// One accepted entity with its combined score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scored<T> {
    pub item: T,
    /// `0.0` is a perfect match.
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

/// Borrowed view over one hit of any entity type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SearchHit<'a> {
    Task(&'a Scored<Task>),
    Project(&'a Scored<Project>),
    Label(&'a Scored<Label>),
}

impl SearchHit<'_> {
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Task(_) => EntityKind::Task,
            Self::Project(_) => EntityKind::Project,
            Self::Label(_) => EntityKind::Label,
        }
    }

    pub fn score(&self) -> f64 {
        match self {
            Self::Task(hit) => hit.score,
            Self::Project(hit) => hit.score,
            Self::Label(hit) => hit.score,
        }
    }

    /// Primary display text of the entity.
    pub fn display_text(&self) -> &str {
        match self {
            Self::Task(hit) => hit.item.title.as_str(),
            Self::Project(hit) => hit.item.name.as_str(),
            Self::Label(hit) => hit.item.name.as_str(),
        }
    }
}

/// Typed search response.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchResults {
    pub tasks: Vec<Scored<Task>>,
    pub projects: Vec<Scored<Project>>,
    pub labels: Vec<Scored<Label>>,
    /// Sum of the three list lengths.
    pub total: usize,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Merged hits in task, project, label order.
    pub fn iter_hits(&self) -> impl Iterator<Item = SearchHit<'_>> {
        self.tasks
            .iter()
            .map(SearchHit::Task)
            .chain(self.projects.iter().map(SearchHit::Project))
            .chain(self.labels.iter().map(SearchHit::Label))
    }
}

/// Search engine over in-memory snapshots.
///
/// Stateless apart from configuration; safe to share across threads when
/// the matcher is.
#[derive(Debug, Clone, Default)]
pub struct SearchEngine<M: FuzzyMatcher = BitapMatcher> {
    matcher: M,
    config: SearchConfig,
}

impl SearchEngine<BitapMatcher> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<M: FuzzyMatcher> SearchEngine<M> {
    pub fn with_matcher(matcher: M, config: SearchConfig) -> Self {
        Self { matcher, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Runs a ranked search across all three entity types.
    ///
    /// Dangling project references resolve to an empty project name.
    pub fn search(
        &self,
        query: &str,
        tasks: &[Task],
        projects: &[Project],
        labels: &[Label],
    ) -> SearchResults {
        let Some(pattern) = self.normalize_query(query) else {
            return SearchResults::default();
        };
        let started_at = Instant::now();

        let task_hits = rank(
            tasks,
            &self.config.tasks,
            |task, field| task_field(task, field, projects),
            &self.matcher,
            &pattern,
        );
        let project_hits = rank(
            projects,
            &self.config.projects,
            project_field,
            &self.matcher,
            &pattern,
        );
        let label_hits = rank(
            labels,
            &self.config.labels,
            label_field,
            &self.matcher,
            &pattern,
        );

        let total = task_hits.len() + project_hits.len() + label_hits.len();
        debug!(
            "event=search module=search status=ok query_len={} tasks={} projects={} labels={} duration_ms={}",
            pattern.chars().count(),
            task_hits.len(),
            project_hits.len(),
            label_hits.len(),
            started_at.elapsed().as_millis()
        );

        SearchResults {
            tasks: task_hits,
            projects: project_hits,
            labels: label_hits,
            total,
        }
    }

    /// Ranked task hits only, used by filtered search.
    pub fn search_tasks(
        &self,
        query: &str,
        tasks: &[Task],
        projects: &[Project],
    ) -> Option<Vec<Scored<Task>>> {
        let pattern = self.normalize_query(query)?;
        Some(rank(
            tasks,
            &self.config.tasks,
            |task, field| task_field(task, field, projects),
            &self.matcher,
            &pattern,
        ))
    }

    /// Wraps the first case-insensitive literal occurrence of `query`.
    pub fn highlight(&self, text: &str, query: &str) -> String {
        highlight_with(
            text,
            query,
            &self.config.highlight_open,
            &self.config.highlight_close,
        )
    }

    fn normalize_query(&self, query: &str) -> Option<String> {
        let trimmed = query.trim();
        if trimmed.chars().count() < self.config.min_query_chars.max(1) {
            return None;
        }
        Some(trimmed.to_string())
    }
}

/// Searches with the default matcher and configuration.
pub fn search(
    query: &str,
    tasks: &[Task],
    projects: &[Project],
    labels: &[Label],
) -> SearchResults {
    SearchEngine::new().search(query, tasks, projects, labels)
}

/// Highlights with the default `<mark>` markers.
pub fn highlight_matches(text: &str, query: &str) -> String {
    let config = SearchConfig::default();
    highlight_with(text, query, &config.highlight_open, &config.highlight_close)
}

fn highlight_with(text: &str, query: &str, open: &str, close: &str) -> String {
    let needle = query.trim();
    if text.is_empty() || needle.is_empty() {
        return text.to_string();
    }
    let Ok(pattern) = RegexBuilder::new(&regex::escape(needle))
        .case_insensitive(true)
        .build()
    else {
        return text.to_string();
    };
    match pattern.find(text) {
        Some(found) => format!(
            "{}{open}{}{close}{}",
            &text[..found.start()],
            found.as_str(),
            &text[found.end()..]
        ),
        None => text.to_string(),
    }
}

fn rank<T, F, M>(
    items: &[T],
    config: &EntitySearchConfig,
    field_text: F,
    matcher: &M,
    pattern: &str,
) -> Vec<Scored<T>>
where
    T: Clone,
    F: Fn(&T, SearchField) -> Option<String>,
    M: FuzzyMatcher,
{
    let total_weight: f64 = config.fields.iter().map(|field| field.weight.max(0.0)).sum();
    if total_weight <= 0.0 {
        return Vec::new();
    }

    let mut hits: Vec<Scored<T>> = items
        .iter()
        .filter_map(|item| {
            let mut weighted = 0.0;
            let mut matches = Vec::new();
            for entry in &config.fields {
                let alignment = field_text(item, entry.field)
                    .filter(|text| !text.is_empty())
                    .and_then(|text| matcher.find(pattern, &text));
                let distance = match alignment {
                    Some(found) => {
                        let distance = found.distance.clamp(0.0, 1.0);
                        if distance < 1.0 {
                            matches.push(FieldMatch {
                                field: entry.field,
                                distance,
                                start: found.start,
                                end: found.end,
                            });
                        }
                        distance
                    }
                    None => 1.0,
                };
                weighted += entry.weight.max(0.0) * distance;
            }

            let score = (weighted / total_weight).clamp(0.0, 1.0);
            (score <= config.threshold).then(|| Scored {
                item: item.clone(),
                score,
                matches,
            })
        })
        .collect();

    // `sort_by` is stable, so equal scores keep collection order.
    hits.sort_by(|left, right| left.score.total_cmp(&right.score));
    hits
}

fn task_field(task: &Task, field: SearchField, projects: &[Project]) -> Option<String> {
    match field {
        SearchField::Title | SearchField::Name => Some(task.title.clone()),
        SearchField::Description => task.description.clone(),
        SearchField::Comments => Some(task.comments.join(" ")),
        SearchField::ProjectName => project_name(projects, task.project_id).map(str::to_string),
    }
}

fn project_field(project: &Project, field: SearchField) -> Option<String> {
    match field {
        SearchField::Name | SearchField::Title => Some(project.name.clone()),
        SearchField::Description => project.description.clone(),
        SearchField::Comments | SearchField::ProjectName => None,
    }
}

fn label_field(label: &Label, field: SearchField) -> Option<String> {
    match field {
        SearchField::Name | SearchField::Title => Some(label.name.clone()),
        _ => None,
    }
}
