//! Fuzzy search combined with structured task filters.

use crate::model::catalog::Project;
use crate::model::task::{LabelId, Priority, ProjectId, Task};
use crate::search::engine::SearchEngine;
use crate::search::fuzzy::FuzzyMatcher;
use chrono::{DateTime, Utc};

/// Completion-state filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Active,
    /// Open tasks due before the evaluation instant.
    Overdue,
}

/// Conjunctive filter set; `None`/empty members do not filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilters {
    pub status: StatusFilter,
    pub priority: Option<Priority>,
    pub project_id: Option<ProjectId>,
    /// Keeps tasks carrying any of these labels.
    pub label_ids: Vec<LabelId>,
    /// Inclusive due-date range; tasks without a due date are dropped.
    pub due_between: Option<(DateTime<Utc>, DateTime<Utc>)>,
}

impl TaskFilters {
    /// Returns whether `task` passes every configured filter at `now`.
    pub fn accepts(&self, task: &Task, now: DateTime<Utc>) -> bool {
        let status_ok = match self.status {
            StatusFilter::All => true,
            StatusFilter::Completed => task.completed,
            StatusFilter::Active => !task.completed,
            StatusFilter::Overdue => task.is_overdue(now),
        };
        let priority_ok = self.priority.map_or(true, |p| task.priority == p);
        let project_ok = self
            .project_id
            .map_or(true, |id| task.project_id == Some(id));
        let labels_ok =
            self.label_ids.is_empty() || self.label_ids.iter().any(|id| task.labels.contains(id));
        let due_ok = match (self.due_between, task.due_date) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some((start, end)), Some(due)) => start <= due && due <= end,
        };
        status_ok && priority_ok && project_ok && labels_ok && due_ok
    }
}

impl<M: FuzzyMatcher> SearchEngine<M> {
    /// Filters tasks, starting from ranked fuzzy hits when the query is
    /// searchable and from the whole collection otherwise.
    pub fn advanced_search(
        &self,
        query: &str,
        filters: &TaskFilters,
        tasks: &[Task],
        projects: &[Project],
        now: DateTime<Utc>,
    ) -> Vec<Task> {
        let candidates: Vec<Task> = match self.search_tasks(query, tasks, projects) {
            Some(hits) => hits.into_iter().map(|hit| hit.item).collect(),
            None => tasks.to_vec(),
        };
        candidates
            .into_iter()
            .filter(|task| filters.accepts(task, now))
            .collect()
    }
}

/// Filtered search with the default engine.
pub fn advanced_search(
    query: &str,
    filters: &TaskFilters,
    tasks: &[Task],
    projects: &[Project],
    now: DateTime<Utc>,
) -> Vec<Task> {
    SearchEngine::new().advanced_search(query, filters, tasks, projects, now)
}
