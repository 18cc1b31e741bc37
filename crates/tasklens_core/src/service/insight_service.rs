//! Search and analytics use-case service.
//!
//! # Responsibility
//! - Expose every engine operation over one snapshot source.
//! - Own the search history and engine configuration for a host session.
//!
//! # Invariants
//! - Each call reads one fresh snapshot; nothing is cached between calls.
//! - Only history operations touch persistence.

use crate::analytics::forecast::{predict_completion, CompletionForecast};
use crate::analytics::optimize::{suggest_optimizations, Habits, Optimization, WorkloadSummary};
use crate::analytics::patterns::{identify_patterns, Pattern};
use crate::analytics::productivity::{productivity_breakdown, ProductivityBreakdown};
use crate::analytics::workload::{analyze_workload_balance, WeekWindow, WorkloadAnalysis};
use crate::config::EngineConfig;
use crate::model::task::{Task, TaskId};
use crate::repo::kv_repo::KeyValueRepository;
use crate::repo::snapshot::SnapshotSource;
use crate::search::engine::{SearchEngine, SearchResults};
use crate::search::filter::TaskFilters;
use crate::search::fuzzy::BitapMatcher;
use crate::search::history::{HistoryEntry, SearchHistory};
use crate::search::suggest::suggest;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

/// Combined dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightReport {
    pub productivity: ProductivityBreakdown,
    pub patterns: Vec<Pattern>,
    pub workload: WorkloadAnalysis,
    pub summary: WorkloadSummary,
    pub habits: Habits,
    pub optimizations: Vec<Optimization>,
}

/// Use-case facade over a snapshot source and a history store.
pub struct InsightService<S: SnapshotSource, K: KeyValueRepository> {
    source: S,
    engine: SearchEngine<BitapMatcher>,
    history: SearchHistory<K>,
}

impl<S: SnapshotSource, K: KeyValueRepository> InsightService<S, K> {
    /// Creates a service with default configuration.
    pub fn new(source: S, history_store: K) -> Self {
        Self::with_config(source, history_store, EngineConfig::default())
    }

    pub fn with_config(source: S, history_store: K, config: EngineConfig) -> Self {
        Self {
            source,
            engine: SearchEngine::with_matcher(BitapMatcher::default(), config.search),
            history: SearchHistory::with_config(history_store, config.history),
        }
    }

    pub fn search(&self, query: &str) -> SearchResults {
        self.engine.search(
            query,
            &self.source.list_tasks(),
            &self.source.list_projects(),
            &self.source.list_labels(),
        )
    }

    pub fn advanced_search(
        &self,
        query: &str,
        filters: &TaskFilters,
        now: DateTime<Utc>,
    ) -> Vec<Task> {
        self.engine.advanced_search(
            query,
            filters,
            &self.source.list_tasks(),
            &self.source.list_projects(),
            now,
        )
    }

    pub fn suggest(&self, query: &str) -> Vec<String> {
        suggest(
            query,
            &self.source.list_tasks(),
            &self.source.list_projects(),
            &self.source.list_labels(),
        )
    }

    pub fn highlight(&self, text: &str, query: &str) -> String {
        self.engine.highlight(text, query)
    }

    pub fn get_history(&self) -> Vec<HistoryEntry> {
        self.history.get_history()
    }

    pub fn add_search(&self, query: &str) {
        self.history.add_search(query);
    }

    pub fn clear_history(&self) {
        self.history.clear_history();
    }

    pub fn calculate_productivity_score(&self, timeframe_days: u32, now: DateTime<Utc>) -> u8 {
        self.productivity(timeframe_days, now).score
    }

    pub fn productivity(&self, timeframe_days: u32, now: DateTime<Utc>) -> ProductivityBreakdown {
        productivity_breakdown(&self.source.list_tasks(), timeframe_days, now)
    }

    pub fn identify_patterns(&self, now: DateTime<Utc>) -> Vec<Pattern> {
        identify_patterns(&self.source.list_tasks(), &self.source.list_projects(), now)
    }

    pub fn analyze_workload_balance(&self, window: WeekWindow) -> WorkloadAnalysis {
        analyze_workload_balance(&self.source.list_tasks(), window)
    }

    pub fn suggest_optimizations(&self, now: DateTime<Utc>) -> Vec<Optimization> {
        let tasks = self.source.list_tasks();
        let summary = WorkloadSummary::from_snapshot(&tasks, &self.source.list_projects(), now);
        suggest_optimizations(&summary, &Habits::from_tasks(&tasks))
    }

    /// Forecast for one task; `None` when the id is not in the snapshot.
    pub fn predict_completion(&self, task_id: TaskId) -> Option<CompletionForecast> {
        let tasks = self.source.list_tasks();
        let task = tasks.iter().find(|task| task.id == task_id)?;
        Some(predict_completion(task, &tasks))
    }

    /// Computes every dashboard metric from a single snapshot.
    pub fn report(&self, timeframe_days: u32, now: DateTime<Utc>) -> InsightReport {
        let tasks = self.source.list_tasks();
        let projects = self.source.list_projects();
        let summary = WorkloadSummary::from_snapshot(&tasks, &projects, now);
        let habits = Habits::from_tasks(&tasks);

        let report = InsightReport {
            productivity: productivity_breakdown(&tasks, timeframe_days, now),
            patterns: identify_patterns(&tasks, &projects, now),
            workload: analyze_workload_balance(&tasks, WeekWindow::containing(now)),
            optimizations: suggest_optimizations(&summary, &habits),
            summary,
            habits,
        };
        info!(
            "event=insight_report module=service status=ok tasks={} projects={} score={} patterns={} optimizations={}",
            tasks.len(),
            projects.len(),
            report.productivity.score,
            report.patterns.len(),
            report.optimizations.len()
        );
        report
    }
}
