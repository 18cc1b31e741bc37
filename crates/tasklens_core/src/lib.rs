//! Task search and productivity analytics core.
//! Every operation reads a snapshot supplied by the host; only search history
//! is persisted by this crate.

pub mod analytics;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use analytics::forecast::{predict_completion, CompletionForecast};
pub use analytics::optimize::{suggest_optimizations, Habits, Optimization, WorkloadSummary};
pub use analytics::patterns::{identify_patterns, Pattern, PatternKind};
pub use analytics::productivity::{calculate_productivity_score, productivity_breakdown};
pub use analytics::workload::{analyze_workload_balance, WeekWindow, WorkloadAnalysis};
pub use config::EngineConfig;
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::catalog::{Label, Project};
pub use model::task::{Priority, Task, TaskId};
pub use repo::kv_repo::{
    KeyValueRepository, MemoryKeyValueRepository, RepoError, RepoResult,
    SqliteKeyValueRepository,
};
pub use repo::snapshot::{Snapshot, SnapshotSource};
pub use search::engine::{highlight_matches, search, SearchEngine, SearchResults};
pub use search::filter::{advanced_search, StatusFilter, TaskFilters};
pub use search::history::{HistoryEntry, SearchHistory};
pub use search::suggest::suggest;
pub use service::insight_service::{InsightReport, InsightService};
pub use service::rate_limiter::{RateDecision, RateLimiter};

/// Minimal health-check API for host wiring.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
