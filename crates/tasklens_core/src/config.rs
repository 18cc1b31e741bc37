//! Engine configuration.
//!
//! # Responsibility
//! - Hold tunables for search ranking, history retention and rate limiting.
//! - Provide defaults that reproduce the shipped ranking behavior.
//!
//! # Invariants
//! - Field weights are non-negative; scoring normalizes by their sum.
//! - Thresholds live in `[0, 1]`, where `0` only accepts perfect matches.

use serde::{Deserialize, Serialize};

/// Searchable field of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Title,
    Description,
    /// All task comments joined by single spaces.
    Comments,
    /// Name of the task's project, empty when the project is unknown.
    ProjectName,
    Name,
}

impl SearchField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Description => "description",
            Self::Comments => "comments",
            Self::ProjectName => "project_name",
            Self::Name => "name",
        }
    }
}

/// One weighted field of an entity search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldWeight {
    pub field: SearchField,
    pub weight: f64,
}

impl FieldWeight {
    pub const fn new(field: SearchField, weight: f64) -> Self {
        Self { field, weight }
    }
}

/// Ranking setup for one entity type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntitySearchConfig {
    pub fields: Vec<FieldWeight>,
    /// Entities whose combined score is above this value are dropped.
    pub threshold: f64,
}

impl EntitySearchConfig {
    pub fn tasks() -> Self {
        Self {
            fields: vec![
                FieldWeight::new(SearchField::Title, 0.4),
                FieldWeight::new(SearchField::Description, 0.3),
                FieldWeight::new(SearchField::Comments, 0.2),
                FieldWeight::new(SearchField::ProjectName, 0.1),
            ],
            threshold: 0.4,
        }
    }

    pub fn projects() -> Self {
        Self {
            fields: vec![
                FieldWeight::new(SearchField::Name, 0.6),
                FieldWeight::new(SearchField::Description, 0.4),
            ],
            threshold: 0.3,
        }
    }

    pub fn labels() -> Self {
        Self {
            fields: vec![FieldWeight::new(SearchField::Name, 1.0)],
            threshold: 0.2,
        }
    }
}

/// Search ranking and highlighting configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub tasks: EntitySearchConfig,
    pub projects: EntitySearchConfig,
    pub labels: EntitySearchConfig,
    /// Queries shorter than this (in chars, after trim) return nothing.
    pub min_query_chars: usize,
    pub highlight_open: String,
    pub highlight_close: String,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            tasks: EntitySearchConfig::tasks(),
            projects: EntitySearchConfig::projects(),
            labels: EntitySearchConfig::labels(),
            min_query_chars: 2,
            highlight_open: "<mark>".to_string(),
            highlight_close: "</mark>".to_string(),
        }
    }
}

/// Recent-search retention settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Namespaced key under which the history blob is stored.
    pub storage_key: String,
    pub max_items: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            storage_key: "tasklens.search_history".to_string(),
            max_items: 10,
        }
    }
}

/// Sliding-window limiter settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateLimitConfig {
    pub max_requests: usize,
    pub window_ms: i64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window_ms: 60_000,
        }
    }
}

/// Rolling file log settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// One of `trace|debug|info|warn|error`.
    pub level: String,
    pub max_file_bytes: u64,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: crate::logging::default_log_level().to_string(),
            max_file_bytes: 10 * 1024 * 1024,
            max_files: 5,
        }
    }
}

/// Aggregated configuration for hosts that load settings from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub search: SearchConfig,
    pub history: HistoryConfig,
    pub rate_limit: RateLimitConfig,
    pub logging: LoggingConfig,
}
