//! In-memory search over task snapshots.
//!
//! # Responsibility
//! - Rank tasks, projects and labels against typo-tolerant queries.
//! - Derive completion suggestions and keep a recent-search history.

pub mod engine;
pub mod filter;
pub mod fuzzy;
pub mod history;
pub mod suggest;
