//! Task domain model.
//!
//! # Responsibility
//! - Define the read-only task record consumed by search and analytics.
//! - Provide validation for hosts that build tasks from untrusted input.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `completed_at` is `Some` iff `completed` (enforced by `validate`, not by
//!   the engine; analytics tolerate violations).
//! - Optional collections (`labels`, `comments`) default to empty.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for tasks.
pub type TaskId = Uuid;
/// Stable identifier for projects.
pub type ProjectId = Uuid;
/// Stable identifier for labels.
pub type LabelId = Uuid;

/// Task urgency bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    /// All priorities, lowest first.
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Weight used by priority-weighted completion metrics.
    pub fn weight(self) -> u32 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }

    /// Stable lowercase name, matching the wire format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl Display for Priority {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validation errors for task invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    NilId,
    BlankTitle,
    /// `completed == true` without `completed_at`.
    MissingCompletedAt,
    /// `completed_at` set on an incomplete task.
    UnexpectedCompletedAt,
    NonPositiveMinutes {
        field: &'static str,
        value: u32,
    },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NilId => write!(f, "task id must not be nil"),
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::MissingCompletedAt => {
                write!(f, "completed task must carry completed_at")
            }
            Self::UnexpectedCompletedAt => {
                write!(f, "completed_at must be empty for incomplete task")
            }
            Self::NonPositiveMinutes { field, value } => {
                write!(f, "{field} must be positive, got {value}")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// Task record as supplied by the external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub priority: Priority,
    #[serde(default)]
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
    /// Minutes before `due_date` at which a reminder fires.
    #[serde(default)]
    pub due_date_reminder: Option<u32>,
    /// May reference labels that no longer exist.
    #[serde(default)]
    pub labels: BTreeSet<LabelId>,
    /// May reference a project that no longer exists.
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub estimated_minutes: Option<u32>,
    #[serde(default)]
    pub actual_minutes: Option<u32>,
    #[serde(default)]
    pub comments: Vec<String>,
}

impl Task {
    /// Creates an open task with a generated id and `medium` priority.
    pub fn new(title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self::with_id(Uuid::new_v4(), title, created_at)
    }

    /// Creates an open task with a caller-provided id.
    ///
    /// Used by import paths where identity already exists in the store.
    pub fn with_id(id: TaskId, title: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.into(),
            description: None,
            priority: Priority::Medium,
            completed: false,
            created_at,
            completed_at: None,
            due_date: None,
            due_date_reminder: None,
            labels: BTreeSet::new(),
            project_id: None,
            estimated_minutes: None,
            actual_minutes: None,
            comments: Vec::new(),
        }
    }

    /// Marks the task completed at `at`.
    pub fn complete(&mut self, at: DateTime<Utc>) {
        self.completed = true;
        self.completed_at = Some(at);
    }

    /// Returns whether the task is still open.
    pub fn is_active(&self) -> bool {
        !self.completed
    }

    /// Open task whose due date is strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < now)
    }

    /// Validates task invariants.
    ///
    /// # Errors
    /// - Returns the first violated invariant.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.is_nil() {
            return Err(TaskValidationError::NilId);
        }
        if self.title.trim().is_empty() {
            return Err(TaskValidationError::BlankTitle);
        }
        match (self.completed, self.completed_at.is_some()) {
            (true, false) => return Err(TaskValidationError::MissingCompletedAt),
            (false, true) => return Err(TaskValidationError::UnexpectedCompletedAt),
            _ => {}
        }
        for (field, value) in [
            ("estimated_minutes", self.estimated_minutes),
            ("actual_minutes", self.actual_minutes),
        ] {
            if value == Some(0) {
                return Err(TaskValidationError::NonPositiveMinutes { field, value: 0 });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{Priority, Task, TaskValidationError};
    use chrono::{Duration, TimeZone, Utc};
    use uuid::Uuid;

    #[test]
    fn new_task_starts_open_with_empty_collections() {
        let created = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let task = Task::new("write report", created);

        assert!(!task.id.is_nil());
        assert!(task.is_active());
        assert!(task.labels.is_empty());
        assert!(task.comments.is_empty());
        assert_eq!(task.priority, Priority::Medium);
        assert!(task.validate().is_ok());
    }

    #[test]
    fn validate_checks_completion_pairing() {
        let created = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mut task = Task::new("ship", created);
        task.completed = true;
        assert_eq!(task.validate(), Err(TaskValidationError::MissingCompletedAt));

        task.completed = false;
        task.completed_at = Some(created);
        assert_eq!(
            task.validate(),
            Err(TaskValidationError::UnexpectedCompletedAt)
        );
    }

    #[test]
    fn validate_rejects_zero_minutes_and_nil_id() {
        let created = Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap();
        let mut task = Task::with_id(Uuid::nil(), "x", created);
        assert_eq!(task.validate(), Err(TaskValidationError::NilId));

        task.id = Uuid::new_v4();
        task.actual_minutes = Some(0);
        assert_eq!(
            task.validate(),
            Err(TaskValidationError::NonPositiveMinutes {
                field: "actual_minutes",
                value: 0
            })
        );
    }

    #[test]
    fn overdue_requires_open_task_with_past_due_date() {
        let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
        let mut task = Task::new("pay rent", now - Duration::days(5));
        assert!(!task.is_overdue(now));

        task.due_date = Some(now - Duration::hours(1));
        assert!(task.is_overdue(now));

        task.complete(now);
        assert!(!task.is_overdue(now));
    }

    #[test]
    fn priority_weights_are_ordered() {
        assert_eq!(Priority::High.weight(), 3);
        assert_eq!(Priority::Medium.weight(), 2);
        assert_eq!(Priority::Low.weight(), 1);
        assert_eq!(Priority::High.to_string(), "high");
    }
}
