//! Rule-based optimization advice.
//!
//! # Invariants
//! - Output is sorted by `impact + effort` weight, descending.
//! - Equal weights keep rule-definition order.

use crate::model::catalog::Project;
use crate::model::task::{Priority, Task};
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const UPCOMING_WINDOW_DAYS: i64 = 7;
const HIGH_PRIORITY_SHARE: f64 = 0.5;
const LONG_TASK_MINUTES: f64 = 120.0;
const MAX_UPCOMING_DEADLINES: usize = 5;
const MAX_ACTIVE_PROJECTS: usize = 3;
const DEFAULT_ACTUAL_MINUTES: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Impact {
    Low,
    Medium,
    High,
}

impl Impact {
    pub fn weight(self) -> u8 {
        match self {
            Self::High => 3,
            Self::Medium => 2,
            Self::Low => 1,
        }
    }
}

/// Work required to apply an optimization; lower effort ranks higher.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Effort {
    Low,
    Medium,
    High,
}

impl Effort {
    pub fn weight(self) -> u8 {
        match self {
            Self::Low => 3,
            Self::Medium => 2,
            Self::High => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OptimizationKind {
    PriorityBalance,
    TaskBreakdown,
    DeadlineManagement,
    ProjectFocus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Optimization {
    pub kind: OptimizationKind,
    pub title: String,
    pub description: String,
    pub impact: Impact,
    pub effort: Effort,
    pub action: String,
}

impl Optimization {
    /// Ranking weight, `2..=6`.
    pub fn rank_weight(&self) -> u8 {
        self.impact.weight() + self.effort.weight()
    }
}

/// Snapshot-wide workload counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorkloadSummary {
    pub total_tasks: usize,
    pub active_tasks: usize,
    pub completed_tasks: usize,
    pub overdue_tasks: usize,
    /// Open tasks with high priority.
    pub high_priority_tasks: usize,
    /// Open tasks due within the next seven days (overdue included).
    pub upcoming_deadlines: usize,
    /// Projects with at least one open task.
    pub active_projects: usize,
}

impl WorkloadSummary {
    pub fn from_snapshot(tasks: &[Task], projects: &[Project], now: DateTime<Utc>) -> Self {
        let horizon = now + Duration::days(UPCOMING_WINDOW_DAYS);
        let active: Vec<&Task> = tasks.iter().filter(|task| task.is_active()).collect();

        Self {
            total_tasks: tasks.len(),
            active_tasks: active.len(),
            completed_tasks: tasks.len() - active.len(),
            overdue_tasks: active.iter().filter(|task| task.is_overdue(now)).count(),
            high_priority_tasks: active
                .iter()
                .filter(|task| task.priority == Priority::High)
                .count(),
            upcoming_deadlines: active
                .iter()
                .filter(|task| task.due_date.is_some_and(|due| due <= horizon))
                .count(),
            active_projects: projects
                .iter()
                .filter(|project| {
                    active
                        .iter()
                        .any(|task| task.project_id == Some(project.id))
                })
                .count(),
        }
    }

    /// Completed share of all tasks, in percent.
    pub fn completion_rate(&self) -> f64 {
        if self.total_tasks == 0 {
            0.0
        } else {
            self.completed_tasks as f64 / self.total_tasks as f64 * 100.0
        }
    }
}

/// Observed work habits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Habits {
    /// Mean `actual_minutes` of completed tasks (missing counts as 60).
    pub average_task_duration: f64,
}

impl Habits {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let (sum, count) = tasks
            .iter()
            .filter(|task| task.completed)
            .fold((0u64, 0usize), |(sum, count), task| {
                let minutes = task.actual_minutes.unwrap_or(DEFAULT_ACTUAL_MINUTES);
                (sum + u64::from(minutes), count + 1)
            });
        Self {
            average_task_duration: sum as f64 / count.max(1) as f64,
        }
    }
}

/// Ranks every triggered optimization rule.
pub fn suggest_optimizations(workload: &WorkloadSummary, habits: &Habits) -> Vec<Optimization> {
    let mut suggestions = Vec::new();

    if workload.high_priority_tasks as f64 > workload.active_tasks as f64 * HIGH_PRIORITY_SHARE {
        suggestions.push(Optimization {
            kind: OptimizationKind::PriorityBalance,
            title: "Balance your priorities".to_string(),
            description: "Too many high-priority tasks can lead to stress".to_string(),
            impact: Impact::High,
            effort: Effort::Low,
            action: "Review priorities and lower some to medium".to_string(),
        });
    }

    if habits.average_task_duration > LONG_TASK_MINUTES {
        suggestions.push(Optimization {
            kind: OptimizationKind::TaskBreakdown,
            title: "Break down large tasks".to_string(),
            description: "Large tasks are harder to finish and track".to_string(),
            impact: Impact::Medium,
            effort: Effort::Medium,
            action: "Split tasks longer than two hours into smaller pieces".to_string(),
        });
    }

    if workload.upcoming_deadlines > MAX_UPCOMING_DEADLINES {
        suggestions.push(Optimization {
            kind: OptimizationKind::DeadlineManagement,
            title: "Manage deadlines".to_string(),
            description: "Many approaching deadlines create pressure".to_string(),
            impact: Impact::High,
            effort: Effort::Medium,
            action: "Spread deadline-bound tasks more evenly".to_string(),
        });
    }

    if workload.active_projects > MAX_ACTIVE_PROJECTS {
        suggestions.push(Optimization {
            kind: OptimizationKind::ProjectFocus,
            title: "Focus on fewer projects".to_string(),
            description: "Working on many projects at once lowers efficiency".to_string(),
            impact: Impact::High,
            effort: Effort::High,
            action: "Concentrate on the two or three most important projects".to_string(),
        });
    }

    // Stable: equal weights keep rule order.
    suggestions.sort_by(|a, b| b.rank_weight().cmp(&a.rank_weight()));
    suggestions
}
