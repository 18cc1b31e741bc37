//! Behavioral pattern detection.
//!
//! # Invariants
//! - Patterns are emitted in fixed order: productive day, project success,
//!   overdue priority.
//! - Ties inside any grouping resolve to the first encountered key.

use crate::analytics::weekday_name;
use crate::model::catalog::Project;
use crate::model::task::{Priority, Task};
use chrono::{DateTime, Datelike, Utc, Weekday};
use serde::Serialize;

const PRODUCTIVE_DAY_MAX_CONFIDENCE: f64 = 95.0;
const PROJECT_MIN_TASKS: usize = 3;
const PROJECT_MIN_COMPLETION: f64 = 0.7;
const PROJECT_MAX_CONFIDENCE: f64 = 90.0;
const OVERDUE_CONFIDENCE: f64 = 85.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    ProductiveDay,
    ProjectSuccess,
    OverduePriority,
}

/// Confidence-scored observation about past behavior.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pattern {
    pub kind: PatternKind,
    pub title: String,
    pub description: String,
    /// Percentage in `0..=100`.
    pub confidence: f64,
    pub actionable: String,
}

/// Detects patterns in `tasks`; `now` decides which open tasks are overdue.
pub fn identify_patterns(tasks: &[Task], projects: &[Project], now: DateTime<Utc>) -> Vec<Pattern> {
    [
        productive_day(tasks),
        project_success(tasks, projects),
        overdue_priority(tasks, now),
    ]
    .into_iter()
    .flatten()
    .collect()
}

fn productive_day(tasks: &[Task]) -> Option<Pattern> {
    let completion_days: Vec<Weekday> = tasks
        .iter()
        .filter(|task| task.completed)
        .filter_map(|task| task.completed_at)
        .map(|at| at.weekday())
        .collect();

    let (day, count) = first_max(tally(completion_days.iter().copied()))?;
    if count == 0 {
        return None;
    }

    let name = weekday_name(day);
    let confidence =
        (count as f64 / completion_days.len() as f64 * 100.0).min(PRODUCTIVE_DAY_MAX_CONFIDENCE);
    Some(Pattern {
        kind: PatternKind::ProductiveDay,
        title: "Most productive day".to_string(),
        description: format!("You complete the most tasks on {name} ({count} tasks)"),
        confidence,
        actionable: format!("Schedule important tasks for {name}"),
    })
}

fn project_success(tasks: &[Task], projects: &[Project]) -> Option<Pattern> {
    let mut best: Option<(&Project, f64, usize)> = None;
    for project in projects {
        let (total, completed) = tasks
            .iter()
            .filter(|task| task.project_id == Some(project.id))
            .fold((0usize, 0usize), |(total, completed), task| {
                (total + 1, completed + usize::from(task.completed))
            });
        if total < PROJECT_MIN_TASKS {
            continue;
        }
        let rate = completed as f64 / total as f64;
        if best.map_or(true, |(_, best_rate, _)| rate > best_rate) {
            best = Some((project, rate, total));
        }
    }

    let (project, rate, total) = best.filter(|(_, rate, _)| *rate > PROJECT_MIN_COMPLETION)?;
    Some(Pattern {
        kind: PatternKind::ProjectSuccess,
        title: "Successful project".to_string(),
        description: format!(
            "Project \"{}\" has the highest completion rate ({}%)",
            project.name,
            (rate * 100.0).round()
        ),
        confidence: (total as f64 * 10.0).min(PROJECT_MAX_CONFIDENCE),
        actionable: "Apply what works in this project to the others".to_string(),
    })
}

fn overdue_priority(tasks: &[Task], now: DateTime<Utc>) -> Option<Pattern> {
    let overdue: Vec<Priority> = tasks
        .iter()
        .filter(|task| task.is_overdue(now))
        .map(|task| task.priority)
        .collect();
    let (priority, _) = first_max(tally(overdue.iter().copied()))?;

    Some(Pattern {
        kind: PatternKind::OverduePriority,
        title: "Overdue tasks".to_string(),
        description: format!(
            "You have {} overdue tasks, mostly with \"{priority}\" priority",
            overdue.len()
        ),
        confidence: OVERDUE_CONFIDENCE,
        actionable: "Consider revisiting deadlines or priorities".to_string(),
    })
}

/// Counts keys in first-encountered order.
fn tally<K: PartialEq>(keys: impl Iterator<Item = K>) -> Vec<(K, usize)> {
    let mut counts: Vec<(K, usize)> = Vec::new();
    for key in keys {
        match counts.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    counts
}

/// Highest count; the earliest entry wins ties.
fn first_max<K>(counts: Vec<(K, usize)>) -> Option<(K, usize)> {
    counts
        .into_iter()
        .fold(None, |best: Option<(K, usize)>, (key, count)| match best {
            Some((_, best_count)) if best_count >= count => best,
            _ => Some((key, count)),
        })
}
