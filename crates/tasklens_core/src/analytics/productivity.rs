//! Trailing-window productivity score.

use crate::analytics::ratio_or;
use crate::model::task::Task;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

const COMPLETION_WEIGHT: f64 = 0.4;
const ON_TIME_WEIGHT: f64 = 0.3;
const PRIORITY_WEIGHT: f64 = 0.3;

/// Score plus the component rates it was built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProductivityBreakdown {
    /// `0..=100`.
    pub score: u8,
    pub completion_rate: f64,
    /// `1.0` when nothing relevant was completed.
    pub on_time_rate: f64,
    pub priority_score: f64,
    pub relevant_tasks: usize,
    pub completed_tasks: usize,
}

/// Computes the productivity breakdown for tasks created in the last
/// `timeframe_days` days before `now`.
///
/// A completed task counts as on time when it has no due date, or when its
/// completion reference (`completed_at`, falling back to `created_at`) is not
/// after the due date. A window reaching past the earliest representable
/// instant covers every task.
pub fn productivity_breakdown(
    tasks: &[Task],
    timeframe_days: u32,
    now: DateTime<Utc>,
) -> ProductivityBreakdown {
    let window_start = Duration::try_days(i64::from(timeframe_days))
        .and_then(|span| now.checked_sub_signed(span))
        .unwrap_or(DateTime::<Utc>::MIN_UTC);
    let relevant: Vec<&Task> = tasks
        .iter()
        .filter(|task| task.created_at >= window_start)
        .collect();

    if relevant.is_empty() {
        return ProductivityBreakdown {
            score: 0,
            completion_rate: 0.0,
            on_time_rate: 1.0,
            priority_score: 0.0,
            relevant_tasks: 0,
            completed_tasks: 0,
        };
    }

    let completed: Vec<&Task> = relevant
        .iter()
        .copied()
        .filter(|task| task.completed)
        .collect();

    let completion_rate = completed.len() as f64 / relevant.len() as f64;

    let on_time = completed
        .iter()
        .filter(|task| match task.due_date {
            None => true,
            Some(due) => task.completed_at.unwrap_or(task.created_at) <= due,
        })
        .count();
    let on_time_rate = ratio_or(on_time as f64, completed.len() as f64, 1.0);

    let weighted_completed: u32 = completed.iter().map(|task| task.priority.weight()).sum();
    let weighted_total: u32 = relevant.iter().map(|task| task.priority.weight()).sum();
    let priority_score = ratio_or(
        f64::from(weighted_completed),
        f64::from(weighted_total),
        0.0,
    );

    let blended = completion_rate * COMPLETION_WEIGHT
        + on_time_rate * ON_TIME_WEIGHT
        + priority_score * PRIORITY_WEIGHT;
    // `f64::round` rounds half away from zero.
    let score = (blended * 100.0).round().clamp(0.0, 100.0) as u8;

    ProductivityBreakdown {
        score,
        completion_rate,
        on_time_rate,
        priority_score,
        relevant_tasks: relevant.len(),
        completed_tasks: completed.len(),
    }
}

/// Returns the `0..=100` productivity score. Empty input scores `0`.
pub fn calculate_productivity_score(tasks: &[Task], timeframe_days: u32, now: DateTime<Utc>) -> u8 {
    productivity_breakdown(tasks, timeframe_days, now).score
}

#[cfg(test)]
mod tests {
    use super::{calculate_productivity_score, productivity_breakdown};
    use crate::model::task::Task;
    use chrono::{Duration, TimeZone, Utc};

    #[test]
    fn empty_input_scores_zero() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        assert_eq!(calculate_productivity_score(&[], 30, now), 0);
    }

    #[test]
    fn tasks_outside_window_are_ignored() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let mut old = Task::new("old", now - Duration::days(40));
        old.complete(now - Duration::days(39));
        assert_eq!(calculate_productivity_score(&[old], 30, now), 0);
    }

    #[test]
    fn no_completions_keep_on_time_neutral() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let tasks = vec![Task::new("a", now - Duration::days(1))];
        let breakdown = productivity_breakdown(&tasks, 30, now);
        assert_eq!(breakdown.on_time_rate, 1.0);
        assert_eq!(breakdown.completion_rate, 0.0);
        assert_eq!(breakdown.score, 30);
    }

    #[test]
    fn late_completion_lowers_on_time_rate() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let created = now - Duration::days(10);
        let mut late = Task::new("late", created);
        late.due_date = Some(created + Duration::days(1));
        late.complete(created + Duration::days(2));
        let mut fine = Task::new("fine", created);
        fine.complete(created + Duration::days(2));

        let breakdown = productivity_breakdown(&[late, fine], 30, now);
        assert_eq!(breakdown.on_time_rate, 0.5);
        // 0.4 * 1.0 + 0.3 * 0.5 + 0.3 * 1.0 = 0.85
        assert_eq!(breakdown.score, 85);
    }

    #[test]
    fn oversized_timeframe_covers_every_task() {
        let now = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let mut done = Task::new("done", now - Duration::days(400));
        done.complete(now - Duration::days(399));
        let open = Task::new("open", now - Duration::days(1));

        let breakdown = productivity_breakdown(&[done, open], u32::MAX, now);
        assert_eq!(breakdown.relevant_tasks, 2);
        assert_eq!(breakdown.completed_tasks, 1);
        assert_eq!(calculate_productivity_score(&[], u32::MAX, now), 0);
    }
}
