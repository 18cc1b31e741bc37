//! Per-day workload aggregation and balance.
//!
//! # Invariants
//! - One `WorkloadDay` per calendar day in the window, empty days included.
//! - Missing estimates count as 60 minutes.
//! - `balance` is 100 whenever the busiest day has no estimated work.

use crate::analytics::weekday_name;
use crate::model::task::{Priority, Task};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::Serialize;

const DEFAULT_ESTIMATE_MINUTES: u32 = 60;
const OVERLOAD_FACTOR: f64 = 1.5;
const MAX_HIGH_PRIORITY_PER_DAY: u32 = 3;

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WeekWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl WeekWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Sunday-to-Saturday week containing `instant`.
    pub fn containing(instant: DateTime<Utc>) -> Self {
        let day = instant.date_naive();
        let start = day - Duration::days(i64::from(day.weekday().num_days_from_sunday()));
        Self {
            start,
            end: start + Duration::days(6),
        }
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        self.start <= day && day <= self.end
    }

    /// Days in order; empty when `end < start`.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |day| *day <= end)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PriorityBreakdown {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
}

impl PriorityBreakdown {
    fn record(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::High => self.high += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadDay {
    pub date: NaiveDate,
    pub tasks: Vec<Task>,
    pub total_estimated_minutes: u32,
    pub priority_breakdown: PriorityBreakdown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusiestDay {
    pub date: NaiveDate,
    pub minutes: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadMetrics {
    /// Rounded mean of daily minutes.
    pub average_daily: u32,
    pub max_daily: u32,
    pub min_daily: u32,
    /// `0..=100`, higher is more even.
    pub balance: u8,
    pub total_tasks: usize,
    /// `None` when no day carries work.
    pub busiest_day: Option<BusiestDay>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    OverloadedDay,
    TooManyHighPriority,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadRecommendation {
    pub kind: RecommendationKind,
    pub date: NaiveDate,
    pub message: String,
    pub suggestion: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkloadAnalysis {
    pub window: WeekWindow,
    pub days: Vec<WorkloadDay>,
    pub metrics: WorkloadMetrics,
    pub recommendations: Vec<WorkloadRecommendation>,
}

/// Aggregates tasks due inside `window` into per-day workload.
pub fn analyze_workload_balance(tasks: &[Task], window: WeekWindow) -> WorkloadAnalysis {
    let mut days: Vec<WorkloadDay> = window
        .days()
        .map(|date| WorkloadDay {
            date,
            tasks: Vec::new(),
            total_estimated_minutes: 0,
            priority_breakdown: PriorityBreakdown::default(),
        })
        .collect();

    let mut total_tasks = 0;
    for task in tasks {
        let Some(due) = task.due_date.map(|due| due.date_naive()) else {
            continue;
        };
        let Some(day) = days.iter_mut().find(|day| day.date == due) else {
            continue;
        };
        total_tasks += 1;
        day.total_estimated_minutes = day
            .total_estimated_minutes
            .saturating_add(task.estimated_minutes.unwrap_or(DEFAULT_ESTIMATE_MINUTES));
        day.priority_breakdown.record(task.priority);
        day.tasks.push(task.clone());
    }

    let minutes: Vec<u32> = days.iter().map(|day| day.total_estimated_minutes).collect();
    let max_daily = minutes.iter().copied().max().unwrap_or(0);
    let min_daily = minutes.iter().copied().min().unwrap_or(0);
    let average = if minutes.is_empty() {
        0.0
    } else {
        minutes.iter().map(|m| f64::from(*m)).sum::<f64>() / minutes.len() as f64
    };
    let balance = if max_daily > 0 {
        1.0 - f64::from(max_daily - min_daily) / f64::from(max_daily)
    } else {
        1.0
    };

    let busiest_day = days.iter().fold(None, |busiest: Option<BusiestDay>, day| {
        let current = busiest.map_or(0, |b| b.minutes);
        if day.total_estimated_minutes > current {
            Some(BusiestDay {
                date: day.date,
                minutes: day.total_estimated_minutes,
            })
        } else {
            busiest
        }
    });

    let recommendations = recommend(&days, average);

    WorkloadAnalysis {
        window,
        metrics: WorkloadMetrics {
            average_daily: average.round() as u32,
            max_daily,
            min_daily,
            balance: (balance * 100.0).round() as u8,
            total_tasks,
            busiest_day,
        },
        days,
        recommendations,
    }
}

fn recommend(days: &[WorkloadDay], average: f64) -> Vec<WorkloadRecommendation> {
    let mut recommendations = Vec::new();
    for day in days {
        let name = weekday_name(day.date.weekday());
        if f64::from(day.total_estimated_minutes) > average * OVERLOAD_FACTOR {
            recommendations.push(WorkloadRecommendation {
                kind: RecommendationKind::OverloadedDay,
                date: day.date,
                message: format!(
                    "{name} is overloaded ({} hours)",
                    (f64::from(day.total_estimated_minutes) / 60.0).round()
                ),
                suggestion: "Consider moving some tasks to other days".to_string(),
            });
        }
        if day.priority_breakdown.high > MAX_HIGH_PRIORITY_PER_DAY {
            recommendations.push(WorkloadRecommendation {
                kind: RecommendationKind::TooManyHighPriority,
                date: day.date,
                message: format!("Too many high-priority tasks on {name}"),
                suggestion: "Spread high-priority tasks across the week".to_string(),
            });
        }
    }
    recommendations
}
