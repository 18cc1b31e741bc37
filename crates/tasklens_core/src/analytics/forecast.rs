//! Duration forecast from comparable completed tasks.

use crate::model::task::{Priority, Task};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastConfidence {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastBasis {
    /// No comparable history; fixed per-priority guess.
    DefaultEstimate,
    /// Number of comparable tasks averaged.
    SimilarTasks(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CompletionForecast {
    pub estimated_minutes: u32,
    pub confidence: ForecastConfidence,
    pub basis: ForecastBasis,
    /// `(min, max)` minutes; only present for history-based forecasts.
    pub range: Option<(u32, u32)>,
}

fn default_estimate(priority: Priority) -> u32 {
    match priority {
        Priority::High => 180,
        Priority::Medium => 120,
        Priority::Low => 60,
    }
}

/// Predicts how long `task` will take.
///
/// Comparable tasks are completed, share priority and project, and recorded
/// `actual_minutes`.
pub fn predict_completion(task: &Task, history: &[Task]) -> CompletionForecast {
    let samples: Vec<u32> = history
        .iter()
        .filter(|past| {
            past.completed && past.priority == task.priority && past.project_id == task.project_id
        })
        .filter_map(|past| past.actual_minutes)
        .collect();

    if samples.is_empty() {
        return CompletionForecast {
            estimated_minutes: default_estimate(task.priority),
            confidence: ForecastConfidence::Low,
            basis: ForecastBasis::DefaultEstimate,
            range: None,
        };
    }

    let average =
        samples.iter().map(|m| f64::from(*m)).sum::<f64>() / samples.len() as f64;
    let raw_confidence = (samples.len() * 20).min(90);
    let confidence = if raw_confidence > 70 {
        ForecastConfidence::High
    } else if raw_confidence > 40 {
        ForecastConfidence::Medium
    } else {
        ForecastConfidence::Low
    };

    CompletionForecast {
        estimated_minutes: average.round() as u32,
        confidence,
        basis: ForecastBasis::SimilarTasks(samples.len()),
        range: Some(((average * 0.7).round() as u32, (average * 1.3).round() as u32)),
    }
}
