//! Productivity analytics over task snapshots.
//!
//! # Responsibility
//! - Score recent productivity and detect behavioral patterns.
//! - Aggregate per-day workload and rank rule-based optimizations.
//! - Forecast task duration from comparable history.
//!
//! # Invariants
//! - Every function is pure over its inputs; "now" is always a parameter.
//! - Ratios with a zero denominator resolve to documented defaults, never NaN.
//! - Calendar days and weekdays are taken in UTC.

pub mod forecast;
pub mod optimize;
pub mod patterns;
pub mod productivity;
pub mod workload;

use chrono::Weekday;

/// Full English weekday name.
pub(crate) fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `numerator / denominator`, or `fallback` when the denominator is zero.
pub(crate) fn ratio_or(numerator: f64, denominator: f64, fallback: f64) -> f64 {
    if denominator == 0.0 {
        fallback
    } else {
        numerator / denominator
    }
}
