use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use tasklens_core::analytics::optimize::OptimizationKind;
use tasklens_core::{
    analyze_workload_balance, calculate_productivity_score, productivity_breakdown,
    suggest_optimizations, Habits, Priority, Project, Task, WeekWindow, WorkloadSummary,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 10, 12, 0, 0).unwrap()
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, d).unwrap()
}

fn due_on(d: u32, minutes: u32) -> Task {
    let mut task = Task::new("due", now() - Duration::days(20));
    task.due_date = Some(Utc.with_ymd_and_hms(2026, 6, d, 9, 0, 0).unwrap());
    task.estimated_minutes = Some(minutes);
    task
}

#[test]
fn productivity_blends_completion_on_time_and_priority() {
    let created = now() - Duration::days(3);
    let mut tasks = Vec::new();
    for i in 0..10 {
        let mut task = Task::new(format!("task {i}"), created);
        task.priority = if i < 5 { Priority::High } else { Priority::Low };
        task.due_date = Some(created + Duration::days(2));
        tasks.push(task);
    }
    // Three of the high and two of the low tasks, all before their due date.
    for index in [0, 1, 2, 5, 6] {
        tasks[index].complete(created + Duration::days(1));
    }

    let breakdown = productivity_breakdown(&tasks, 7, now());
    assert_eq!(breakdown.completion_rate, 0.5);
    assert_eq!(breakdown.on_time_rate, 1.0);
    assert!((breakdown.priority_score - 0.55).abs() < 1e-12);
    // 100 * (0.4 * 0.5 + 0.3 * 1.0 + 0.3 * 0.55) = 66.5, rounded half away from zero.
    assert_eq!(breakdown.score, 67);
    assert_eq!(calculate_productivity_score(&tasks, 7, now()), 67);
}

#[test]
fn productivity_of_empty_input_is_zero() {
    assert_eq!(calculate_productivity_score(&[], 7, now()), 0);
}

#[test]
fn workload_finds_busiest_day_and_balance() {
    let mut tasks: Vec<Task> = (0..5).map(|_| due_on(1, 60)).collect();
    tasks.push(due_on(2, 60));

    let analysis = analyze_workload_balance(&tasks, WeekWindow::new(day(1), day(2)));
    let busiest = analysis.metrics.busiest_day.unwrap();
    assert_eq!(busiest.date, day(1));
    assert_eq!(busiest.minutes, 300);
    assert_eq!(analysis.metrics.balance, 20);
    assert_eq!(analysis.metrics.average_daily, 180);
    assert_eq!(analysis.metrics.total_tasks, 6);
    assert_eq!(analysis.recommendations.len(), 1);
    assert_eq!(analysis.recommendations[0].date, day(1));
    assert!(analysis.recommendations[0].message.contains("Monday"));
}

#[test]
fn evenly_loaded_days_are_fully_balanced() {
    let tasks = vec![due_on(1, 90), due_on(2, 90)];
    let analysis = analyze_workload_balance(&tasks, WeekWindow::new(day(1), day(2)));
    assert_eq!(analysis.metrics.balance, 100);
    assert!(analysis.recommendations.is_empty());
}

#[test]
fn crowded_priorities_and_projects_are_both_flagged() {
    let projects: Vec<Project> = (0..4).map(|i| Project::new(format!("p{i}"))).collect();
    let mut tasks = Vec::new();
    for i in 0..6 {
        let mut task = Task::new(format!("open {i}"), now() - Duration::days(1));
        task.project_id = Some(projects[i % 4].id);
        if i < 4 {
            task.priority = Priority::High;
        }
        tasks.push(task);
    }

    let summary = WorkloadSummary::from_snapshot(&tasks, &projects, now());
    assert_eq!(summary.active_projects, 4);
    assert_eq!(summary.high_priority_tasks, 4);

    let habits = Habits::from_tasks(&tasks);
    let first: Vec<OptimizationKind> = suggest_optimizations(&summary, &habits)
        .into_iter()
        .map(|optimization| optimization.kind)
        .collect();
    assert_eq!(
        first,
        vec![
            OptimizationKind::PriorityBalance,
            OptimizationKind::ProjectFocus
        ]
    );

    let second: Vec<OptimizationKind> = suggest_optimizations(&summary, &habits)
        .into_iter()
        .map(|optimization| optimization.kind)
        .collect();
    assert_eq!(first, second);
}
