use chrono::{Duration, TimeZone, Utc};
use tasklens_core::config::{EngineConfig, RateLimitConfig};
use tasklens_core::{
    InsightService, MemoryKeyValueRepository, Priority, Project, RateLimiter, Snapshot, Task,
    WeekWindow,
};
use uuid::Uuid;

fn snapshot() -> Snapshot {
    let created = Utc.with_ymd_and_hms(2026, 6, 1, 9, 0, 0).unwrap();
    let project = Project::new("Launch");

    let mut plan = Task::new("Plan launch", created);
    plan.description = Some("plan the launch checklist".to_string());
    plan.project_id = Some(project.id);
    plan.priority = Priority::High;

    let mut done = Task::new("Write copy", created);
    done.project_id = Some(project.id);
    done.actual_minutes = Some(90);
    done.complete(created + Duration::hours(3));

    Snapshot::new(vec![plan, done], vec![project], Vec::new())
}

#[test]
fn service_reads_snapshot_for_search_and_history() {
    let service = InsightService::new(snapshot(), MemoryKeyValueRepository::new());

    let results = service.search("plan");
    assert_eq!(results.tasks.len(), 1);
    assert_eq!(results.tasks[0].item.title, "Plan launch");

    service.add_search("Plan");
    service.add_search(" plan ");
    assert_eq!(service.get_history().len(), 1);
    service.clear_history();
    assert!(service.get_history().is_empty());

    assert_eq!(
        service.highlight("Plan launch", "launch"),
        "Plan <mark>launch</mark>"
    );
}

#[test]
fn report_covers_every_metric() {
    let service = InsightService::new(snapshot(), MemoryKeyValueRepository::new());
    let now = Utc.with_ymd_and_hms(2026, 6, 3, 12, 0, 0).unwrap();

    let report = service.report(7, now);
    assert_eq!(report.productivity.relevant_tasks, 2);
    assert_eq!(report.summary.active_tasks, 1);
    assert_eq!(report.habits.average_task_duration, 90.0);
    assert_eq!(report.workload.window, WeekWindow::containing(now));
    assert_eq!(
        report.productivity.score,
        service.calculate_productivity_score(7, now)
    );
    assert_eq!(report.optimizations, service.suggest_optimizations(now));

    let json = serde_json::to_value(&report).unwrap();
    assert!(json.get("patterns").is_some());
}

#[test]
fn forecast_requires_a_known_task() {
    let snapshot = snapshot();
    let plan_id = snapshot.tasks[0].id;
    let service = InsightService::new(snapshot, MemoryKeyValueRepository::new());

    let forecast = service.predict_completion(plan_id).unwrap();
    assert_eq!(forecast.estimated_minutes, 180);
    assert!(service.predict_completion(Uuid::new_v4()).is_none());
}

#[test]
fn custom_config_flows_into_history_and_limiter() {
    let mut config = EngineConfig::default();
    config.history.max_items = 1;
    config.rate_limit = RateLimitConfig {
        max_requests: 1,
        window_ms: 500,
    };
    let service =
        InsightService::with_config(snapshot(), MemoryKeyValueRepository::new(), config.clone());
    service.add_search("first");
    service.add_search("second");
    assert_eq!(service.get_history().len(), 1);

    let mut limiter = RateLimiter::new(config.rate_limit);
    assert!(limiter.check("host", 0).allowed);
    let denied = limiter.check("host", 10);
    assert!(!denied.allowed);
    assert_eq!(denied.reset_at_ms, 500);
}
