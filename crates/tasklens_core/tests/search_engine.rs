use chrono::{DateTime, Duration, TimeZone, Utc};
use tasklens_core::search::engine::EntityKind;
use tasklens_core::{
    advanced_search, search, suggest, Label, Priority, Project, StatusFilter, Task, TaskFilters,
};
use uuid::Uuid;

fn created() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap()
}

fn fixture() -> (Vec<Task>, Vec<Project>, Vec<Label>) {
    let mut design_system = Project::new("Design system");
    design_system.description = Some("design tokens and components".to_string());
    let website = Project::new("Website");

    let mut mockups = Task::new("Design mockups", created());
    mockups.description = Some("design the landing page".to_string());
    mockups.project_id = Some(website.id);

    let title_only = Task::new("Design sync", created());

    let mut groceries = Task::new("Buy groceries", created());
    groceries.description = Some("milk and eggs".to_string());

    (
        vec![mockups, title_only, groceries],
        vec![design_system, website],
        vec![Label::new("design"), Label::new("urgent")],
    )
}

#[test]
fn empty_snapshot_yields_no_results() {
    let results = search("design", &[], &[], &[]);
    assert_eq!(results.total, 0);
    assert!(results.is_empty());
}

#[test]
fn queries_below_two_chars_are_ignored() {
    let (tasks, projects, labels) = fixture();
    assert!(search("d", &tasks, &projects, &labels).is_empty());
    assert!(search("   ", &tasks, &projects, &labels).is_empty());
}

#[test]
fn suggestions_merge_title_words_and_names() {
    let (tasks, projects, labels) = fixture();
    assert_eq!(
        suggest("des", &tasks, &projects, &labels),
        vec!["design".to_string(), "design system".to_string()]
    );
}

#[test]
fn ranks_each_entity_type_within_its_threshold() {
    let (tasks, projects, labels) = fixture();
    let results = search("design", &tasks, &projects, &labels);

    let task_titles: Vec<&str> = results
        .tasks
        .iter()
        .map(|hit| hit.item.title.as_str())
        .collect();
    // Title alone carries 0.4 of the weight, so a title-only hit scores 0.6.
    assert_eq!(task_titles, vec!["Design mockups"]);

    assert_eq!(results.projects.len(), 1);
    assert_eq!(results.projects[0].item.name, "Design system");
    assert_eq!(results.projects[0].score, 0.0);

    assert_eq!(results.labels.len(), 1);
    assert_eq!(results.labels[0].item.name, "design");

    assert_eq!(results.total, 3);
    for hit in results.iter_hits() {
        assert!((0.0..=1.0).contains(&hit.score()));
    }
    let kinds: Vec<EntityKind> = results.iter_hits().map(|hit| hit.kind()).collect();
    assert_eq!(
        kinds,
        vec![EntityKind::Task, EntityKind::Project, EntityKind::Label]
    );
}

#[test]
fn typo_still_finds_label() {
    let (tasks, projects, labels) = fixture();
    let results = search("desgn", &tasks, &projects, &labels);
    assert_eq!(results.labels.len(), 1);
    assert!(results.labels[0].score > 0.0);
    assert!(results.labels[0].score <= 0.2);
}

#[test]
fn advanced_search_applies_filters_without_query() {
    let now = created() + Duration::days(3);
    let (mut tasks, projects, _) = fixture();
    tasks[0].priority = Priority::High;
    tasks[1].due_date = Some(created() + Duration::days(1));
    tasks[2].complete(created() + Duration::hours(2));

    let high = TaskFilters {
        priority: Some(Priority::High),
        ..TaskFilters::default()
    };
    let found = advanced_search("", &high, &tasks, &projects, now);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Design mockups");

    let overdue = TaskFilters {
        status: StatusFilter::Overdue,
        ..TaskFilters::default()
    };
    let found = advanced_search("x", &overdue, &tasks, &projects, now);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].title, "Design sync");

    let completed = TaskFilters {
        status: StatusFilter::Completed,
        ..TaskFilters::default()
    };
    assert!(advanced_search("design", &completed, &tasks, &projects, now).is_empty());
}

#[test]
fn dangling_references_are_tolerated_and_ties_keep_input_order() {
    let missing_project = Uuid::new_v4();
    let tasks: Vec<Task> = ["Design alpha", "Design beta"]
        .iter()
        .map(|title| {
            let mut task = Task::new(*title, created());
            task.description = Some("design notes".to_string());
            task.project_id = Some(missing_project);
            task.labels.insert(Uuid::new_v4());
            task
        })
        .collect();
    let projects = vec![Project::new("Unrelated")];

    let results = search("design", &tasks, &projects, &[]);
    let ids: Vec<Uuid> = results.tasks.iter().map(|hit| hit.item.id).collect();
    assert_eq!(ids, vec![tasks[0].id, tasks[1].id]);
    assert_eq!(results.tasks[0].score, results.tasks[1].score);

    let reversed: Vec<Task> = tasks.iter().rev().cloned().collect();
    let results = search("design", &reversed, &projects, &[]);
    let ids: Vec<Uuid> = results.tasks.iter().map(|hit| hit.item.id).collect();
    assert_eq!(ids, vec![tasks[1].id, tasks[0].id]);
}
