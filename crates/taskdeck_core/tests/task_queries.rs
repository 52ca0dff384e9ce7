use chrono::{DateTime, Duration, TimeZone, Utc};
use taskdeck_core::{
    days_until_at, deadline_badge_at, filter_by_category, filter_completed, is_overdue_at,
    sort_by_deadline, Category, DeadlineBadge, MemorySlotStorage, SlotTaskRepository, Task,
    TaskListQuery, TaskListView, TaskRepository,
};

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 10, 17, 12, 0, 0).unwrap()
}

fn task(id: &str, category: Category, deadline: DateTime<Utc>, completed: bool) -> Task {
    Task {
        id: id.to_string(),
        title: format!("task {id}"),
        description: String::new(),
        category,
        deadline,
        completed,
        created_at: now() - Duration::days(30),
    }
}

/// Every category, both completion states, a spread of deadlines with
/// deliberate ties.
fn mixed_tasks() -> Vec<Task> {
    let offsets_hours = [-48, 5, -1, 30, 5, 200, 0, -26, 72, 30, 1_000, 5];
    offsets_hours
        .iter()
        .enumerate()
        .map(|(index, hours)| {
            task(
                &format!("t{index}"),
                Category::ALL[index % Category::ALL.len()],
                now() + Duration::hours(*hours),
                index % 3 == 0,
            )
        })
        .collect()
}

fn ids(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.id.as_str()).collect()
}

#[test]
fn overdue_boundary_is_strict() {
    assert!(!is_overdue_at(now(), now()));
    assert!(is_overdue_at(now(), now() + Duration::milliseconds(1)));
    assert!(!is_overdue_at(now() + Duration::milliseconds(1), now()));
}

#[test]
fn days_until_rounds_up() {
    assert_eq!(days_until_at(now() + Duration::hours(23), now()), 1);
    assert_eq!(days_until_at(now() + Duration::hours(25), now()), 2);
    assert_eq!(days_until_at(now() - Duration::hours(1), now()), 0);
    assert_eq!(days_until_at(now() - Duration::hours(25), now()), -1);
}

#[test]
fn sort_is_ascending_stable_and_idempotent() {
    let tasks = mixed_tasks();
    let sorted = sort_by_deadline(&tasks);

    assert!(sorted.windows(2).all(|pair| pair[0].deadline <= pair[1].deadline));
    // Ties keep input order: t1, t4, t11 all share +5h; t3 and t9 share +30h.
    let tied: Vec<_> = sorted
        .iter()
        .filter(|task| task.deadline == now() + Duration::hours(5))
        .map(|task| task.id.as_str())
        .collect();
    assert_eq!(tied, vec!["t1", "t4", "t11"]);

    assert_eq!(sort_by_deadline(&sorted), sorted);
    assert_eq!(tasks, mixed_tasks(), "input must not be reordered");
}

#[test]
fn filters_commute() {
    let tasks = mixed_tasks();
    for category in Category::ALL {
        let category_first = filter_completed(&filter_by_category(&tasks, category), false);
        let completed_first = filter_by_category(&filter_completed(&tasks, false), category);
        assert_eq!(category_first, completed_first, "category {category}");
    }
}

#[test]
fn filter_completed_passes_through_when_showing_completed() {
    let tasks = mixed_tasks();
    assert_eq!(filter_completed(&tasks, true), tasks);
    assert!(filter_completed(&tasks, false)
        .iter()
        .all(|task| !task.completed));
}

#[test]
fn stored_tasks_sort_by_deadline_regardless_of_creation_order() {
    let mut repo = SlotTaskRepository::new(MemorySlotStorage::new());
    let t = now();
    let far = task("far", Category::Project, t + Duration::days(10), false);
    let soon = task("soon", Category::Exam, t, false);
    let next = task("next", Category::Reading, t + Duration::days(1), false);

    repo.create(&far).unwrap();
    repo.create(&soon).unwrap();
    repo.create(&next).unwrap();

    assert_eq!(ids(&sort_by_deadline(&repo.list())), vec!["soon", "next", "far"]);
}

#[test]
fn list_query_all_view_hides_completed_and_sorts() {
    let tasks = mixed_tasks();
    let rows = TaskListQuery::default().apply_at(&tasks, now());

    assert!(rows.iter().all(|task| !task.completed));
    assert_eq!(rows, sort_by_deadline(&filter_completed(&tasks, false)));
}

#[test]
fn list_query_upcoming_view_keeps_next_seven_days() {
    let tasks = vec![
        task("overdue-hour", Category::Exam, now() - Duration::hours(1), false),
        task("overdue-days", Category::Exam, now() - Duration::days(2), false),
        task("in-3-days", Category::Exam, now() + Duration::days(3), false),
        task("in-7-days", Category::Exam, now() + Duration::days(7), false),
        task("in-8-days", Category::Exam, now() + Duration::days(8), false),
    ];
    let query = TaskListQuery {
        view: TaskListView::Upcoming,
        ..TaskListQuery::default()
    };

    let rows = query.apply_at(&tasks, now());
    assert_eq!(ids(&rows), vec!["overdue-hour", "in-3-days", "in-7-days"]);
}

#[test]
fn list_query_overdue_view_with_category_and_completed() {
    let tasks = vec![
        task("late-exam", Category::Exam, now() - Duration::days(1), false),
        task("late-exam-done", Category::Exam, now() - Duration::days(3), true),
        task("late-reading", Category::Reading, now() - Duration::days(1), false),
        task("future-exam", Category::Exam, now() + Duration::days(1), false),
    ];
    let mut query = TaskListQuery {
        category: Some(Category::Exam),
        view: TaskListView::Overdue,
        show_completed: false,
        ..TaskListQuery::default()
    };

    assert_eq!(ids(&query.apply_at(&tasks, now())), vec!["late-exam"]);

    query.show_completed = true;
    assert_eq!(
        ids(&query.apply_at(&tasks, now())),
        vec!["late-exam-done", "late-exam"]
    );
}

#[test]
fn deadline_badges_cover_the_three_day_window() {
    let badge = |hours: i64, completed: bool| {
        let item = task("b", Category::Other, now() + Duration::hours(hours), completed);
        deadline_badge_at(&item, now(), 3)
    };

    assert_eq!(badge(0, false), Some(DeadlineBadge::Today));
    assert_eq!(badge(20, false), Some(DeadlineBadge::Tomorrow));
    assert_eq!(badge(40, false), Some(DeadlineBadge::InDays(2)));
    assert_eq!(badge(72, false), Some(DeadlineBadge::InDays(3)));
    assert_eq!(badge(73, false), None);
    assert_eq!(badge(20, true), None);
    assert_eq!(badge(-1, false), None);
}

#[test]
fn deadline_badge_labels_and_urgency() {
    assert_eq!(DeadlineBadge::Today.label(), "Today");
    assert_eq!(DeadlineBadge::Tomorrow.label(), "Tomorrow");
    assert_eq!(DeadlineBadge::InDays(3).label(), "3 days");
    assert!(DeadlineBadge::Tomorrow.is_urgent());
    assert!(!DeadlineBadge::InDays(2).is_urgent());
}
