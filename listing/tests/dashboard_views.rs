//! Listing pages driven end to end from backend-shaped JSON.

use erp_listing::{
    decode_records, distinct_values, FilterState, Holiday, JsonRecord, ListQueryEngine, ListView,
    Record, StatSpec, StatValue, Task, ALL,
};
use serde_json::json;

fn task_payload() -> serde_json::Value {
    json!({
        "data": [
            {
                "id": 1, "title": "Draft budget", "status": "completed", "priority": "high",
                "assignee": "Asha", "project": "Finance"
            },
            {
                "id": 2, "title": "Vendor audit", "status": "in_progress", "priority": "medium",
                "assignee": "Ravi", "project": "Supply"
            },
            {
                "id": 3, "title": "Budget review", "status": "todo", "priority": "high",
                "project": "Finance"
            },
            {
                "id": 4, "title": "Onboarding deck", "status": "completed", "priority": "low",
                "assignee": "Meena"
            },
            {"id": 5, "status": "todo"}
        ]
    })
}

fn task_specs() -> Vec<StatSpec<Task>> {
    vec![
        StatSpec::total("Total Tasks"),
        StatSpec::share("Completed", |t: &Task| t.status == "completed"),
        StatSpec::percent("High Priority", |t: &Task| t.priority.as_deref() == Some("high")),
    ]
}

#[test]
fn test_task_board_filters_and_kpis() {
    let decoded = decode_records::<Task>(task_payload()).unwrap();
    assert_eq!(decoded.skipped, 1);

    let mut view = ListView::new(task_specs()).with_records(decoded.records);
    let headline = view.stats().to_vec();
    assert_eq!(headline[0].value, StatValue::Count(4));
    assert_eq!(headline[1].value, StatValue::Count(2));
    assert_eq!(headline[1].change_ratio, Some(0.5));
    assert_eq!(headline[2].value.to_string(), "50%");

    view.update_filter(|f| {
        f.set_search("budget");
        f.set_filter("priority", "high");
    });
    let ids: Vec<_> = view.visible().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec!["1", "3"]);

    view.update_filter(|f| f.set_filter("status", "todo"));
    let ids: Vec<_> = view.visible().iter().map(|t| t.id.clone()).collect();
    assert_eq!(ids, vec!["3"]);

    // Headline KPIs are unaffected by what the user is looking at.
    assert_eq!(view.stats(), headline.as_slice());

    view.update_filter(|f| {
        f.set_filter("status", ALL);
        f.set_filter("priority", ALL);
        f.set_search("");
    });
    assert_eq!(view.visible_count(), 4);
}

#[test]
fn test_filter_result_is_ordered_subsequence() {
    let tasks = decode_records::<Task>(task_payload()).unwrap().records;
    let engine = ListQueryEngine::for_record::<Task>();

    let filters = [
        FilterState::new(),
        FilterState::new().with_search("a"),
        FilterState::new().with_filter("project", "Finance"),
        FilterState::new().with_search("ONBOARD").with_filter("status", "completed"),
        FilterState::new().with_filter("assignee", "Nobody"),
    ];

    for filter in &filters {
        let result = engine.filter(&tasks, filter);
        let mut cursor = tasks.iter();
        for picked in &result {
            assert!(
                cursor.any(|t| t.key() == picked.key()),
                "result out of order for {:?}",
                filter
            );
            assert!(engine.matches(*picked, filter));
        }
        let excluded = tasks.iter().filter(|t| !engine.matches(*t, filter)).count();
        assert_eq!(result.len() + excluded, tasks.len());
    }
}

#[test]
fn test_holiday_calendar_by_year() {
    let holidays = decode_records::<Holiday>(json!([
        {"id": "h1", "name": "Republic Day", "date": "2025-01-26", "holiday_type": "public"},
        {
            "id": "h2", "name": "Holi", "date": "2025-03-14", "holiday_type": "optional",
            "location": "Pune"
        },
        {"id": "h3", "name": "Republic Day", "date": "2026-01-26", "holiday_type": "public"}
    ]))
    .unwrap()
    .records;

    assert_eq!(distinct_values(&holidays, "year"), vec!["2025", "2026"]);

    let engine = ListQueryEngine::for_record::<Holiday>();
    let in_2025 = engine.filter(&holidays, &FilterState::new().with_filter("year", "2025"));
    assert_eq!(in_2025.len(), 2);

    let by_location = engine.filter(&holidays, &FilterState::new().with_search("pune"));
    assert_eq!(by_location.len(), 1);
    assert_eq!(by_location[0].name, "Holi");
}

#[test]
fn test_untyped_tenant_rows() {
    let rows: Vec<JsonRecord> = [
        json!({
            "id": "t-1",
            "name": "Acme",
            "status": "active",
            "owner": {"email": "ops@acme.test"}
        }),
        json!({"id": "t-2", "name": "Globex", "status": "suspended"}),
    ]
    .into_iter()
    .map(|v| JsonRecord::new(v, "id").unwrap())
    .collect();

    let engine = ListQueryEngine::new(["name", "owner.email"]);
    let hits = engine.filter(&rows, &FilterState::new().with_search("ops@"));
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].key(), "t-1");

    let suspended = engine.filter(&rows, &FilterState::new().with_filter("status", "suspended"));
    assert_eq!(suspended[0].key(), "t-2");
}
