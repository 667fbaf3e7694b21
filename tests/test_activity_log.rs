mod helpers;

use chrono::Duration;
use helpers::*;
use projectdeck::domain::ports::KeyValueStore;
use projectdeck::{
    Activity, ActivityAction, ActivityFilter, ActivityService, NewActivity, TargetType,
    ACTIVITY_STORAGE_KEY, DEFAULT_RECENT_LIMIT,
};
use std::sync::Arc;

fn task_update(n: usize) -> NewActivity {
    NewActivity::new(
        ActivityAction::TaskUpdated,
        TargetType::Task,
        format!("update #{}", n),
    )
}

#[test]
fn test_project_created_scenario() {
    let harness = TestHarness::new();
    harness.session.sign_in(john());
    let mut activities = harness.activities();

    activities.record(
        NewActivity::new(
            ActivityAction::ProjectCreated,
            TargetType::Project,
            "created project",
        )
        .target_id("proj-1"),
    );

    let found = activities.query(&ActivityFilter::new().action(ActivityAction::ProjectCreated));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].target_type, TargetType::Project);
    assert_eq!(found[0].target_id.as_deref(), Some("proj-1"));
    assert_eq!(found[0].user_name, "John Smith");
}

#[test]
fn test_capacity_keeps_newest_thousand() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();

    for n in 0..1005 {
        activities.record(task_update(n));
    }

    assert_eq!(activities.len(), 1000);
    let all = activities.query(&ActivityFilter::new());
    assert_eq!(all.first().unwrap().description, "update #1004");
    assert_eq!(all.last().unwrap().description, "update #5");
    assert!(all.iter().all(|a| a.description != "update #4"));
}

#[test]
fn test_capacity_survives_reload() {
    let harness = TestHarness::new();
    let mut activities = harness.activities_with_capacity(5);
    for n in 0..8 {
        activities.record(task_update(n));
    }

    let reloaded = harness.activities_with_capacity(5);
    assert_eq!(reloaded.len(), 5);
    assert_eq!(reloaded.recent(1)[0].description, "update #7");
}

#[test]
fn test_search_matches_description_only_where_present() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    activities.record(NewActivity::new(
        ActivityAction::ProjectCreated,
        TargetType::Project,
        "created Alpha project",
    ));
    activities.record(NewActivity::new(
        ActivityAction::ProjectCreated,
        TargetType::Project,
        "created Beta project",
    ));

    let found = activities.query(&ActivityFilter::new().search("Alpha"));
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "created Alpha project");
}

#[test]
fn test_search_is_case_insensitive_across_actor_and_target() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();

    harness.session.sign_in(jane());
    activities.record(
        NewActivity::new(ActivityAction::TaskAssigned, TargetType::Task, "assigned a task")
            .target_name("Quarterly Report"),
    );
    harness.session.sign_in(john());
    activities.record(NewActivity::new(
        ActivityAction::TaskCreated,
        TargetType::Task,
        "created a task",
    ));

    assert_eq!(activities.query(&ActivityFilter::new().search("quarterly")).len(), 1);
    assert_eq!(activities.query(&ActivityFilter::new().search("JANE")).len(), 1);
    assert_eq!(activities.query(&ActivityFilter::new().search("a task")).len(), 2);
}

#[test]
fn test_filters_are_a_conjunction() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();

    harness.session.sign_in(john());
    activities.record(NewActivity::new(
        ActivityAction::TaskCreated,
        TargetType::Task,
        "john task",
    ));
    activities.record(NewActivity::new(
        ActivityAction::ProjectUpdated,
        TargetType::Project,
        "john project",
    ));
    harness.session.sign_in(jane());
    activities.record(NewActivity::new(
        ActivityAction::TaskCreated,
        TargetType::Task,
        "jane task",
    ));

    let filter = ActivityFilter::new()
        .action(ActivityAction::TaskCreated)
        .user_id("user-john");
    let found = activities.query(&filter);
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].description, "john task");

    let tasks = activities.query(&ActivityFilter::new().target_type(TargetType::Task));
    let descriptions: Vec<&str> = tasks.iter().map(|a| a.description.as_str()).collect();
    assert_eq!(descriptions, vec!["jane task", "john task"]);
}

#[test]
fn test_query_without_filter_returns_everything_newest_first() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    for n in 0..3 {
        activities.record(task_update(n));
        harness.clock.advance(Duration::minutes(1));
    }

    let all = activities.query(&ActivityFilter::default());
    assert_eq!(all.len(), 3);
    assert!(all.windows(2).all(|w| w[0].created_at >= w[1].created_at));
}

#[test]
fn test_recent_default_limit() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    for n in 0..25 {
        activities.record(task_update(n));
    }

    let recent = activities.recent(DEFAULT_RECENT_LIMIT);
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].description, "update #24");
    assert_eq!(activities.recent(100).len(), 25);
    assert!(activities.recent(0).is_empty());
}

#[test]
fn test_purge_older_than_thirty_days() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    let now = test_epoch();

    harness.clock.set(now - Duration::days(40));
    activities.record(NewActivity::new(
        ActivityAction::TaskCreated,
        TargetType::Task,
        "forty days ago",
    ));
    harness.clock.set(now - Duration::days(30));
    activities.record(NewActivity::new(
        ActivityAction::TaskCreated,
        TargetType::Task,
        "exactly thirty days ago",
    ));
    harness.clock.set(now - Duration::days(30) - Duration::seconds(1));
    activities.record(NewActivity::new(
        ActivityAction::TaskCreated,
        TargetType::Task,
        "just over thirty days ago",
    ));
    harness.clock.set(now);
    activities.record(NewActivity::new(
        ActivityAction::TaskCreated,
        TargetType::Task,
        "today",
    ));

    assert_eq!(activities.purge_older_than(30), 2);

    let remaining: Vec<String> = activities
        .query(&ActivityFilter::new())
        .into_iter()
        .map(|a| a.description)
        .collect();
    // The boundary is exclusive: an entry exactly 30 days old is kept
    assert_eq!(remaining, vec!["today", "exactly thirty days ago"]);
}

#[test]
fn test_purge_zero_days_keeps_only_now() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    activities.record(task_update(0));
    harness.clock.advance(Duration::seconds(1));
    activities.record(task_update(1));

    assert_eq!(activities.purge_older_than(0), 1);
    assert_eq!(activities.recent(10)[0].description, "update #1");
}

#[test]
fn test_clear_all_persists() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    activities.record(task_update(0));
    activities.record(task_update(1));

    assert_eq!(activities.clear_all(), 2);
    assert!(harness.activities().is_empty());
}

#[test]
fn test_round_trip_through_store() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    harness.session.sign_in(john());
    activities.record(
        NewActivity::new(ActivityAction::MemberInvited, TargetType::Member, "invited Jane")
            .target_id("user-jane")
            .target_name("Jane Doe")
            .metadata(serde_json::json!({ "role": "member" })),
    );
    harness.session.sign_out();
    activities.record(task_update(1));

    let before: Vec<Activity> = activities.query(&ActivityFilter::new());
    let after: Vec<Activity> = harness.activities().query(&ActivityFilter::new());
    assert_eq!(before, after);
}

#[test]
fn test_malformed_store_contents_load_empty() {
    let harness = TestHarness::new();
    harness
        .store
        .write(ACTIVITY_STORAGE_KEY, b"[{\"id\": 42}]")
        .unwrap();

    let mut activities = harness.activities();
    assert!(activities.is_empty());

    // And the log is usable afterwards
    activities.record(task_update(0));
    assert_eq!(activities.len(), 1);
}

#[test]
fn test_write_failures_do_not_fail_recording() {
    let harness = TestHarness::new();
    let store = Arc::new(ReadOnlyStore::seeded(ACTIVITY_STORAGE_KEY, b"[]"));
    let mut activities =
        ActivityService::new(store, harness.session.clone(), harness.clock.clone(), 1000);

    activities.record(task_update(0));
    assert_eq!(activities.len(), 1);
    assert_eq!(activities.purge_older_than(1), 0);
    assert_eq!(activities.clear_all(), 1);
}

#[test]
fn test_ids_are_unique() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    for n in 0..200 {
        activities.record(task_update(n));
    }

    let mut ids: Vec<String> = activities
        .query(&ActivityFilter::new())
        .into_iter()
        .map(|a| a.id)
        .collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 200);
}

#[test]
fn test_get_by_id() {
    let harness = TestHarness::new();
    let mut activities = harness.activities();
    activities.record(task_update(0));

    let id = activities.recent(1)[0].id.clone();
    assert_eq!(activities.get(&id).unwrap().description, "update #0");
    assert!(activities.get("nope").is_none());
}
