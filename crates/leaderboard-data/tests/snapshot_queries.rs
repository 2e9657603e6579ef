//! End-to-end checks of the read operations against snapshot files on disk.

use std::collections::HashSet;
use std::path::Path;

use leaderboard_core::time_utils::parse_timestamp;
use leaderboard_core::{LeaderboardError, Period};
use leaderboard_data::queries::*;
use leaderboard_data::SnapshotStore;
use serde_json::json;
use tempfile::TempDir;

fn write(dir: &Path, period: Period, value: serde_json::Value) {
    write_raw(dir, period, &value.to_string());
}

fn write_raw(dir: &Path, period: Period, body: &str) {
    std::fs::write(dir.join(period.file_name()), body).unwrap();
}

// Kept as text: `json!` maps are sorted, which would hide the file's key order.
const YEAR_TOP_BY_ACTIVITY: &str = r#"{
    "PR opened": [{"username": "Alice", "points": 10, "count": 1}],
    "Issue opened": [
        {"username": "Alice", "points": 5, "count": 1},
        {"username": "bob", "points": 4, "count": 1}
    ]
}"#;

fn year_snapshot() -> serde_json::Value {
    json!({
        "updatedAt": "2024-06-01T00:00:00Z",
        "entries": [
            {
                "username": "Alice",
                "name": "Alice A.",
                "avatar_url": "https://avatars/alice.png",
                "role": "core",
                "total_points": 30,
                "activities": [
                    {"type": "PR opened", "occured_at": "2024-01-01T09:00:00Z", "title": "Add widgets",
                     "link": "https://github.com/Acme/widgets/pull/42", "points": 10},
                    {"type": "Issue opened", "occured_at": "2024-02-01T09:00:00Z", "title": "Crash",
                     "link": "https://github.com/Acme/widgets/issues/7", "points": 5},
                    {"type": "PR Issue Linked", "occured_at": "2024-02-02T09:00:00Z",
                     "link": "https://github.com/Acme/gadgets/pull/1", "points": null},
                ],
                "raw_activities": [
                    {"type": "PR opened", "occured_at": "2024-01-01T09:00:00Z", "points": 10},
                    {"type": "Issue opened", "occured_at": "2024-02-01T09:00:00Z", "points": 5},
                ],
            },
            {
                "username": "bob",
                "avatar_url": "https://avatars/bob.png",
                "total_points": 4,
                "activities": [
                    {"type": "Issue opened", "occured_at": "2024-03-01T09:00:00Z",
                     "link": "https://example.com/not-github", "points": 4},
                ],
            },
            {"username": "carol", "total_points": 0},
        ],
    })
}

fn year_snapshot_text() -> String {
    let mut doc = year_snapshot().to_string();
    // Splice the leaders in before the closing brace of the root object.
    doc.pop();
    format!("{},\"topByActivity\":{}}}", doc, YEAR_TOP_BY_ACTIVITY)
}

fn store_with_year() -> (TempDir, SnapshotStore) {
    let dir = TempDir::new().unwrap();
    write_raw(dir.path(), Period::Year, &year_snapshot_text());
    let store = SnapshotStore::new(dir.path());
    (dir, store)
}

#[test]
fn missing_snapshots_yield_empty_results() {
    let dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(dir.path());

    assert!(get_leaderboard(&store).unwrap().is_empty());
    assert!(get_top_contributors_by_activity(&store).unwrap().is_empty());
    assert!(get_all_contributors_with_avatars(&store).unwrap().is_empty());
    assert!(get_all_contributor_usernames(&store).unwrap().is_empty());
    assert!(get_contributor(&store, "alice").unwrap().is_none());
    assert!(get_contributor_profile(&store, "alice").unwrap().is_none());
    assert!(get_repositories(&store).unwrap().is_empty());
    assert!(get_global_recent_activities(&store, None).unwrap().is_empty());
    for period in Period::ALL {
        assert!(get_recent_activities_grouped_by_type(&store, period)
            .unwrap()
            .is_empty());
    }
}

#[test]
fn corrupt_snapshot_propagates() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("year.json"), "not json at all").unwrap();
    let store = SnapshotStore::new(dir.path());

    assert!(matches!(
        get_leaderboard(&store),
        Err(LeaderboardError::SnapshotParse { .. })
    ));
    assert!(get_repositories(&store).is_err());
    assert!(get_contributor_profile(&store, "alice").is_err());
}

#[test]
fn leaderboard_lists_are_in_file_order() {
    let (_dir, store) = store_with_year();

    assert_eq!(
        get_all_contributor_usernames(&store).unwrap(),
        vec!["Alice", "bob", "carol"]
    );
    let avatars = get_all_contributors_with_avatars(&store).unwrap();
    assert_eq!(avatars[1].avatar_url.as_deref(), Some("https://avatars/bob.png"));
    assert_eq!(avatars[2].avatar_url, None);
}

#[test]
fn leaderboard_for_other_period() {
    let (dir, store) = store_with_year();
    write(
        dir.path(),
        Period::Week,
        json!({"entries": [{"username": "weekly-only"}]}),
    );

    let week = get_leaderboard_for(&store, Period::Week).unwrap();
    assert_eq!(week.len(), 1);
    assert_eq!(get_leaderboard(&store).unwrap().len(), 3);
    assert!(get_leaderboard_for(&store, Period::Month).unwrap().is_empty());
}

#[test]
fn profile_lookup_ignores_case() {
    let (_dir, store) = store_with_year();

    let upper = get_contributor_profile(&store, "Alice").unwrap().unwrap();
    let lower = get_contributor_profile(&store, "alice").unwrap().unwrap();
    assert_eq!(upper, lower);
    assert_eq!(upper.total_points, 30);
    assert_eq!(upper.activities.len(), 2);
    assert_eq!(upper.activities[0].activity_type, "Issue opened");

    assert!(get_contributor_profile(&store, "nobody").unwrap().is_none());
}

#[test]
fn grouped_activities_from_period_snapshot() {
    let (dir, store) = store_with_year();
    write(
        dir.path(),
        Period::Week,
        json!({"entries": [
            {"username": "x", "activities": [
                {"type": "PR opened", "occured_at": "2024-01-01"},
                {"type": "PR opened", "occured_at": "2024-01-02"},
                {"type": "PR opened", "occured_at": "2024-01-02"},
            ]},
        ]}),
    );

    let groups = get_recent_activities_grouped_by_type(&store, Period::Week).unwrap();
    assert_eq!(groups.len(), 1);
    let acts = &groups[0].activities;
    assert_eq!(acts[0].occured_at, "2024-01-02");
    assert_eq!(acts[2].occured_at, "2024-01-01");
    let slugs: HashSet<&str> = acts.iter().map(|a| a.slug.as_str()).collect();
    assert_eq!(slugs.len(), 3);
}

#[test]
fn repositories_rollup_over_yearly_snapshot() {
    let (_dir, store) = store_with_year();
    let repos = get_repositories(&store).unwrap();

    let names: Vec<&str> = repos.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Acme/widgets", "Acme/gadgets"]);
    assert_eq!((repos[0].prs, repos[0].issues), (1, 1));
    assert_eq!((repos[1].prs, repos[1].issues), (1, 1));
    assert!(repos.iter().all(|r| r.contributor_count == 1));
}

#[test]
fn issue_feed_is_filtered_and_sorted() {
    let (_dir, store) = store_with_year();
    let feed = get_global_recent_activities(&store, Some("Issue")).unwrap();

    assert_eq!(feed.len(), 3);
    assert!(feed.iter().all(|f| f.activity.activity_type.contains("Issue")));
    let times: Vec<_> = feed
        .iter()
        .map(|f| parse_timestamp(&f.activity.occured_at).unwrap())
        .collect();
    assert!(times.windows(2).all(|w| w[0] > w[1]));
    assert_eq!(feed[0].username, "bob");
}

#[test]
fn top_contributors_keep_file_order() {
    let (_dir, store) = store_with_year();
    let top = get_top_contributors_by_activity(&store).unwrap();
    let keys: Vec<&str> = top.iter().map(|(k, _)| k).collect();
    assert_eq!(keys, vec!["PR opened", "Issue opened"]);
    assert_eq!(top.get("Issue opened").unwrap().len(), 2);
}
