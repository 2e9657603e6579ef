//! Read operations consumed by the presentation layer.
//!
//! Each call loads its snapshot fresh through the [`SnapshotStore`] and runs
//! one transform over it. A missing snapshot produces an empty result; a
//! corrupt one returns the loader's error. Unless a period is passed
//! explicitly, the yearly snapshot is the source.

use leaderboard_core::error::Result;
use leaderboard_core::models::{ActivityLeaders, Contributor};
use leaderboard_core::Period;

use crate::aggregator::{group_activities_by_type, rollup_repositories, ActivityGroup, RepoStats};
use crate::contributors::{build_profile, find_contributor, ContributorAvatar, ContributorProfile};
use crate::feed::{collect_recent_activities, FeedActivity};
use crate::reader::SnapshotStore;

/// Activities of `period` grouped by type, each group newest first.
pub fn get_recent_activities_grouped_by_type(
    store: &SnapshotStore,
    period: Period,
) -> Result<Vec<ActivityGroup>> {
    let snapshot = store.load(period)?;
    Ok(group_activities_by_type(&snapshot.entries))
}

/// Entries of the yearly snapshot, in file order.
pub fn get_leaderboard(store: &SnapshotStore) -> Result<Vec<Contributor>> {
    get_leaderboard_for(store, Period::Year)
}

/// Entries of any period's snapshot, in file order.
pub fn get_leaderboard_for(store: &SnapshotStore, period: Period) -> Result<Vec<Contributor>> {
    Ok(store.load(period)?.entries)
}

/// `topByActivity` of the yearly snapshot.
pub fn get_top_contributors_by_activity(store: &SnapshotStore) -> Result<ActivityLeaders> {
    Ok(store.load(Period::Year)?.top_by_activity)
}

pub fn get_all_contributors_with_avatars(store: &SnapshotStore) -> Result<Vec<ContributorAvatar>> {
    let entries = get_leaderboard(store)?;
    Ok(entries.iter().map(ContributorAvatar::from).collect())
}

pub fn get_all_contributor_usernames(store: &SnapshotStore) -> Result<Vec<String>> {
    let entries = get_leaderboard(store)?;
    Ok(entries.into_iter().map(|e| e.username).collect())
}

/// Case-insensitive username lookup; `None` when nobody matches.
pub fn get_contributor(store: &SnapshotStore, username: &str) -> Result<Option<Contributor>> {
    let entries = get_leaderboard(store)?;
    Ok(find_contributor(&entries, username).cloned())
}

/// Profile of `username`; `None` when nobody matches.
pub fn get_contributor_profile(
    store: &SnapshotStore,
    username: &str,
) -> Result<Option<ContributorProfile>> {
    Ok(get_contributor(store, username)?.as_ref().map(build_profile))
}

/// Repository rollup over the yearly snapshot.
pub fn get_repositories(store: &SnapshotStore) -> Result<Vec<RepoStats>> {
    let entries = get_leaderboard(store)?;
    Ok(rollup_repositories(&entries))
}

/// Every activity of the yearly snapshot, newest first, optionally narrowed
/// to types containing `type_filter`.
pub fn get_global_recent_activities(
    store: &SnapshotStore,
    type_filter: Option<&str>,
) -> Result<Vec<FeedActivity>> {
    let entries = get_leaderboard(store)?;
    Ok(collect_recent_activities(&entries, type_filter))
}
