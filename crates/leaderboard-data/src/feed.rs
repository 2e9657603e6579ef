//! Global recent-activity feed.

use leaderboard_core::models::{Activity, Contributor};
use leaderboard_core::time_utils::sort_newest_first;
use serde::{Deserialize, Serialize};

/// An activity annotated with the contributor it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedActivity {
    #[serde(flatten)]
    pub activity: Activity,
    pub username: String,
    pub avatar_url: Option<String>,
}

/// Every contributor's activities in one list, newest first.
///
/// With `type_filter`, only activities whose type contains it are kept.
/// Equal timestamps keep file order.
pub fn collect_recent_activities(
    entries: &[Contributor],
    type_filter: Option<&str>,
) -> Vec<FeedActivity> {
    let mut feed: Vec<FeedActivity> = entries
        .iter()
        .flat_map(|c| c.activities.iter().map(move |a| (c, a)))
        .filter(|(_, a)| type_filter.map_or(true, |f| a.matches_type(f)))
        .map(|(c, a)| FeedActivity {
            activity: a.clone(),
            username: c.username.clone(),
            avatar_url: c.avatar_url.clone(),
        })
        .collect();
    sort_newest_first(&mut feed, |f| f.activity.occured_at.as_str());
    feed
}
