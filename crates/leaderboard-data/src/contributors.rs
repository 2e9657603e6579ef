//! Contributor lookups and profile building.

use leaderboard_core::models::{activity_slug, ActivityItem, Contributor};
use leaderboard_core::time_utils::sort_newest_first;
use serde::{Deserialize, Serialize};

/// Username and avatar, as listed on the people page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorAvatar {
    pub username: String,
    pub avatar_url: Option<String>,
}

impl From<&Contributor> for ContributorAvatar {
    fn from(c: &Contributor) -> Self {
        Self {
            username: c.username.clone(),
            avatar_url: c.avatar_url.clone(),
        }
    }
}

/// Everything a profile page shows for one contributor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributorProfile {
    pub contributor: Contributor,
    /// Newest first.
    pub activities: Vec<ActivityItem>,
    #[serde(rename = "totalPoints")]
    pub total_points: i64,
}

/// First contributor whose username matches, ignoring case.
pub fn find_contributor<'a>(entries: &'a [Contributor], username: &str) -> Option<&'a Contributor> {
    entries.iter().find(|c| c.has_username(username))
}

/// Build the profile view of `contributor`.
///
/// Activities come from [`Contributor::profile_activities`]. Each item is
/// keyed `{username}-{type}-{occured_at}-{n}` with `n` its position in the
/// stored list, so two activities with the same type and timestamp still get
/// distinct slugs. The list is then sorted newest first.
pub fn build_profile(contributor: &Contributor) -> ContributorProfile {
    let mut activities: Vec<ActivityItem> = contributor
        .profile_activities()
        .iter()
        .enumerate()
        .map(|(i, activity)| {
            ActivityItem::new(
                contributor,
                activity,
                activity_slug(&contributor.username, activity, i),
            )
        })
        .collect();
    sort_newest_first(&mut activities, |a| a.occured_at.as_str());

    ContributorProfile {
        contributor: contributor.clone(),
        activities,
        total_points: contributor.total_points,
    }
}
