//! Role and search filtering for leaderboard listings.

use std::collections::{BTreeSet, HashMap, HashSet};

use leaderboard_core::models::{ActivityLeaders, BreakdownStat, Contributor};

/// Sorted distinct roles present in `entries`.
pub fn available_roles(entries: &[Contributor]) -> Vec<String> {
    entries
        .iter()
        .filter_map(|e| e.role.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Roles selected when the user has not picked any: every present role
/// except the hidden ones.
pub fn default_roles(entries: &[Contributor], hidden_roles: &[String]) -> HashSet<String> {
    entries
        .iter()
        .filter_map(|e| e.role.as_ref())
        .filter(|r| !hidden_roles.contains(*r))
        .cloned()
        .collect()
}

/// Role selection plus free-text search.
#[derive(Debug, Clone, Default)]
pub struct LeaderboardFilter {
    /// Empty means every role, including contributors without one.
    pub roles: HashSet<String>,
    pub query: Option<String>,
}

impl LeaderboardFilter {
    /// Explicit `roles` when given, otherwise [`default_roles`].
    pub fn with_defaults(
        entries: &[Contributor],
        roles: &[String],
        hidden_roles: &[String],
        query: Option<String>,
    ) -> Self {
        let roles = if roles.is_empty() {
            default_roles(entries, hidden_roles)
        } else {
            roles.iter().cloned().collect()
        };
        Self { roles, query }
    }

    /// Whether the filter narrows anything down.
    pub fn is_active(&self) -> bool {
        !self.roles.is_empty() || self.normalized_query().is_some()
    }

    /// Lowercased query, or `None` when it is blank.
    ///
    /// Whitespace only decides blankness; a non-blank query is matched as
    /// typed, surrounding spaces included.
    fn normalized_query(&self) -> Option<String> {
        self.query
            .as_deref()
            .filter(|q| !q.trim().is_empty())
            .map(str::to_lowercase)
    }

    fn role_selected(&self, role: Option<&str>) -> bool {
        self.roles.is_empty() || role.map_or(false, |r| self.roles.contains(r))
    }

    /// Keep entries in the selected roles that match the query.
    ///
    /// With roles selected, entries without a role are dropped. The query is
    /// matched case-insensitively against the display name and the username.
    pub fn apply<'a>(&self, entries: &'a [Contributor]) -> Vec<&'a Contributor> {
        let query = self.normalized_query();
        entries
            .iter()
            .filter(|e| self.role_selected(e.role.as_deref()))
            .filter(|e| match &query {
                Some(q) => {
                    e.display_name().to_lowercase().contains(q.as_str())
                        || e.username.to_lowercase().contains(q.as_str())
                }
                None => true,
            })
            .collect()
    }
}

/// Keep only top contributors whose leaderboard entry is in a selected role.
///
/// Activity types left without contributors are dropped. With no roles
/// selected the input is returned unchanged.
pub fn filter_top_by_activity(
    top: &ActivityLeaders,
    entries: &[Contributor],
    roles: &HashSet<String>,
) -> ActivityLeaders {
    if roles.is_empty() {
        return top.clone();
    }

    let role_of: HashMap<&str, Option<&str>> = entries
        .iter()
        .map(|e| (e.username.as_str(), e.role.as_deref()))
        .collect();

    let kept = top
        .iter()
        .filter_map(|(activity, leaders)| {
            let leaders: Vec<_> = leaders
                .iter()
                .filter(|l| {
                    role_of
                        .get(l.username.as_str())
                        .copied()
                        .flatten()
                        .map_or(false, |r| roles.contains(r))
                })
                .cloned()
                .collect();
            (!leaders.is_empty()).then(|| (activity.to_string(), leaders))
        })
        .collect();

    ActivityLeaders(kept)
}

/// A contributor's activity breakdown, highest points first.
pub fn sorted_breakdown(entry: &Contributor) -> Vec<(&str, BreakdownStat)> {
    let mut items: Vec<(&str, BreakdownStat)> = entry
        .activity_breakdown
        .iter()
        .map(|(k, v)| (k.as_str(), *v))
        .collect();
    items.sort_by(|a, b| b.1.points.cmp(&a.1.points));
    items
}
