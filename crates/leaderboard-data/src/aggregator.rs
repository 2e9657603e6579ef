//! Activity grouping and per-repository rollups.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use leaderboard_core::models::{activity_slug, ActivityItem, Contributor};
use leaderboard_core::time_utils::sort_newest_first;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

// ── ActivityGroup ─────────────────────────────────────────────────────────────

/// Every activity of one type, merged across contributors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityGroup {
    /// The activity type tag the group is keyed by.
    pub activity_definition: String,
    pub activity_name: String,
    pub activity_description: Option<String>,
    /// Newest first.
    pub activities: Vec<ActivityItem>,
}

impl ActivityGroup {
    fn new(activity_type: &str) -> Self {
        Self {
            activity_definition: activity_type.to_string(),
            activity_name: activity_type.to_string(),
            activity_description: None,
            activities: Vec::new(),
        }
    }

    /// Sum of points across the group.
    pub fn total_points(&self) -> i64 {
        self.activities.iter().map(|a| a.points).sum()
    }
}

/// Group every contributor's activities by type.
///
/// Groups come out in the order their type was first seen while walking
/// `entries` in file order. Each item gets the slug
/// `{username}-{type}-{occured_at}-{n}` where `n` is the group's size when
/// the item was appended, so slugs are unique within a group even for
/// identical timestamps. Each group is then sorted newest first; equal
/// timestamps keep their append order.
pub fn group_activities_by_type(entries: &[Contributor]) -> Vec<ActivityGroup> {
    let mut groups: Vec<ActivityGroup> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for contributor in entries {
        for activity in &contributor.activities {
            let slot = *index
                .entry(activity.activity_type.clone())
                .or_insert_with(|| {
                    groups.push(ActivityGroup::new(&activity.activity_type));
                    groups.len() - 1
                });
            let group = &mut groups[slot];
            let slug = activity_slug(&contributor.username, activity, group.activities.len());
            group
                .activities
                .push(ActivityItem::new(contributor, activity, slug));
        }
    }

    for group in &mut groups {
        sort_newest_first(&mut group.activities, |a| a.occured_at.as_str());
    }

    debug!(
        "Grouped activities of {} contributors into {} types",
        entries.len(),
        groups.len()
    );

    groups
}

// ── Repository rollup ─────────────────────────────────────────────────────────

/// Pull request, issue and contributor counts for one repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    /// `"owner/repo"`.
    pub name: String,
    pub prs: u64,
    pub issues: u64,
    /// Number of distinct contributors with a linked activity.
    #[serde(rename = "contributorCount")]
    pub contributor_count: usize,
}

impl RepoStats {
    pub fn owner(&self) -> &str {
        self.name.split_once('/').map(|(o, _)| o).unwrap_or(&self.name)
    }

    pub fn repo(&self) -> &str {
        self.name.split_once('/').map(|(_, r)| r).unwrap_or("")
    }

    pub fn github_url(&self) -> String {
        format!("https://github.com/{}", self.name)
    }

    /// The ranking score: pull requests plus issues.
    pub fn activity_total(&self) -> u64 {
        self.prs + self.issues
    }
}

fn github_repo_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"github\.com/([^/?#]+)/([^/?#]+)").expect("regex is valid"))
}

/// Extract `(owner, repo)` from a GitHub URL.
///
/// Only the first two path segments after `github.com/` are used; deeper
/// segments, query strings and fragments are ignored.
pub fn parse_repo_link(link: &str) -> Option<(&str, &str)> {
    let caps = github_repo_regex().captures(link)?;
    let owner = caps.get(1)?.as_str();
    let repo = caps.get(2)?.as_str();
    Some((owner, repo))
}

struct RepoAccumulator {
    name: String,
    prs: u64,
    issues: u64,
    contributors: HashSet<String>,
}

/// Roll every linked activity up into per-repository stats.
///
/// Activities without a link, or whose link is not a GitHub repository URL,
/// are skipped. A type containing both `"PR"` and `"Issue"` counts towards
/// both totals. The result is sorted by `prs + issues` descending; ties keep
/// the order in which the repositories were first seen.
pub fn rollup_repositories(entries: &[Contributor]) -> Vec<RepoStats> {
    let mut repos: Vec<RepoAccumulator> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut skipped = 0usize;

    for contributor in entries {
        for activity in &contributor.activities {
            let Some(link) = activity.link.as_deref() else {
                continue;
            };
            let Some((owner, repo)) = parse_repo_link(link) else {
                skipped += 1;
                continue;
            };

            let name = format!("{}/{}", owner, repo);
            let slot = *index.entry(name.clone()).or_insert_with(|| {
                repos.push(RepoAccumulator {
                    name,
                    prs: 0,
                    issues: 0,
                    contributors: HashSet::new(),
                });
                repos.len() - 1
            });

            let stats = &mut repos[slot];
            stats.contributors.insert(contributor.username.clone());
            if activity.is_pull_request() {
                stats.prs += 1;
            }
            if activity.is_issue() {
                stats.issues += 1;
            }
        }
    }

    if skipped > 0 {
        debug!("Skipped {} activities with non-repository links", skipped);
    }

    let mut out: Vec<RepoStats> = repos
        .into_iter()
        .map(|r| RepoStats {
            name: r.name,
            prs: r.prs,
            issues: r.issues,
            contributor_count: r.contributors.len(),
        })
        .collect();
    out.sort_by(|a, b| b.activity_total().cmp(&a.activity_total()));
    out
}

// ── Tests ─────────────────────────────────────────────────────────────────────
