//! Plain-text rendering of each view.

use leaderboard_core::config::SiteConfig;
use leaderboard_core::formatting::{format_number, format_points, render_table, truncate_display};
use leaderboard_core::models::{ActivityLeaders, Contributor};
use leaderboard_core::time_utils::format_date;
use leaderboard_core::Period;
use leaderboard_data::aggregator::{ActivityGroup, RepoStats};
use leaderboard_data::contributors::{ContributorAvatar, ContributorProfile};
use leaderboard_data::feed::FeedActivity;
use leaderboard_data::filters::sorted_breakdown;

const TITLE_WIDTH: usize = 48;

pub fn render_groups(groups: &[ActivityGroup], period: Period) -> String {
    if groups.is_empty() {
        return format!("No activity in the {} snapshot.\n", period);
    }
    let mut out = String::new();
    for group in groups {
        out.push_str(&format!(
            "{} ({} activities, {})\n",
            group.activity_name,
            group.activities.len(),
            format_points(group.total_points())
        ));
        let rows: Vec<Vec<String>> = group
            .activities
            .iter()
            .map(|a| {
                vec![
                    format_date(&a.occured_at),
                    a.contributor.clone(),
                    truncate_display(a.title.as_deref().unwrap_or("-"), TITLE_WIDTH),
                    format_points(a.points),
                ]
            })
            .collect();
        out.push_str(&render_table(&["Date", "Contributor", "Title", "Points"], &rows));
        out.push('\n');
    }
    out
}

pub fn render_leaderboard(
    shown: &[&Contributor],
    total: usize,
    filtered: bool,
    period: Period,
    config: &SiteConfig,
) -> String {
    let mut out = format!(
        "{}\n{} of {} contributors{}\n\n",
        config.page_title(&format!("{} Leaderboard", period.label())),
        shown.len(),
        total,
        if filtered { " (filtered)" } else { "" }
    );
    if shown.is_empty() {
        out.push_str(if total == 0 {
            "No contributors with points in this period.\n"
        } else {
            "No contributors match the selected filters.\n"
        });
        return out;
    }

    let rows: Vec<Vec<String>> = shown
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let breakdown: Vec<String> = sorted_breakdown(e)
                .into_iter()
                .take(3)
                .map(|(name, stat)| format!("{} +{}", name, stat.points))
                .collect();
            vec![
                (i + 1).to_string(),
                format!("{} (@{})", e.display_name(), e.username),
                e.role.clone().unwrap_or_default(),
                format_number(e.total_points),
                breakdown.join(", "),
            ]
        })
        .collect();
    out.push_str(&render_table(
        &["#", "Contributor", "Role", "Points", "Top activities"],
        &rows,
    ));
    out
}

pub fn render_top(top: &ActivityLeaders) -> String {
    if top.is_empty() {
        return "No top contributors recorded.\n".to_string();
    }
    let mut out = String::new();
    for (activity, leaders) in top.iter() {
        out.push_str(activity);
        out.push('\n');
        let rows: Vec<Vec<String>> = leaders
            .iter()
            .enumerate()
            .map(|(i, l)| {
                vec![
                    (i + 1).to_string(),
                    l.name.clone().unwrap_or_else(|| l.username.clone()),
                    l.count.to_string(),
                    format_number(l.points),
                ]
            })
            .collect();
        out.push_str(&render_table(&["#", "Contributor", "Count", "Points"], &rows));
        out.push('\n');
    }
    out
}

pub fn render_people(people: &[ContributorAvatar], config: &SiteConfig) -> String {
    if people.is_empty() {
        return "No contributors found yet. Try again in a bit.\n".to_string();
    }
    let mut out = format!(
        "Meet the {} contributors who make {} possible\n\n",
        people.len(),
        config.org.name
    );
    let rows: Vec<Vec<String>> = people
        .iter()
        .map(|p| vec![p.username.clone(), p.avatar_url.clone().unwrap_or_default()])
        .collect();
    out.push_str(&render_table(&["Username", "Avatar"], &rows));
    out
}

pub fn render_usernames(usernames: &[String]) -> String {
    usernames.iter().map(|u| format!("{}\n", u)).collect()
}

pub fn render_profile(profile: &ContributorProfile) -> String {
    let c = &profile.contributor;
    let mut out = format!("{} (@{})\n", c.display_name(), c.username);
    if let Some(role) = &c.role {
        out.push_str(&format!("Role: {}\n", role));
    }
    out.push_str(&format!(
        "Points: {}  Activities: {}\n\n",
        format_number(profile.total_points),
        profile.activities.len()
    ));

    if profile.activities.is_empty() {
        out.push_str("No recent activity found.\n");
        return out;
    }
    let rows: Vec<Vec<String>> = profile
        .activities
        .iter()
        .map(|a| {
            vec![
                format_date(&a.occured_at),
                a.activity_type.clone(),
                truncate_display(a.title.as_deref().unwrap_or("Untitled Activity"), TITLE_WIDTH),
                format_points(a.points),
                a.link.clone().unwrap_or_default(),
            ]
        })
        .collect();
    out.push_str(&render_table(&["Date", "Type", "Title", "Points", "Link"], &rows));
    out
}

pub fn render_repos(repos: &[RepoStats]) -> String {
    if repos.is_empty() {
        return "No project activity found yet.\n".to_string();
    }
    let rows: Vec<Vec<String>> = repos
        .iter()
        .map(|r| {
            vec![
                r.repo().to_string(),
                r.owner().to_string(),
                r.prs.to_string(),
                r.issues.to_string(),
                r.contributor_count.to_string(),
            ]
        })
        .collect();
    render_table(&["Repository", "Owner", "PRs", "Issues", "Devs"], &rows)
}

pub fn render_feed(feed: &[FeedActivity]) -> String {
    if feed.is_empty() {
        return "No activity found recently.\n".to_string();
    }
    let rows: Vec<Vec<String>> = feed
        .iter()
        .map(|f| {
            vec![
                format_date(&f.activity.occured_at),
                f.username.clone(),
                f.activity.activity_type.clone(),
                truncate_display(f.activity.title.as_deref().unwrap_or("-"), TITLE_WIDTH),
                format_points(f.activity.points),
            ]
        })
        .collect();
    render_table(&["Date", "Contributor", "Type", "Title", "Points"], &rows)
}
