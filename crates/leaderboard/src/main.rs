mod bootstrap;
mod output;

use anyhow::Result;
use clap::Parser;
use leaderboard_core::config::SiteConfig;
use leaderboard_core::settings::{Command, Settings};
use leaderboard_data::filters::{filter_top_by_activity, LeaderboardFilter};
use leaderboard_data::queries;
use leaderboard_data::SnapshotStore;
use serde::Serialize;

fn main() -> Result<()> {
    let settings = Settings::parse();

    bootstrap::setup_logging(settings.effective_log_level())?;
    tracing::info!("Leaderboard v{} starting", env!("CARGO_PKG_VERSION"));

    let (store, config) = bootstrap::open_sources(&settings)?;
    let text = run(&settings.command, &store, &config, settings.json)?;
    print!("{}", text);

    Ok(())
}

/// Execute `command` and return what should be written to stdout.
fn run(command: &Command, store: &SnapshotStore, config: &SiteConfig, json: bool) -> Result<String> {
    match command {
        Command::Groups { period } => {
            let groups = queries::get_recent_activities_grouped_by_type(store, *period)?;
            tracing::info!("{} activity groups in the {} snapshot", groups.len(), period);
            render(json, &groups, || output::render_groups(&groups, *period))
        }

        Command::Leaderboard {
            period,
            roles,
            search,
        } => {
            let entries = queries::get_leaderboard_for(store, *period)?;
            let filter = LeaderboardFilter::with_defaults(
                &entries,
                roles,
                &config.leaderboard.hidden_roles,
                search.clone(),
            );
            let shown = filter.apply(&entries);
            tracing::debug!(
                "Leaderboard filter kept {} of {} entries",
                shown.len(),
                entries.len()
            );
            render(json, &shown, || {
                output::render_leaderboard(&shown, entries.len(), filter.is_active(), *period, config)
            })
        }

        Command::Top { roles } => {
            let top = queries::get_top_contributors_by_activity(store)?;
            let entries = queries::get_leaderboard(store)?;
            let filter = LeaderboardFilter::with_defaults(
                &entries,
                roles,
                &config.leaderboard.hidden_roles,
                None,
            );
            let top = filter_top_by_activity(&top, &entries, &filter.roles);
            render(json, &top, || output::render_top(&top))
        }

        Command::People => {
            let people = queries::get_all_contributors_with_avatars(store)?;
            render(json, &people, || output::render_people(&people, config))
        }

        Command::Usernames => {
            let usernames = queries::get_all_contributor_usernames(store)?;
            render(json, &usernames, || output::render_usernames(&usernames))
        }

        Command::Profile { username } => {
            let Some(profile) = queries::get_contributor_profile(store, username)? else {
                anyhow::bail!("Contributor {} not found", username);
            };
            render(json, &profile, || output::render_profile(&profile))
        }

        Command::Repos => {
            let repos = queries::get_repositories(store)?;
            render(json, &repos, || output::render_repos(&repos))
        }

        Command::Activity { type_filter, limit } => {
            let mut feed = queries::get_global_recent_activities(store, type_filter.as_deref())?;
            if let Some(limit) = limit {
                feed.truncate(*limit);
            }
            render(json, &feed, || output::render_feed(&feed))
        }
    }
}

fn render<T, F>(json: bool, value: &T, text: F) -> Result<String>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        let mut s = serde_json::to_string_pretty(value)?;
        s.push('\n');
        Ok(s)
    } else {
        Ok(text())
    }
}
