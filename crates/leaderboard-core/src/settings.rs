use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::period::Period;

/// Directory snapshots are read from when nothing else is configured.
pub const DEFAULT_DATA_DIR: &str = "public/leaderboard";

/// Site configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "leaderboard.config.json";

// ── Settings (CLI) ─────────────────────────────────────────────────────────────

/// Contributor leaderboard built from JSON snapshots
#[derive(Parser, Debug, Clone)]
#[command(
    name = "leaderboard",
    about = "Contributor leaderboard built from JSON snapshots",
    version
)]
pub struct Settings {
    /// Directory holding the <period>.json snapshots
    #[arg(long, global = true, env = "LEADERBOARD_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Site configuration file (JSON)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Print JSON instead of text tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Logging level
    #[arg(long, global = true, default_value = "WARNING", value_parser = ["DEBUG", "INFO", "WARNING", "ERROR", "CRITICAL"])]
    pub log_level: String,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// One subcommand per read operation.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Recent activities grouped by activity type
    Groups {
        #[arg(long, value_enum, default_value_t = Period::Week)]
        period: Period,
    },

    /// Ranked contributors for a period
    Leaderboard {
        #[arg(long, value_enum, default_value_t = Period::Year)]
        period: Period,

        /// Only show contributors with this role (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,

        /// Case-insensitive search over name and username
        #[arg(long)]
        search: Option<String>,
    },

    /// Top contributors per activity type
    Top {
        /// Only show contributors with this role (repeatable)
        #[arg(long = "role")]
        roles: Vec<String>,
    },

    /// Every contributor with their avatar
    People,

    /// Every contributor username
    Usernames,

    /// A single contributor's profile
    Profile { username: String },

    /// Repositories ranked by pull requests and issues
    Repos,

    /// Recent activity across all contributors
    Activity {
        /// Keep only activity types containing this text
        #[arg(long = "type")]
        type_filter: Option<String>,

        /// Maximum number of rows to print
        #[arg(long)]
        limit: Option<usize>,
    },
}

impl Settings {
    /// Snapshot directory: `--data-dir`, then `LEADERBOARD_DATA_DIR`, then
    /// `./public/leaderboard`.
    pub fn resolve_data_dir(&self) -> PathBuf {
        self.data_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR))
    }

    /// Site config path: `--config`, then `./leaderboard.config.json` when it
    /// exists, then `<config dir>/leaderboard/config.json`.
    pub fn resolve_config_path(&self) -> PathBuf {
        if let Some(p) = &self.config {
            return p.clone();
        }
        let local = PathBuf::from(DEFAULT_CONFIG_FILE);
        if local.exists() {
            return local;
        }
        dirs::config_dir()
            .map(|d| d.join("leaderboard").join("config.json"))
            .unwrap_or(local)
    }

    /// Log level after applying `--debug`.
    pub fn effective_log_level(&self) -> &str {
        if self.debug {
            "DEBUG"
        } else {
            &self.log_level
        }
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────
