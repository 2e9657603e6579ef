use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the leaderboard crates.
#[derive(Error, Debug)]
pub enum LeaderboardError {
    /// A snapshot file exists but could not be read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A snapshot file was read but is not a valid snapshot document.
    #[error("Failed to parse snapshot {path}: {source}")]
    SnapshotParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A period key is not one of the recognised snapshot periods.
    #[error("Invalid period: {0}")]
    InvalidPeriod(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Convenience alias used throughout the leaderboard crates.
pub type Result<T> = std::result::Result<T, LeaderboardError>;
