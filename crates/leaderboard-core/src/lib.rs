//! Shared types for the contributor leaderboard.
//!
//! Snapshot data model, period keys, the error type, CLI settings and site
//! configuration, timestamp handling and text formatting.

pub mod config;
pub mod error;
pub mod formatting;
pub mod models;
pub mod period;
pub mod settings;
pub mod time_utils;

pub use error::{LeaderboardError, Result};
pub use period::Period;
