//! Snapshot loading and read-time aggregation for the contributor
//! leaderboard.
//!
//! Loads `<period>.json` snapshots and derives grouped activity feeds,
//! repository rollups, the global recent-activity feed and contributor
//! profiles from them.

pub mod aggregator;
pub mod contributors;
pub mod feed;
pub mod filters;
pub mod queries;
pub mod reader;

pub use leaderboard_core as core;
pub use reader::SnapshotStore;
