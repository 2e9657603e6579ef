//! Snapshot file discovery and loading.
//!
//! Each period has one `<period>.json` file under a base directory. A
//! missing file is "no data yet" and loads as an empty [`Snapshot`]; a file
//! that exists but does not parse is an error the caller must see.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use leaderboard_core::error::{LeaderboardError, Result};
use leaderboard_core::models::Snapshot;
use leaderboard_core::Period;
use tracing::debug;

// ── SnapshotStore ─────────────────────────────────────────────────────────────

/// Locates and parses the snapshot for a period.
///
/// Nothing is cached: every [`SnapshotStore::load`] re-reads the file, so a
/// regenerated snapshot is picked up on the next call.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    base_dir: PathBuf,
}

impl SnapshotStore {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// `<base_dir>/<period>.json`.
    pub fn snapshot_path(&self, period: Period) -> PathBuf {
        self.base_dir.join(period.file_name())
    }

    /// Load the snapshot for `period`.
    pub fn load(&self, period: Period) -> Result<Snapshot> {
        load_snapshot(&self.snapshot_path(period))
    }

    /// Periods whose snapshot file is present, in [`Period::ALL`] order.
    pub fn available_periods(&self) -> Vec<Period> {
        Period::ALL
            .into_iter()
            .filter(|p| self.snapshot_path(*p).is_file())
            .collect()
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Read and parse a snapshot file.
///
/// Returns an empty snapshot when the file does not exist. Any other read
/// failure, or a document that is not a valid snapshot, is an error.
pub fn load_snapshot(path: &Path) -> Result<Snapshot> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Snapshot {} not found, using empty data", path.display());
            return Ok(Snapshot::default());
        }
        Err(source) => {
            return Err(LeaderboardError::FileRead {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let snapshot: Snapshot =
        serde_json::from_str(&content).map_err(|source| LeaderboardError::SnapshotParse {
            path: path.to_path_buf(),
            source,
        })?;

    debug!(
        "Loaded {} entries and {} activity leader lists from {}",
        snapshot.entries.len(),
        snapshot.top_by_activity.len(),
        path.display()
    );

    Ok(snapshot)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
