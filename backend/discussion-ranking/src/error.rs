/// Error types for discussion-ranking
///
/// Ranking itself never fails; only loading configuration and snapshots can.
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment error: {0}")]
    Env(#[from] envy::Error),

    #[error("Invalid hotness window: {0} (must be finite and positive)")]
    InvalidWindow(f64),

    #[error("Invalid comment edit window: {0}s (must be non-negative and fit a duration)")]
    InvalidEditWindow(i64),

    #[error("Invalid max comment depth: {0} (must be at least 1)")]
    InvalidMaxDepth(u32),
}

#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse snapshot {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
