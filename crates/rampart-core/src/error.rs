//! Errors raised while loading level definitions.

use thiserror::Error;

/// A level definition that cannot be turned into a playable level.
/// Always fatal for the load: no partial level is produced.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown enemy kind `{0}`")]
    UnknownEnemyKind(String),
    #[error("no enemy config defined for kind `{0}`")]
    MissingEnemyConfig(String),
    #[error("wave {wave} references path {path}, but the level has {available} paths")]
    UnknownPath {
        wave: usize,
        path: usize,
        available: usize,
    },
    #[error("enemy kind `{kind}`: {reason}")]
    InvalidEnemyConfig { kind: String, reason: &'static str },
    #[error("wave {wave}: {reason}")]
    InvalidWave { wave: usize, reason: &'static str },
    #[error("a path needs at least 2 waypoints, got {waypoints}")]
    InvalidPath { waypoints: usize },
    #[error("malformed level definition: {0}")]
    Json(#[from] serde_json::Error),
}
