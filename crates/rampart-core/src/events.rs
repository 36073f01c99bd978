//! Events emitted by the simulation for drivers and UI feedback.

use serde::{Deserialize, Serialize};

use crate::enums::RemovalCause;
use crate::types::ObjectId;

/// Wave lifecycle event, as recorded by drivers observing a level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum WaveEvent {
    Started { wave: usize },
    AllEnemiesAdded { wave: usize },
    EnemyRemoved {
        wave: usize,
        enemy: ObjectId,
        cause: RemovalCause,
    },
    Done { wave: usize, reward: u32 },
}
