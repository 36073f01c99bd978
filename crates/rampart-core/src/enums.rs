//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

use crate::types::ObjectId;

/// Type tag of a registered object. Registry queries filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    Enemy,
    Shot,
    Tower,
    /// Visual capability attached to another object.
    Drawable,
}

/// Render layer of a drawable, bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Layer {
    Background,
    Enemy,
    Tower,
    Shot,
    EnemyHealthBar,
}

/// Why an object left the registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RemovalCause {
    /// Plain removal request from outside the simulation.
    Requested,
    /// Enemy health dropped to zero. `by` is the object credited with the kill.
    Killed { by: Option<ObjectId> },
    /// Enemy ran out of waypoints and cost the player a life.
    ReachedEnd,
    /// Force-removed by a wave abort; no reward or life accounting.
    Aborted,
    /// Shot spent after hitting a target.
    Hit,
    /// Shot left the playable area.
    OutOfBounds,
    /// Drawable detached because its owner left.
    Detached,
}

/// Wave lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveState {
    #[default]
    Idle,
    /// Enemies are still being promoted into the engine.
    Spawning,
    /// Every enemy has been added; waiting for the survivors to leave.
    AllAdded,
    Done,
}
