//! Fundamental geometric and simulation types.

use std::ops::Index;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::constants::{PLAY_AREA_HEIGHT, PLAY_AREA_WIDTH};
use crate::error::ConfigError;

/// Stable identifier of a simulated object, usable outside the ECS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

/// An ordered, immutable route of at least two waypoints.
/// Index 0 is the entry point.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    waypoints: Vec<Vec2>,
}

impl Path {
    pub fn new(waypoints: Vec<Vec2>) -> Result<Self, ConfigError> {
        if waypoints.len() < 2 {
            return Err(ConfigError::InvalidPath {
                waypoints: waypoints.len(),
            });
        }
        Ok(Self { waypoints })
    }

    /// Number of waypoints.
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false: a path has at least two waypoints.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn get(&self, index: usize) -> Option<Vec2> {
        self.waypoints.get(index).copied()
    }

    pub fn first(&self) -> Vec2 {
        self.waypoints[0]
    }

    pub fn last(&self) -> Vec2 {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Length of the segment ending at waypoint `index` (`index >= 1`).
    pub fn segment_length(&self, index: usize) -> f32 {
        self.waypoints[index].distance(self.waypoints[index - 1])
    }

    /// Total length from entry to exit.
    pub fn length(&self) -> f32 {
        (1..self.len()).map(|i| self.segment_length(i)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Vec2> {
        self.waypoints.iter()
    }
}

impl Index<usize> for Path {
    type Output = Vec2;

    fn index(&self, index: usize) -> &Vec2 {
        &self.waypoints[index]
    }
}

/// Written as a bare waypoint array, the same shape `Deserialize` reads.
impl Serialize for Path {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.waypoints.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Path {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let waypoints = Vec::<Vec2>::deserialize(deserializer)?;
        Path::new(waypoints).map_err(serde::de::Error::custom)
    }
}

/// Axis-aligned playable area. Shots leaving it are discarded.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub min: Vec2,
    pub max: Vec2,
}

impl PlayArea {
    pub fn new(min: Vec2, max: Vec2) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }
}

impl Default for PlayArea {
    fn default() -> Self {
        Self {
            min: Vec2::ZERO,
            max: Vec2::new(PLAY_AREA_WIDTH, PLAY_AREA_HEIGHT),
        }
    }
}

/// Multiplicative stat modifiers. Composing two sets multiplies them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Modifiers {
    pub speed: f32,
    pub health: f32,
    pub reward: f32,
}

impl Modifiers {
    pub const IDENTITY: Modifiers = Modifiers {
        speed: 1.0,
        health: 1.0,
        reward: 1.0,
    };

    pub fn compose(self, other: Modifiers) -> Modifiers {
        Modifiers {
            speed: self.speed * other.speed,
            health: self.health * other.health,
            reward: self.reward * other.reward,
        }
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::IDENTITY
    }
}
