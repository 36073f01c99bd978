//! Path-following enemy state and its pure movement/combat rules.
//!
//! `Enemy` is the ECS component; the functions here operate on it plus the
//! object's position and never touch the world. The per-tick glue lives in
//! `systems::enemy`.

use std::sync::Arc;

use glam::Vec2;

use rampart_core::config::EnemyConfig;
use rampart_core::constants::{HEALER_INTERVAL_SECS, HEALER_RANGE};
use rampart_core::types::{Modifiers, Path};

use crate::timer::TickTimer;

/// Kind-specific behavior layered on top of path following.
#[derive(Debug, Clone, PartialEq)]
pub enum Behavior {
    /// Follows its path, nothing else.
    Walker,
    /// Periodically heals enemies around it.
    Healer { timer: TickTimer, range: f32 },
}

impl Behavior {
    pub fn walker(_frame_rate: u32) -> Self {
        Behavior::Walker
    }

    pub fn healer(frame_rate: u32) -> Self {
        Behavior::Healer {
            timer: TickTimer::with_interval(frame_rate, HEALER_INTERVAL_SECS),
            range: HEALER_RANGE,
        }
    }

    /// Advance the behavior's own clock. Returns the radius to heal this
    /// tick, if any.
    pub fn heal_pulse(&mut self) -> Option<f32> {
        match self {
            Behavior::Walker => None,
            Behavior::Healer { timer, range } => timer.tick().then_some(*range),
        }
    }
}

/// Outcome of one movement step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Moved toward the next waypoint.
    Moved,
    /// Snapped onto the next waypoint.
    ReachedWaypoint,
    /// No waypoint left: the enemy has leaked.
    PathEnd,
}

#[derive(Debug, Clone)]
pub struct Enemy {
    config: Arc<EnemyConfig>,
    behavior: Behavior,
    path: Option<Arc<Path>>,
    /// Index of the next waypoint. `0 <= index <= path.len()`.
    waypoint_index: usize,
    /// Stored in unmodified units; reported scaled by the health modifier.
    health: f32,
    base_speed: f32,
    modifiers: Modifiers,
}

impl Enemy {
    pub fn new(config: Arc<EnemyConfig>, behavior: Behavior) -> Self {
        Self {
            health: config.health,
            base_speed: config.speed,
            config,
            behavior,
            path: None,
            waypoint_index: 0,
            modifiers: Modifiers::IDENTITY,
        }
    }

    pub fn config(&self) -> &EnemyConfig {
        &self.config
    }

    pub fn kind(&self) -> &str {
        &self.config.kind
    }

    pub fn behavior(&self) -> &Behavior {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut Behavior {
        &mut self.behavior
    }

    // ---- Path ----

    /// Put the enemy on `path`. Returns the entry point, where the caller
    /// should place it.
    pub fn set_path(&mut self, path: Arc<Path>) -> Vec2 {
        let entry = path.first();
        self.path = Some(path);
        self.waypoint_index = 1;
        entry
    }

    pub fn path(&self) -> Option<&Arc<Path>> {
        self.path.as_ref()
    }

    pub fn waypoint_index(&self) -> usize {
        self.waypoint_index
    }

    pub fn has_waypoint(&self) -> bool {
        self.waypoint().is_some()
    }

    /// Next waypoint ahead, if any.
    pub fn waypoint(&self) -> Option<Vec2> {
        let path = self.path.as_ref()?;
        assert!(
            self.waypoint_index <= path.len(),
            "waypoint index {} out of range for path of {}",
            self.waypoint_index,
            path.len()
        );
        path.get(self.waypoint_index)
    }

    /// Unit direction toward the next waypoint.
    pub fn direction(&self, position: Vec2) -> Option<Vec2> {
        self.waypoint()
            .map(|waypoint| (waypoint - position).normalize_or_zero())
    }

    /// Move one tick along the path.
    pub fn advance(&mut self, position: &mut Vec2, frame_rate: u32) -> Step {
        let Some(waypoint) = self.waypoint() else {
            return Step::PathEnd;
        };

        let step = self.speed() / frame_rate as f32;
        let distance = position.distance(waypoint);
        if distance <= step {
            *position = waypoint;
            self.waypoint_index += 1;
            Step::ReachedWaypoint
        } else {
            *position += (waypoint - *position) / distance * step;
            Step::Moved
        }
    }

    /// Where the enemy will be after `secs` seconds at its current speed.
    /// Stops at the path end; without a path, stays put.
    pub fn position_after(&self, position: Vec2, secs: f32) -> Vec2 {
        let Some(path) = self.path.as_ref() else {
            return position;
        };

        let mut remaining = secs * self.speed();
        let mut index = self.waypoint_index;
        let mut current = position;

        while index < path.len() {
            let to_waypoint = path[index] - current;
            let length = to_waypoint.length();
            if remaining < length {
                return current + to_waypoint * (remaining / length);
            }
            remaining -= length;
            current = path[index];
            index += 1;
        }

        current
    }

    /// Distance left to walk: to the next waypoint, then every segment after.
    pub fn distance_remaining(&self, position: Vec2) -> f32 {
        let (Some(path), Some(waypoint)) = (self.path.as_ref(), self.waypoint()) else {
            return 0.0;
        };

        let rest: f32 = (self.waypoint_index + 1..path.len())
            .map(|i| path.segment_length(i))
            .sum();
        position.distance(waypoint) + rest
    }

    /// Knock the enemy back along its path by `distance`. Never goes past
    /// the entry point.
    pub fn send_back(&mut self, position: &mut Vec2, distance: f32) {
        let Some(path) = self.path.clone() else {
            return;
        };
        assert!(
            self.waypoint_index >= 1 && self.waypoint_index <= path.len(),
            "waypoint index {} out of range for path of {}",
            self.waypoint_index,
            path.len()
        );

        let mut remaining = distance.max(0.0);
        let mut index = self.waypoint_index - 1;
        let mut current = *position;

        loop {
            let target = path[index];
            let length = current.distance(target);

            if remaining <= length {
                *position = current + (target - current).normalize_or_zero() * remaining;
                self.waypoint_index = index + 1;
                return;
            }
            if index == 0 {
                break;
            }

            remaining -= length;
            current = target;
            index -= 1;
        }

        *position = path.first();
        self.waypoint_index = 1;
    }

    // ---- Health ----

    pub fn speed(&self) -> f32 {
        self.base_speed * self.modifiers.speed
    }

    /// Health as seen from outside, scaled by the health modifier.
    pub fn health(&self) -> f32 {
        self.health * self.modifiers.health
    }

    pub fn max_health(&self) -> f32 {
        self.config.health * self.modifiers.health
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0.0
    }

    /// Apply damage. Returns true if this blow killed the enemy.
    pub fn damage(&mut self, amount: f32) -> bool {
        if self.is_dead() {
            return false;
        }
        self.health = (self.health - amount / self.modifiers.health).max(0.0);
        self.is_dead()
    }

    pub fn heal(&mut self, amount: f32) {
        self.health = (self.health + amount / self.modifiers.health).clamp(0.0, self.config.health);
    }

    /// Credits paid on death, rounded to whole units.
    pub fn reward(&self) -> u32 {
        (self.config.reward as f32 * self.modifiers.reward).round() as u32
    }

    // ---- Modifiers ----

    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    pub fn modify(&mut self, modifiers: Modifiers) {
        self.modifiers = self.modifiers.compose(modifiers);
    }

    pub fn modify_speed(&mut self, factor: f32) {
        self.modifiers.speed *= factor;
    }

    pub fn modify_health(&mut self, factor: f32) {
        self.modifiers.health *= factor;
    }

    pub fn modify_reward(&mut self, factor: f32) {
        self.modifiers.reward *= factor;
    }
}
