//! Level definition records.
//!
//! These are the plain data produced by the asset loader: enemy stats per
//! kind, paths, and wave rosters. They carry no behavior; the simulation
//! resolves them into live objects at load time.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::{Modifiers, Path};

/// Shared, read-only stats of one enemy kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyConfig {
    /// Kind identifier, resolved to a behavior by the enemy factory.
    pub kind: String,
    pub health: f32,
    pub speed: f32,
    pub reward: u32,
}

impl EnemyConfig {
    /// Reject stats the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let reason = if !self.health.is_finite() || self.health <= 0.0 {
            "health must be positive"
        } else if !self.speed.is_finite() || self.speed < 0.0 {
            "speed must not be negative"
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidEnemyConfig {
            kind: self.kind.clone(),
            reason,
        })
    }
}

/// One roster entry of a wave.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveEnemyDefinition {
    pub kind: String,
    /// Index into the level's paths.
    #[serde(default)]
    pub path: usize,
    /// Seconds to wait after the previous enemy before this one enters.
    #[serde(default)]
    pub delay: f32,
}

/// A scheduled batch of enemies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaveDefinition {
    pub enemies: Vec<WaveEnemyDefinition>,
    #[serde(default)]
    pub wave_reward: u32,
    #[serde(default = "unit_multiplier")]
    pub health_multiplier: f32,
    #[serde(default = "unit_multiplier")]
    pub reward_multiplier: f32,
}

impl WaveDefinition {
    /// Reject multipliers and delays the simulation cannot run with.
    /// `index` is the wave's position in the level, for the error.
    pub fn validate(&self, index: usize) -> Result<(), ConfigError> {
        let positive = |value: f32| value.is_finite() && value > 0.0;
        let reason = if !positive(self.health_multiplier) {
            "healthMultiplier must be positive"
        } else if !positive(self.reward_multiplier) {
            "rewardMultiplier must be positive"
        } else if self
            .enemies
            .iter()
            .any(|e| !e.delay.is_finite() || e.delay < 0.0)
        {
            "spawn delays must not be negative"
        } else {
            return Ok(());
        };
        Err(ConfigError::InvalidWave {
            wave: index,
            reason,
        })
    }

    /// Modifiers this wave applies to every enemy of its roster.
    pub fn modifiers(&self) -> Modifiers {
        Modifiers {
            speed: 1.0,
            health: self.health_multiplier,
            reward: self.reward_multiplier,
        }
    }
}

/// Starting economy of a level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelSettings {
    pub lives: u32,
    pub credits: u32,
}

impl Default for LevelSettings {
    fn default() -> Self {
        Self {
            lives: 20,
            credits: 500,
        }
    }
}

/// A complete level: routes, enemy kinds and waves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    #[serde(default)]
    pub settings: LevelSettings,
    pub paths: Vec<Path>,
    pub enemies: Vec<EnemyConfig>,
    pub waves: Vec<WaveDefinition>,
}

impl LevelDefinition {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Look up the stats of an enemy kind.
    pub fn enemy_config(&self, kind: &str) -> Option<&EnemyConfig> {
        self.enemies.iter().find(|c| c.kind == kind)
    }
}

fn unit_multiplier() -> f32 {
    1.0
}
