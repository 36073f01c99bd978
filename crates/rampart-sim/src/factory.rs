//! Enemy kind registry: maps kind identifiers from level data to behaviors.
//!
//! Resolution happens once, when a level is built. An identifier with no
//! registered constructor fails the load.

use std::collections::HashMap;

use rampart_core::error::ConfigError;

use crate::enemy::Behavior;

/// Builds the behavior of a freshly spawned enemy. Gets the engine frame rate.
pub type BehaviorCtor = fn(u32) -> Behavior;

#[derive(Debug, Clone)]
pub struct EnemyFactory {
    kinds: HashMap<String, BehaviorCtor>,
}

impl EnemyFactory {
    /// Factory without any kinds.
    pub fn empty() -> Self {
        Self {
            kinds: HashMap::new(),
        }
    }

    /// Register (or replace) the constructor for `kind`.
    pub fn register(&mut self, kind: impl Into<String>, ctor: BehaviorCtor) -> &mut Self {
        self.kinds.insert(kind.into(), ctor);
        self
    }

    pub fn resolve(&self, kind: &str) -> Result<BehaviorCtor, ConfigError> {
        self.kinds
            .get(kind)
            .copied()
            .ok_or_else(|| ConfigError::UnknownEnemyKind(kind.to_owned()))
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.kinds.contains_key(kind)
    }

    /// Registered kind identifiers, sorted.
    pub fn kinds(&self) -> Vec<&str> {
        let mut kinds: Vec<&str> = self.kinds.keys().map(String::as_str).collect();
        kinds.sort_unstable();
        kinds
    }
}

impl Default for EnemyFactory {
    /// Factory with the built-in kinds.
    fn default() -> Self {
        let mut factory = Self::empty();
        factory
            .register("soldier", Behavior::walker)
            .register("blob", Behavior::walker)
            .register("flyer", Behavior::walker)
            .register("healer", Behavior::healer);
        factory
    }
}
