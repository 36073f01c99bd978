//! Level assembly: resolve a `LevelDefinition` into shared paths, shared
//! enemy configs and ready-to-start waves.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Arc;

use tracing::info;

use rampart_core::config::{EnemyConfig, LevelDefinition, LevelSettings};
use rampart_core::error::ConfigError;
use rampart_core::types::Path;

use crate::engine::GameEngine;
use crate::factory::EnemyFactory;
use crate::wave::{EnemyTemplate, Wave};

/// A loaded level. Waves are shared handles so drivers and the engine can
/// both reach them.
pub struct Level {
    settings: LevelSettings,
    paths: Vec<Arc<Path>>,
    configs: HashMap<String, Arc<EnemyConfig>>,
    waves: Vec<Rc<RefCell<Wave>>>,
}

impl Level {
    /// Validate stats and resolve every roster entry. Any invalid stat,
    /// unknown kind or unknown path fails the whole load.
    pub fn build(definition: &LevelDefinition, factory: &EnemyFactory) -> Result<Self, ConfigError> {
        for config in &definition.enemies {
            config.validate()?;
        }
        for (index, wave) in definition.waves.iter().enumerate() {
            wave.validate(index)?;
        }

        let paths: Vec<Arc<Path>> = definition.paths.iter().cloned().map(Arc::new).collect();
        let configs: HashMap<String, Arc<EnemyConfig>> = definition
            .enemies
            .iter()
            .map(|config| (config.kind.clone(), Arc::new(config.clone())))
            .collect();

        let mut waves = Vec::with_capacity(definition.waves.len());
        for (index, wave) in definition.waves.iter().enumerate() {
            let modifiers = wave.modifiers();
            let mut roster = Vec::with_capacity(wave.enemies.len());

            for entry in &wave.enemies {
                let behavior = factory.resolve(&entry.kind)?;
                let config = configs
                    .get(&entry.kind)
                    .cloned()
                    .ok_or_else(|| ConfigError::MissingEnemyConfig(entry.kind.clone()))?;
                let path = paths
                    .get(entry.path)
                    .cloned()
                    .ok_or(ConfigError::UnknownPath {
                        wave: index,
                        path: entry.path,
                        available: paths.len(),
                    })?;

                roster.push(EnemyTemplate {
                    config,
                    behavior,
                    path,
                    delay: entry.delay,
                    modifiers,
                });
            }

            waves.push(Wave::new(index, roster, wave.wave_reward));
        }

        info!(
            paths = paths.len(),
            kinds = configs.len(),
            waves = waves.len(),
            "level loaded"
        );

        Ok(Self {
            settings: definition.settings,
            paths,
            configs,
            waves,
        })
    }

    pub fn from_json_str(json: &str, factory: &EnemyFactory) -> Result<Self, ConfigError> {
        let definition = LevelDefinition::from_json_str(json)?;
        Self::build(&definition, factory)
    }

    pub fn settings(&self) -> LevelSettings {
        self.settings
    }

    pub fn path(&self, index: usize) -> Option<&Arc<Path>> {
        self.paths.get(index)
    }

    pub fn enemy_config(&self, kind: &str) -> Option<&Arc<EnemyConfig>> {
        self.configs.get(kind)
    }

    pub fn wave(&self, index: usize) -> Option<&Rc<RefCell<Wave>>> {
        self.waves.get(index)
    }

    pub fn waves(&self) -> &[Rc<RefCell<Wave>>] {
        &self.waves
    }

    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Start wave `index`. Returns false if there is no such wave.
    pub fn start_wave(&self, index: usize, engine: &mut GameEngine) -> bool {
        match self.waves.get(index) {
            Some(wave) => {
                wave.borrow_mut().start(engine);
                true
            }
            None => false,
        }
    }

    /// Abort every wave, clearing their enemies from the engine.
    pub fn abort(&self, engine: &mut GameEngine) {
        for wave in &self.waves {
            wave.borrow_mut().abort(engine);
        }
    }
}
