//! Wave lifecycle: timed spawning, draining, completion and reward.
//!
//! A started wave is a tick listener on the engine. Each tick it promotes
//! queued enemies into the engine, either at once (negligible delay) or
//! after the delay of the enemy waiting in its single pending slot. When
//! nothing is left to add it fires `on_wave_all_enemies_added` and stops
//! listening to ticks. It also subscribes to the removal of every enemy it
//! added; once the last one is gone the wave is done and pays its reward.
//!
//! ```text
//! Idle --start--> Spawning --queue empty--> AllAdded --last enemy removed--> Done
//!   ^                |                          |
//!   +-----abort------+--------------------------+
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};
use std::sync::Arc;

use hecs::Entity;
use tracing::{debug, error, info, warn};

use rampart_core::config::EnemyConfig;
use rampart_core::constants::SPAWN_DELAY_EPSILON;
use rampart_core::enums::{RemovalCause, WaveState};
use rampart_core::types::{Modifiers, Path};

use crate::enemy::Enemy;
use crate::engine::{
    GameEngine, ObjectEvent, ObjectListener, SharedObjectListener, SharedTickListener,
    TickListener,
};
use crate::factory::BehaviorCtor;
use crate::systems;
use crate::timer::TickTimer;

/// Observer of a wave's lifecycle.
pub trait WaveListener {
    fn on_wave_started(&mut self, _wave: &Wave, _engine: &mut GameEngine) {}

    fn on_wave_all_enemies_added(&mut self, _wave: &Wave, _engine: &mut GameEngine) {}

    fn on_wave_enemy_removed(
        &mut self,
        _wave: &Wave,
        _engine: &mut GameEngine,
        _event: &ObjectEvent,
        _cause: RemovalCause,
    ) {
    }

    fn on_wave_done(&mut self, _wave: &Wave, _engine: &mut GameEngine) {}
}

pub type SharedWaveListener = Rc<RefCell<dyn WaveListener>>;

/// One roster entry, fully resolved at level load.
#[derive(Debug, Clone)]
pub struct EnemyTemplate {
    pub config: Arc<EnemyConfig>,
    pub behavior: BehaviorCtor,
    pub path: Arc<Path>,
    /// Seconds after the previous enemy entered.
    pub delay: f32,
    /// Kind defaults composed with the wave's multipliers, applied once per
    /// enemy at creation.
    pub modifiers: Modifiers,
}

impl EnemyTemplate {
    /// Create the enemy and its entry point.
    pub fn build(&self, frame_rate: u32) -> (Enemy, glam::Vec2) {
        let mut enemy = Enemy::new(self.config.clone(), (self.behavior)(frame_rate));
        enemy.modify(self.modifiers);
        let entry = enemy.set_path(self.path.clone());
        (enemy, entry)
    }
}

pub struct Wave {
    this: Weak<RefCell<Wave>>,
    index: usize,
    roster: Vec<EnemyTemplate>,
    reward: u32,
    reward_given: bool,
    state: WaveState,
    to_add: VecDeque<EnemyTemplate>,
    /// Enemy waiting for `add_timer`. At most one at a time.
    pending: Option<EnemyTemplate>,
    alive: Vec<Entity>,
    add_timer: TickTimer,
    listeners: Vec<SharedWaveListener>,
}

impl Wave {
    pub fn new(index: usize, roster: Vec<EnemyTemplate>, reward: u32) -> Rc<RefCell<Wave>> {
        Rc::new_cyclic(|this| {
            RefCell::new(Wave {
                this: this.clone(),
                index,
                roster,
                reward,
                reward_given: false,
                state: WaveState::Idle,
                to_add: VecDeque::new(),
                pending: None,
                alive: Vec::new(),
                add_timer: TickTimer::new(1),
                listeners: Vec::new(),
            })
        })
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn state(&self) -> WaveState {
        self.state
    }

    pub fn is_done(&self) -> bool {
        self.state == WaveState::Done
    }

    /// The full roster, in spawn order.
    pub fn enemies(&self) -> &[EnemyTemplate] {
        &self.roster
    }

    pub fn enemies_to_add(&self) -> impl Iterator<Item = &EnemyTemplate> {
        self.pending.iter().chain(self.to_add.iter())
    }

    pub fn enemies_in_game(&self) -> &[Entity] {
        &self.alive
    }

    pub fn reward(&self) -> u32 {
        self.reward
    }

    pub fn reward_given(&self) -> bool {
        self.reward_given
    }

    pub fn add_listener(&mut self, listener: SharedWaveListener) {
        if !self.listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    pub fn remove_listener(&mut self, listener: &SharedWaveListener) {
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
    }

    /// Queue the roster and begin spawning on the next engine tick.
    pub fn start(&mut self, engine: &mut GameEngine) {
        if matches!(self.state, WaveState::Spawning | WaveState::AllAdded) {
            warn!(wave = self.index, state = ?self.state, "wave already running");
            return;
        }
        let Some(this) = self.this.upgrade() else {
            return;
        };

        self.reward_given = false;
        self.state = WaveState::Spawning;
        self.to_add = self.roster.iter().cloned().collect();
        self.pending = None;
        self.add_timer = TickTimer::new(engine.frame_rate());

        let listener: SharedTickListener = this;
        engine.add_tick_listener(listener);

        info!(wave = self.index, enemies = self.roster.len(), "wave started");
        self.notify(engine, |l, wave, engine| l.on_wave_started(wave, engine));
    }

    /// Stop the wave and force-remove its enemies without reward or life
    /// accounting. Used to reset a scenario.
    pub fn abort(&mut self, engine: &mut GameEngine) {
        if let Some(this) = self.this.upgrade() {
            let tick_listener: SharedTickListener = this.clone();
            engine.remove_tick_listener(&tick_listener);

            let object_listener: SharedObjectListener = this;
            for entity in std::mem::take(&mut self.alive) {
                engine.unsubscribe(entity, &object_listener);
                engine.remove_with_cause(entity, RemovalCause::Aborted);
            }
        }

        self.to_add.clear();
        self.pending = None;
        self.state = WaveState::Idle;
        info!(wave = self.index, "wave aborted");
    }

    /// Pay the wave reward. Only the first call per run pays.
    pub fn give_wave_reward(&mut self, engine: &mut GameEngine) {
        if self.reward_given {
            return;
        }
        self.reward_given = true;
        engine.economy_mut().give_credits(self.reward);
    }

    // ---- Spawning ----

    fn spawn_step(&mut self, engine: &mut GameEngine) {
        // The pending timer advances at most once per engine tick.
        let mut timer_ticked = false;

        loop {
            if self.pending.is_none() {
                match self.to_add.pop_front() {
                    None => break,
                    Some(template) if template.delay < SPAWN_DELAY_EPSILON => {
                        self.add_enemy(engine, &template);
                        continue;
                    }
                    Some(template) => {
                        self.add_timer.set_interval(template.delay);
                        self.pending = Some(template);
                    }
                }
            }

            if timer_ticked {
                break;
            }
            timer_ticked = true;
            if !self.add_timer.tick() {
                break;
            }
            if let Some(template) = self.pending.take() {
                self.add_enemy(engine, &template);
            }
        }

        if self.to_add.is_empty() && self.pending.is_none() {
            self.finish_spawning(engine);
        }
    }

    fn add_enemy(&mut self, engine: &mut GameEngine, template: &EnemyTemplate) {
        let Some(this) = self.this.upgrade() else {
            return;
        };

        let (enemy, entry) = template.build(engine.frame_rate());
        let entity = systems::enemy::spawn(engine, enemy, entry);
        let listener: SharedObjectListener = this;
        engine.subscribe(entity, listener.clone());

        match engine.add(entity) {
            Ok(()) => {
                debug!(wave = self.index, ?entity, kind = %template.config.kind, "enemy added");
                self.alive.push(entity);
            }
            Err(err) => {
                error!(wave = self.index, %err, "failed to add enemy");
                engine.unsubscribe(entity, &listener);
                let _ = engine.world_mut().despawn(entity);
            }
        }
    }

    fn finish_spawning(&mut self, engine: &mut GameEngine) {
        self.state = WaveState::AllAdded;
        if let Some(this) = self.this.upgrade() {
            let listener: SharedTickListener = this;
            engine.remove_tick_listener(&listener);
        }

        info!(wave = self.index, "all wave enemies added");
        self.notify(engine, |l, wave, engine| l.on_wave_all_enemies_added(wave, engine));

        // Empty roster: nothing will ever be removed.
        if self.alive.is_empty() {
            self.complete(engine);
        }
    }

    fn complete(&mut self, engine: &mut GameEngine) {
        if self.state == WaveState::Done {
            return;
        }
        self.state = WaveState::Done;
        self.give_wave_reward(engine);

        info!(wave = self.index, reward = self.reward, "wave done");
        self.notify(engine, |l, wave, engine| l.on_wave_done(wave, engine));
    }

    /// Deliver to a snapshot of the listeners.
    fn notify(
        &self,
        engine: &mut GameEngine,
        mut deliver: impl FnMut(&mut dyn WaveListener, &Wave, &mut GameEngine),
    ) {
        let listeners = self.listeners.clone();
        for listener in &listeners {
            deliver(&mut *listener.borrow_mut(), self, engine);
        }
    }
}

impl TickListener for Wave {
    fn on_tick(&mut self, engine: &mut GameEngine) {
        if self.state != WaveState::Spawning {
            return;
        }
        self.spawn_step(engine);
    }
}

impl ObjectListener for Wave {
    fn on_object_removed(&mut self, engine: &mut GameEngine, event: &ObjectEvent, cause: RemovalCause) {
        let Some(index) = self.alive.iter().position(|e| *e == event.entity) else {
            return;
        };
        self.alive.remove(index);
        if let Some(this) = self.this.upgrade() {
            let listener: SharedObjectListener = this;
            engine.unsubscribe(event.entity, &listener);
        }

        debug!(wave = self.index, entity = ?event.entity, ?cause, "wave enemy removed");
        self.notify(engine, |l, wave, engine| {
            l.on_wave_enemy_removed(wave, engine, event, cause)
        });

        if self.state == WaveState::AllAdded
            && self.alive.is_empty()
            && self.to_add.is_empty()
            && self.pending.is_none()
        {
            self.complete(engine);
        }
    }
}
