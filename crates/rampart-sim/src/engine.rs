//! Simulation engine: the central tick dispatcher and typed registry.
//!
//! `GameEngine` owns the hecs world and the registration-order registry of
//! live objects. Each tick it runs the tick listeners (waves that are still
//! spawning), then advances every object registered at the start of the
//! tick exactly once, in registration order.
//!
//! Add/remove notifications are queued and delivered at safe points: after
//! each listener or object callback returns, or immediately when the
//! request comes from outside any callback. A callback never runs while
//! another one is on the stack, so listeners may freely add, remove,
//! subscribe and unsubscribe from inside a notification.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use glam::Vec2;
use hecs::{DynamicBundle, Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::debug;

use rampart_core::constants::TARGET_FRAME_RATE;
use rampart_core::enums::{RemovalCause, TypeTag};
use rampart_core::types::{ObjectId, PlayArea};

use crate::components::{Attachments, Drawable, ObjectInfo, Position, Tick, Visuals};
use crate::economy::Economy;
use crate::registry::{Objects, Registry};

/// Configuration for a new engine.
#[derive(Debug, Clone, Copy)]
pub struct EngineConfig {
    /// Ticks per second. Every speed-dependent computation divides by this.
    pub frame_rate: u32,
    pub play_area: PlayArea,
    /// RNG seed for cosmetic randomness. Same seed = same simulation.
    pub seed: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            frame_rate: TARGET_FRAME_RATE,
            play_area: PlayArea::default(),
            seed: 42,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("object {0:?} does not exist")]
    NoSuchObject(Entity),
    #[error("object {0:?} is already registered")]
    AlreadyRegistered(Entity),
    #[error("entity {0:?} has no ObjectInfo and cannot be registered")]
    NotAnObject(Entity),
}

/// Snapshot of an object at the moment it was added or removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectEvent {
    pub entity: Entity,
    pub tag: TypeTag,
    pub position: Option<Vec2>,
}

impl ObjectEvent {
    pub fn id(&self) -> ObjectId {
        object_id(self.entity)
    }
}

/// Stable id of an entity for use outside the ECS.
pub fn object_id(entity: Entity) -> ObjectId {
    ObjectId(entity.to_bits().get())
}

/// Called once per engine tick while registered.
pub trait TickListener {
    fn on_tick(&mut self, engine: &mut GameEngine);
}

/// Observer of object add/remove. Used both for engine-wide listeners and
/// for subscriptions to a single object.
pub trait ObjectListener {
    fn on_object_added(&mut self, _engine: &mut GameEngine, _event: &ObjectEvent) {}

    fn on_object_removed(
        &mut self,
        _engine: &mut GameEngine,
        _event: &ObjectEvent,
        _cause: RemovalCause,
    ) {
    }
}

pub type SharedTickListener = Rc<RefCell<dyn TickListener>>;
pub type SharedObjectListener = Rc<RefCell<dyn ObjectListener>>;

enum Notification {
    Added(ObjectEvent),
    Removed {
        event: ObjectEvent,
        cause: RemovalCause,
        /// Taken from the object at removal; the entity is gone by delivery.
        subscribers: Vec<SharedObjectListener>,
    },
}

/// The simulation engine. Owns the world and all registered objects.
pub struct GameEngine {
    world: World,
    registry: Registry,
    config: EngineConfig,
    rng: ChaCha8Rng,
    economy: Box<dyn Economy>,
    tick_count: u64,
    tick_listeners: Vec<SharedTickListener>,
    listeners: Vec<SharedObjectListener>,
    subscribers: HashMap<Entity, Vec<SharedObjectListener>>,
    pending: VecDeque<Notification>,
    /// Number of callbacks currently on the stack.
    dispatch_depth: u32,
}

impl GameEngine {
    pub fn new(config: EngineConfig, economy: impl Economy + 'static) -> Self {
        Self {
            world: World::new(),
            registry: Registry::default(),
            config,
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            economy: Box::new(economy),
            tick_count: 0,
            tick_listeners: Vec::new(),
            listeners: Vec::new(),
            subscribers: HashMap::new(),
            pending: VecDeque::new(),
            dispatch_depth: 0,
        }
    }

    pub fn frame_rate(&self) -> u32 {
        self.config.frame_rate
    }

    pub fn play_area(&self) -> PlayArea {
        self.config.play_area
    }

    /// Number of ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn economy_mut(&mut self) -> &mut dyn Economy {
        self.economy.as_mut()
    }

    // ---- Registry ----

    /// Create an object without registering it. Listeners can subscribe to
    /// it before it is added.
    pub fn spawn(&mut self, components: impl DynamicBundle) -> Entity {
        self.world.spawn(components)
    }

    /// Spawn and register in one step.
    pub fn insert(&mut self, components: impl DynamicBundle) -> Result<Entity, EngineError> {
        let entity = self.world.spawn(components);
        if let Err(err) = self.add(entity) {
            let _ = self.world.despawn(entity);
            return Err(err);
        }
        Ok(entity)
    }

    /// Register a spawned object: it joins the tick pass and registry views,
    /// gets its drawables attached, and listeners are told.
    pub fn add(&mut self, entity: Entity) -> Result<(), EngineError> {
        if !self.world.contains(entity) {
            return Err(EngineError::NoSuchObject(entity));
        }
        let tag = self
            .world
            .get::<&ObjectInfo>(entity)
            .map(|info| info.tag)
            .map_err(|_| EngineError::NotAnObject(entity))?;
        if !self.registry.push(entity, tag) {
            return Err(EngineError::AlreadyRegistered(entity));
        }

        self.attach_visuals(entity);

        debug!(?entity, ?tag, "object added");
        let event = self.event_for(entity, tag);
        self.pending.push_back(Notification::Added(event));
        self.flush_notifications();
        Ok(())
    }

    /// Remove on plain request.
    pub fn remove(&mut self, entity: Entity) -> bool {
        self.remove_with_cause(entity, RemovalCause::Requested)
    }

    /// Deregister and despawn an object. The removal is visible to queries
    /// immediately. Returns false if the object was not registered, so
    /// repeated removal requests are harmless.
    pub fn remove_with_cause(&mut self, entity: Entity, cause: RemovalCause) -> bool {
        let Some(tag) = self.registry.remove(entity) else {
            return false;
        };

        self.detach_visuals(entity);

        debug!(?entity, ?tag, ?cause, "object removed");
        let event = self.event_for(entity, tag);
        let subscribers = self.subscribers.remove(&entity).unwrap_or_default();
        let _ = self.world.despawn(entity);
        self.pending.push_back(Notification::Removed {
            event,
            cause,
            subscribers,
        });
        self.flush_notifications();
        true
    }

    pub fn is_registered(&self, entity: Entity) -> bool {
        self.registry.contains(entity)
    }

    /// Total number of registered objects, drawables included.
    pub fn object_count(&self) -> usize {
        self.registry.len()
    }

    pub fn count(&self, tag: TypeTag) -> usize {
        self.registry.count(tag)
    }

    /// Lazy view over registered objects of `tag`, in registration order.
    pub fn get(&self, tag: TypeTag) -> Objects<'_> {
        self.registry.view(&self.world, tag)
    }

    pub fn is_enabled(&self, entity: Entity) -> bool {
        self.world
            .get::<&ObjectInfo>(entity)
            .map(|info| info.enabled)
            .unwrap_or(false)
    }

    pub fn set_enabled(&mut self, entity: Entity, enabled: bool) -> Result<(), EngineError> {
        let mut info = self
            .world
            .get::<&mut ObjectInfo>(entity)
            .map_err(|_| EngineError::NoSuchObject(entity))?;
        info.enabled = enabled;
        Ok(())
    }

    // ---- Listeners ----

    pub fn add_tick_listener(&mut self, listener: SharedTickListener) {
        if !self.has_tick_listener(&listener) {
            self.tick_listeners.push(listener);
        }
    }

    pub fn remove_tick_listener(&mut self, listener: &SharedTickListener) {
        self.tick_listeners.retain(|l| !Rc::ptr_eq(l, listener));
    }

    pub fn has_tick_listener(&self, listener: &SharedTickListener) -> bool {
        self.tick_listeners.iter().any(|l| Rc::ptr_eq(l, listener))
    }

    /// Listen to every add/remove in the engine.
    pub fn add_listener(&mut self, listener: SharedObjectListener) {
        if !self.listeners.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            self.listeners.push(listener);
        }
    }

    pub fn remove_listener(&mut self, listener: &SharedObjectListener) {
        self.listeners.retain(|l| !Rc::ptr_eq(l, listener));
    }

    /// Listen to the add/remove of one object.
    pub fn subscribe(&mut self, entity: Entity, listener: SharedObjectListener) {
        let subscribers = self.subscribers.entry(entity).or_default();
        if !subscribers.iter().any(|l| Rc::ptr_eq(l, &listener)) {
            subscribers.push(listener);
        }
    }

    pub fn unsubscribe(&mut self, entity: Entity, listener: &SharedObjectListener) {
        if let Some(subscribers) = self.subscribers.get_mut(&entity) {
            subscribers.retain(|l| !Rc::ptr_eq(l, listener));
            if subscribers.is_empty() {
                self.subscribers.remove(&entity);
            }
        }
    }

    // ---- Tick ----

    /// Advance the simulation by one step.
    pub fn tick(&mut self) {
        self.tick_count += 1;

        // Objects added during this tick are first advanced on the next one.
        let objects = self.registry.snapshot();

        let listeners = self.tick_listeners.clone();
        for listener in &listeners {
            if !self.has_tick_listener(listener) {
                continue;
            }
            self.dispatch_depth += 1;
            listener.borrow_mut().on_tick(self);
            self.dispatch_depth -= 1;
            self.flush_notifications();
        }

        for entity in objects {
            // Removed earlier in this pass.
            if !self.registry.contains(entity) || !self.is_enabled(entity) {
                continue;
            }
            let Ok(tick) = self.world.get::<&Tick>(entity).map(|t| t.0) else {
                continue;
            };
            self.dispatch_depth += 1;
            tick(self, entity);
            self.dispatch_depth -= 1;
            self.flush_notifications();
        }
    }

    /// Deliver queued add/remove notifications. No-op while a callback is
    /// running; the queue is drained once it returns.
    pub fn flush_notifications(&mut self) {
        if self.dispatch_depth > 0 {
            return;
        }
        while let Some(notification) = self.pending.pop_front() {
            let globals = self.listeners.clone();
            self.dispatch_depth += 1;
            match notification {
                Notification::Added(event) => {
                    let subscribers = self
                        .subscribers
                        .get(&event.entity)
                        .cloned()
                        .unwrap_or_default();
                    for listener in globals.iter().chain(subscribers.iter()) {
                        listener.borrow_mut().on_object_added(self, &event);
                    }
                }
                Notification::Removed {
                    event,
                    cause,
                    subscribers,
                } => {
                    for listener in globals.iter().chain(subscribers.iter()) {
                        listener.borrow_mut().on_object_removed(self, &event, cause);
                    }
                }
            }
            self.dispatch_depth -= 1;
        }
    }

    // ---- Lifecycle hooks ----

    fn event_for(&self, entity: Entity, tag: TypeTag) -> ObjectEvent {
        ObjectEvent {
            entity,
            tag,
            position: self.world.get::<&Position>(entity).ok().map(|p| p.0),
        }
    }

    /// Register one drawable per declared visual, owned by `owner`.
    fn attach_visuals(&mut self, owner: Entity) {
        let visuals = match self.world.get::<&Visuals>(owner) {
            Ok(visuals) => visuals.0.clone(),
            Err(_) => return,
        };

        let mut attached = Vec::with_capacity(visuals.len());
        for visual in visuals {
            let drawable = self.world.spawn((
                ObjectInfo::new(TypeTag::Drawable),
                Drawable {
                    layer: visual.layer,
                    kind: visual.kind,
                    frame: visual.frame,
                    owner,
                },
            ));
            self.registry.push(drawable, TypeTag::Drawable);
            let event = self.event_for(drawable, TypeTag::Drawable);
            self.pending.push_back(Notification::Added(event));
            attached.push(drawable);
        }
        let _ = self.world.insert_one(owner, Attachments(attached));
    }

    /// Deregister the drawables attached to `owner`.
    fn detach_visuals(&mut self, owner: Entity) {
        let Ok(Attachments(drawables)) = self.world.remove_one::<Attachments>(owner) else {
            return;
        };
        for drawable in drawables {
            let Some(tag) = self.registry.remove(drawable) else {
                continue;
            };
            let event = self.event_for(drawable, tag);
            let subscribers = self.subscribers.remove(&drawable).unwrap_or_default();
            let _ = self.world.despawn(drawable);
            self.pending.push_back(Notification::Removed {
                event,
                cause: RemovalCause::Detached,
                subscribers,
            });
        }
    }
}
