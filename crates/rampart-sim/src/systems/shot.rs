//! Projectiles: straight-line flight, first-in-registry hit resolution.

use glam::Vec2;
use hecs::Entity;
use rand::Rng;

use rampart_core::constants::{CANON_MG_HIT_RANGE, CANON_MG_SPEED, CANON_MG_SPRITE_FRAMES};
use rampart_core::enums::{Layer, RemovalCause, TypeTag};

use crate::components::{ObjectInfo, Position, Tick, Visual, Visuals};
use crate::engine::{EngineError, GameEngine};
use crate::registry::in_range;
use crate::systems::enemy;

/// Flight and damage parameters of a shot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotParams {
    /// Units per second.
    pub speed: f32,
    pub hit_radius: f32,
    pub damage: f32,
}

impl ShotParams {
    /// Machine-gun canon round.
    pub fn canon_mg(damage: f32) -> Self {
        Self {
            speed: CANON_MG_SPEED,
            hit_radius: CANON_MG_HIT_RANGE,
            damage,
        }
    }
}

/// A shot in flight. Direction is fixed at launch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shot {
    /// Object that fired the shot; credited with kills.
    pub origin: Option<Entity>,
    pub direction: Vec2,
    pub params: ShotParams,
}

/// Spawn and register a shot at `position` flying along `direction`.
pub fn fire(
    engine: &mut GameEngine,
    origin: Option<Entity>,
    position: Vec2,
    direction: Vec2,
    params: ShotParams,
) -> Result<Entity, EngineError> {
    let frame = engine.rng_mut().gen_range(0..CANON_MG_SPRITE_FRAMES);
    engine.insert((
        ObjectInfo::new(TypeTag::Shot),
        Position(position),
        Tick(tick),
        Visuals(vec![Visual::sprite(Layer::Shot).with_frame(frame)]),
        Shot {
            origin,
            direction: direction.normalize_or_zero(),
            params,
        },
    ))
}

/// Move the shot, then hit the first enemy in range in registry order.
/// A shot that leaves the play area is discarded.
pub fn tick(engine: &mut GameEngine, entity: Entity) {
    let frame_rate = engine.frame_rate() as f32;
    let (position, shot) = {
        let Ok((position, shot)) = engine
            .world_mut()
            .query_one_mut::<(&mut Position, &Shot)>(entity)
        else {
            return;
        };
        position.0 += shot.direction * (shot.params.speed / frame_rate);
        (position.0, *shot)
    };

    let target = engine
        .get(TypeTag::Enemy)
        .find(in_range(position, shot.params.hit_radius))
        .map(|object| object.entity());

    if let Some(target) = target {
        enemy::damage(engine, target, shot.params.damage, shot.origin);
        engine.remove_with_cause(entity, RemovalCause::Hit);
        return;
    }

    if !engine.play_area().contains(position) {
        engine.remove_with_cause(entity, RemovalCause::OutOfBounds);
    }
}
