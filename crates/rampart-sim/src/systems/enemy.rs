//! Enemy tick, damage and the engine-level wrappers around `Enemy` rules.

use glam::Vec2;
use hecs::Entity;
use tracing::debug;

use rampart_core::constants::{HEALER_HEAL_FRACTION, LIVES_PER_LEAK};
use rampart_core::enums::{Layer, RemovalCause, TypeTag};

use crate::components::{ObjectInfo, Position, Tick, Visual, Visuals};
use crate::enemy::{Enemy, Step};
use crate::engine::{object_id, GameEngine};
use crate::registry::{in_range, ObjectRef};

/// Spawn an enemy object (not yet registered) at `position`.
pub fn spawn(engine: &mut GameEngine, enemy: Enemy, position: Vec2) -> Entity {
    engine.spawn((
        ObjectInfo::new(TypeTag::Enemy),
        Position(position),
        Tick(tick),
        Visuals(vec![Visual::sprite(Layer::Enemy), Visual::health_bar()]),
        enemy,
    ))
}

/// Advance one enemy along its path; leak it when the path is exhausted.
pub fn tick(engine: &mut GameEngine, entity: Entity) {
    let frame_rate = engine.frame_rate();
    let (step, position, heal_radius) = {
        let Ok((position, enemy)) = engine
            .world_mut()
            .query_one_mut::<(&mut Position, &mut Enemy)>(entity)
        else {
            return;
        };
        let step = enemy.advance(&mut position.0, frame_rate);
        let heal_radius = match step {
            Step::PathEnd => None,
            _ => enemy.behavior_mut().heal_pulse(),
        };
        (step, position.0, heal_radius)
    };

    if step == Step::PathEnd {
        debug!(?entity, "enemy reached path end");
        engine.economy_mut().take_lives(LIVES_PER_LEAK);
        engine.remove_with_cause(entity, RemovalCause::ReachedEnd);
        return;
    }

    if let Some(radius) = heal_radius {
        heal_around(engine, position, radius);
    }
}

/// Heal every live enemy within `radius` of `center` by a fraction of its
/// own max health.
pub fn heal_around(engine: &mut GameEngine, center: Vec2, radius: f32) {
    let targets: Vec<Entity> = engine
        .get(TypeTag::Enemy)
        .filter(in_range(center, radius))
        .map(|object| object.entity())
        .collect();

    for target in targets {
        if let Ok(mut enemy) = engine.world().get::<&mut Enemy>(target) {
            let amount = enemy.max_health() * HEALER_HEAL_FRACTION;
            enemy.heal(amount);
        }
    }
}

/// Damage a registered enemy. On death the reward is paid and the enemy
/// removed, crediting `attacker`. Returns true if the enemy died.
pub fn damage(
    engine: &mut GameEngine,
    entity: Entity,
    amount: f32,
    attacker: Option<Entity>,
) -> bool {
    if !engine.is_registered(entity) {
        return false;
    }

    let reward = match engine.world().get::<&mut Enemy>(entity) {
        Ok(mut enemy) => enemy.damage(amount).then(|| enemy.reward()),
        Err(_) => return false,
    };
    let Some(reward) = reward else {
        return false;
    };

    debug!(?entity, reward, "enemy killed");
    engine.economy_mut().give_credits(reward);
    engine.remove_with_cause(
        entity,
        RemovalCause::Killed {
            by: attacker.map(object_id),
        },
    );
    true
}

pub fn heal(engine: &mut GameEngine, entity: Entity, amount: f32) {
    if let Ok(mut enemy) = engine.world().get::<&mut Enemy>(entity) {
        enemy.heal(amount);
    }
}

/// Knock an enemy back along its path.
pub fn send_back(engine: &mut GameEngine, entity: Entity, distance: f32) {
    if let Ok((position, enemy)) = engine
        .world_mut()
        .query_one_mut::<(&mut Position, &mut Enemy)>(entity)
    {
        enemy.send_back(&mut position.0, distance);
    }
}

pub fn position_after(engine: &GameEngine, entity: Entity, secs: f32) -> Option<Vec2> {
    let position = engine.world().get::<&Position>(entity).ok()?.0;
    let enemy = engine.world().get::<&Enemy>(entity).ok()?;
    Some(enemy.position_after(position, secs))
}

pub fn distance_remaining(engine: &GameEngine, entity: Entity) -> Option<f32> {
    let position = engine.world().get::<&Position>(entity).ok()?.0;
    let enemy = engine.world().get::<&Enemy>(entity).ok()?;
    Some(enemy.distance_remaining(position))
}

pub fn health(engine: &GameEngine, entity: Entity) -> Option<f32> {
    engine
        .world()
        .get::<&Enemy>(entity)
        .ok()
        .map(|enemy| enemy.health())
}

// ---- Targeting helpers ----

/// Remaining path distance of a registry object, or infinity for non-enemies.
pub fn by_distance_remaining(object: &ObjectRef<'_>) -> f32 {
    match (object.position(), object.enemy()) {
        (Some(position), Some(enemy)) => enemy.distance_remaining(position),
        _ => f32::INFINITY,
    }
}

/// Reported health of a registry object, or zero for non-enemies.
pub fn by_health(object: &ObjectRef<'_>) -> f32 {
    object.enemy().map(|enemy| enemy.health()).unwrap_or(0.0)
}

/// Enemy within `radius` of `center` closest to leaking.
pub fn closest_to_exit(engine: &GameEngine, center: Vec2, radius: f32) -> Option<Entity> {
    engine
        .get(TypeTag::Enemy)
        .filter(in_range(center, radius))
        .min_by(|a, b| by_distance_remaining(a).total_cmp(&by_distance_remaining(b)))
        .map(|object| object.entity())
}

/// Enemy within `radius` of `center` with the most health.
pub fn strongest(engine: &GameEngine, center: Vec2, radius: f32) -> Option<Entity> {
    engine
        .get(TypeTag::Enemy)
        .filter(in_range(center, radius))
        .max_by(|a, b| by_health(a).total_cmp(&by_health(b)))
        .map(|object| object.entity())
}
