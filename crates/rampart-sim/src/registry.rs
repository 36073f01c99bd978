//! Ordered registry of live objects and lazy typed views over it.
//!
//! Registration order is observable: views yield objects in the order they
//! were added, which decides e.g. which enemy a shot hits first.

use std::collections::HashSet;

use glam::Vec2;
use hecs::{Component, Entity, Ref, World};

use rampart_core::enums::TypeTag;

use crate::components::{ObjectInfo, Position};
use crate::enemy::Enemy;

/// Registered objects in registration order.
#[derive(Debug, Default)]
pub struct Registry {
    order: Vec<(Entity, TypeTag)>,
    members: HashSet<Entity>,
}

impl Registry {
    /// Append an entity. Returns false if it was already registered.
    pub fn push(&mut self, entity: Entity, tag: TypeTag) -> bool {
        if !self.members.insert(entity) {
            return false;
        }
        self.order.push((entity, tag));
        true
    }

    /// Drop an entity from the registry, keeping the order of the rest.
    pub fn remove(&mut self, entity: Entity) -> Option<TypeTag> {
        if !self.members.remove(&entity) {
            return None;
        }
        let index = self.order.iter().position(|(e, _)| *e == entity)?;
        Some(self.order.remove(index).1)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.members.contains(&entity)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Copy of the current order, for passes that may mutate the registry.
    pub fn snapshot(&self) -> Vec<Entity> {
        self.order.iter().map(|(e, _)| *e).collect()
    }

    pub fn count(&self, tag: TypeTag) -> usize {
        self.order.iter().filter(|(_, t)| *t == tag).count()
    }

    pub fn view<'a>(&'a self, world: &'a World, tag: TypeTag) -> Objects<'a> {
        Objects {
            world,
            tag,
            inner: self.order.iter(),
        }
    }
}

/// Lazy view over registered objects of one type tag.
pub struct Objects<'a> {
    world: &'a World,
    tag: TypeTag,
    inner: std::slice::Iter<'a, (Entity, TypeTag)>,
}

impl<'a> Iterator for Objects<'a> {
    type Item = ObjectRef<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let tag = self.tag;
        let world = self.world;
        self.inner
            .by_ref()
            .find(|(_, t)| *t == tag)
            .map(|&(entity, tag)| ObjectRef { entity, tag, world })
    }
}

/// Read-only handle on one registered object.
#[derive(Clone, Copy)]
pub struct ObjectRef<'a> {
    entity: Entity,
    tag: TypeTag,
    world: &'a World,
}

impl<'a> ObjectRef<'a> {
    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn tag(&self) -> TypeTag {
        self.tag
    }

    pub fn position(&self) -> Option<Vec2> {
        self.world.get::<&Position>(self.entity).ok().map(|p| p.0)
    }

    pub fn is_enabled(&self) -> bool {
        self.world
            .get::<&ObjectInfo>(self.entity)
            .map(|info| info.enabled)
            .unwrap_or(false)
    }

    pub fn get<T: Component>(&self) -> Option<Ref<'a, T>> {
        self.world.get::<&T>(self.entity).ok()
    }

    pub fn enemy(&self) -> Option<Ref<'a, Enemy>> {
        self.get::<Enemy>()
    }
}

/// Predicate: object lies within `radius` of `center`.
pub fn in_range(center: Vec2, radius: f32) -> impl for<'r, 'w> Fn(&'r ObjectRef<'w>) -> bool {
    move |object: &ObjectRef<'_>| {
        object
            .position()
            .is_some_and(|p| p.distance(center) <= radius)
    }
}
