//! Components attached to registered objects.
//!
//! Every registered object carries an [`ObjectInfo`]. The rest are
//! capabilities: objects that move have a [`Position`], objects that act
//! each tick have a [`Tick`], objects with a visual representation list
//! their [`Visuals`].

use glam::Vec2;
use hecs::Entity;

use rampart_core::enums::{Layer, TypeTag};

use crate::engine::GameEngine;

/// Identity and lifecycle flags shared by all simulated objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObjectInfo {
    pub tag: TypeTag,
    /// Disabled objects stay registered but are skipped by the tick pass.
    pub enabled: bool,
}

impl ObjectInfo {
    pub fn new(tag: TypeTag) -> Self {
        Self { tag, enabled: true }
    }
}

/// World position.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Position(pub Vec2);

/// Per-kind tick behavior, called once per engine tick while registered.
#[derive(Clone, Copy)]
pub struct Tick(pub fn(&mut GameEngine, Entity));

impl std::fmt::Debug for Tick {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Tick")
    }
}

/// What a drawable shows. Drawing itself happens in the renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawableKind {
    Sprite,
    HealthBar,
}

/// A drawable to attach when the owning object is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Visual {
    pub layer: Layer,
    pub kind: DrawableKind,
    /// Sprite frame index.
    pub frame: u8,
}

impl Visual {
    pub fn sprite(layer: Layer) -> Self {
        Self {
            layer,
            kind: DrawableKind::Sprite,
            frame: 0,
        }
    }

    pub fn health_bar() -> Self {
        Self {
            layer: Layer::EnemyHealthBar,
            kind: DrawableKind::HealthBar,
            frame: 0,
        }
    }

    pub fn with_frame(mut self, frame: u8) -> Self {
        self.frame = frame;
        self
    }
}

/// Visuals an object wants registered alongside itself.
#[derive(Debug, Clone, Default)]
pub struct Visuals(pub Vec<Visual>);

/// Drawables currently registered on behalf of an object.
#[derive(Debug, Clone, Default)]
pub struct Attachments(pub Vec<Entity>);

/// Registered drawable: the renderer's handle on an object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Drawable {
    pub layer: Layer,
    pub kind: DrawableKind,
    pub frame: u8,
    pub owner: Entity,
}
