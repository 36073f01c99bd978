//! Simulation engine for RAMPART.
//!
//! Owns the hecs world of simulated objects, advances them at a fixed tick
//! rate, runs wave spawning, and mediates add/remove notifications between
//! objects, waves and outside observers.

pub mod components;
pub mod economy;
pub mod enemy;
pub mod engine;
pub mod factory;
pub mod level;
pub mod registry;
pub mod systems;
pub mod timer;
pub mod wave;

pub use rampart_core;
pub use engine::{EngineConfig, EngineError, GameEngine};
