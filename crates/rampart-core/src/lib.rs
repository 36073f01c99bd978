//! Core types and definitions for the RAMPART tower-defense simulation.
//!
//! This crate defines the vocabulary shared by the simulation and its drivers:
//! constants, enums, geometry types, level definitions, events and errors.
//! It has no dependency on the ECS or any runtime framework.

pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod types;

pub use glam::Vec2;

#[cfg(test)]
mod tests;
