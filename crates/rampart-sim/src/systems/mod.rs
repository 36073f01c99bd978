//! Per-kind tick behavior and the operations other objects invoke on them.
//!
//! Systems are functions over `&mut GameEngine` and an entity. They do not
//! own state; all state lives in components.

pub mod enemy;
pub mod shot;
