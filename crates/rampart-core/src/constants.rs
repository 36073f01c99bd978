//! Simulation constants and tuning parameters.

/// Default simulation tick rate (ticks per second).
pub const TARGET_FRAME_RATE: u32 = 30;

/// Spawn delays below this many seconds are treated as "spawn immediately".
pub const SPAWN_DELAY_EPSILON: f32 = 0.1;

/// Lives charged when an enemy reaches the end of its path.
pub const LIVES_PER_LEAK: u32 = 1;

// --- Play area ---

/// Default playable area width in world units.
pub const PLAY_AREA_WIDTH: f32 = 20.0;

/// Default playable area height in world units.
pub const PLAY_AREA_HEIGHT: f32 = 20.0;

// --- Healer ---

/// Seconds between two heal pulses of a healer.
pub const HEALER_INTERVAL_SECS: f32 = 5.0;

/// Radius of a healer's pulse.
pub const HEALER_RANGE: f32 = 0.7;

/// Fraction of a target's configured max health restored per pulse.
pub const HEALER_HEAL_FRACTION: f32 = 0.2;

// --- Shots ---

/// Machine-gun canon shot speed (units per second).
pub const CANON_MG_SPEED: f32 = 8.0;

/// Machine-gun canon shot hit radius.
pub const CANON_MG_HIT_RANGE: f32 = 0.5;

/// Number of sprite frames a canon shot picks from.
pub const CANON_MG_SPRITE_FRAMES: u8 = 4;
