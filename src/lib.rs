//! Astrofield - an asteroids arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, spawning, modifiers, collisions)
//! - `tuning`: Data-driven session configuration
//! - `events`: Typed game events drained by the host each tick
//! - `host`: Input-queue translation and the scripted demo pilot
//! - `highscores`: In-memory leaderboard across sessions

pub mod events;
pub mod highscores;
pub mod host;
pub mod sim;
pub mod tuning;

pub use highscores::HighScores;
pub use tuning::SessionConfig;

use glam::Vec2;

/// Structural game constants. Tunable values live in [`tuning::SessionConfig`].
pub mod consts {
    /// Fixed simulation tick rate. Per-tick constants (speeds, spawn cadences
    /// in frame counts) are calibrated to this rate; changing it changes the
    /// effective game speed.
    pub const TICK_RATE: f32 = 60.0;
    /// Seconds advanced per simulation tick
    pub const TICK_DT: f64 = 1.0 / TICK_RATE as f64;

    /// Half-width of the multi-shot spread window, degrees. Bullet 0 fires at
    /// the minimum offset, bullet N-1 at the maximum.
    pub const SPREAD_HALF_ANGLE_DEG: f32 = 15.0;

    /// Frames in an explosion animation before it removes itself
    pub const EXPLOSION_FRAMES: u32 = 16;
    /// Explosion footprint, pixels
    pub const EXPLOSION_SIZE: (u32, u32) = (90, 90);

    /// Off-screen band where asteroids and enemies spawn and asteroids wrap
    pub const SPAWN_MARGIN: f32 = 150.0;

    /// Bullet footprints, pixels
    pub const BULLET_SIZE: (u32, u32) = (10, 20);
    pub const EXPLOSIVE_BULLET_SIZE: (u32, u32) = (14, 14);
    /// Booster footprint, pixels
    pub const BOOSTER_SIZE: (u32, u32) = (30, 30);
}

/// Visual bearing from one point toward another, in degrees.
///
/// Screen coordinates are y-down; 0 degrees faces up, positive rotates
/// counter-clockwise. Used only for sprite rotation, never for physics.
#[inline]
pub fn bearing_deg(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    (-d.y.atan2(d.x)).to_degrees() + 90.0
}

/// Normalize a direction, falling back to a fixed default heading (screen-down)
/// when the vector has no length. Keeps a bullet fired at the firer's own
/// position on a well-defined course instead of propagating NaN.
#[inline]
pub fn normalize_or_default(dir: Vec2) -> Vec2 {
    let n = dir.normalize_or_zero();
    if n == Vec2::ZERO { Vec2::new(0.0, 1.0) } else { n }
}

/// Rotate a vector by `angle_deg` degrees
#[inline]
pub fn rotate_deg(v: Vec2, angle_deg: f32) -> Vec2 {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    Vec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
