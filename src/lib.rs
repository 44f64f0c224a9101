//! Arena Survivor - A top-down arena survival game
//!
//! Core modules:
//! - `sim`: Simulation (movement, combat, spawning, progression)
//! - `session`: Session lifecycle (arena sizing, restart after a match)
//! - `renderer`: Scene building and Canvas2D drawing
//! - `platform`: Browser/native input abstraction
//! - `settings`: Display preferences

pub mod platform;
pub mod renderer;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Match length (5 minutes)
    pub const MATCH_DURATION_SECS: u64 = 5 * 60;
    /// Minimum wall-clock time between player shots (ms)
    pub const FIRE_COOLDOWN_MS: f64 = 500.0;
    /// Delay between a terminal state and the next session starting (ms)
    pub const RESTART_DELAY_MS: f64 = 100.0;

    /// Arena occupies this fraction of the smaller viewport dimension
    pub const ARENA_VIEWPORT_FRACTION: f32 = 0.95;

    /// Player defaults
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const PLAYER_MAX_HEALTH: i32 = 100;
    pub const PLAYER_MIN_SPEED: f32 = 3.0;
    /// Player speed scales with arena width
    pub const PLAYER_SPEED_PER_WIDTH: f32 = 0.004;
    /// Invulnerability after taking a hit (ticks, ~1s at 60 Hz)
    pub const INVULNERABILITY_TICKS: u32 = 60;

    /// Bullets
    pub const BULLET_RADIUS: f32 = 5.0;
    pub const PLAYER_BULLET_SPEED: f32 = 10.0;
    pub const ENEMY_BULLET_SPEED: f32 = 6.0;
    pub const ENEMY_BULLET_DAMAGE: i32 = 10;

    /// Ticks between spawn attempts
    pub const SPAWN_INTERVAL_TICKS: u32 = 35;

    /// Experience orbs
    pub const ORB_RADIUS: f32 = 8.0;
    pub const ORB_ATTRACTION_RADIUS: f32 = 150.0;
    pub const ORB_SPEED: f32 = 5.0;

    /// Experience required for level 2; grows by EXP_GROWTH per level
    pub const EXP_BASE: u32 = 100;
    pub const EXP_GROWTH: f64 = 1.5;

    /// Direction math never divides by less than this
    pub const MIN_DISTANCE: f32 = 1e-4;
}

/// Euclidean distance between two points
#[inline]
pub fn distance(a: Vec2, b: Vec2) -> f32 {
    a.distance(b)
}

/// Unit vector pointing from `from` to `to`.
///
/// Coincident points yield a zero vector instead of NaN: the distance is
/// floored at [`consts::MIN_DISTANCE`] before dividing.
#[inline]
pub fn direction_to(from: Vec2, to: Vec2) -> Vec2 {
    let delta = to - from;
    delta / delta.length().max(consts::MIN_DISTANCE)
}

/// Experience needed to advance past `level`: floor(100 × 1.5^(level−1))
#[inline]
pub fn exp_to_next(level: u32) -> u32 {
    let exponent = level.saturating_sub(1) as i32;
    (consts::EXP_BASE as f64 * consts::EXP_GROWTH.powi(exponent)).floor() as u32
}
