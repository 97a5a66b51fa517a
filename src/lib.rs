//! Star Skirmish - a top-down arena space shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, physics, spawning, collisions, phases)
//! - `scheduler`: Frame loop with an injectable clock
//! - `game`: Session facade wiring key events and lifecycle actions to the sim
//! - `settings`: Data-driven configuration

pub mod game;
pub mod scheduler;
pub mod settings;
pub mod sim;

pub use game::Game;
pub use scheduler::{Clock, FrameLoop, ManualClock, SystemClock};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Default arena dimensions (logical units)
    pub const ARENA_WIDTH: f32 = 800.0;
    pub const ARENA_HEIGHT: f32 = 600.0;

    /// Nominal display rate the loop is paced at
    pub const DEFAULT_FRAME_RATE: f32 = 60.0;

    /// Collision radii
    pub const PLAYER_RADIUS: f32 = 20.0;
    pub const BULLET_RADIUS: f32 = 4.0;
    pub const ENEMY_RADIUS: f32 = 15.0;

    /// Player handling (units / radians per tick)
    pub const PLAYER_FORWARD_SPEED: f32 = 5.0;
    pub const PLAYER_REVERSE_SPEED: f32 = 3.0;
    pub const PLAYER_TURN_RATE: f32 = 0.1;
    pub const PLAYER_START_HEALTH: i32 = 100;

    pub const BULLET_SPEED: f32 = 8.0;

    /// How far past the arena edge entities may travel before removal
    pub const BULLET_CULL_MARGIN: f32 = 10.0;
    pub const ENEMY_CULL_MARGIN: f32 = 50.0;

    /// Spawn chance per tick is `SPAWN_BASE_CHANCE + level * SPAWN_CHANCE_PER_LEVEL`
    pub const SPAWN_BASE_CHANCE: f32 = 0.02;
    pub const SPAWN_CHANCE_PER_LEVEL: f32 = 0.005;

    /// Enemy drift speed ranges
    pub const ENEMY_MIN_INWARD_SPEED: f32 = 1.0;
    pub const ENEMY_MAX_INWARD_SPEED: f32 = 3.0;
    pub const ENEMY_MAX_LATERAL_SPEED: f32 = 1.0;

    pub const KILL_SCORE: u64 = 10;
    pub const COLLISION_DAMAGE: i32 = 10;

    pub const START_LEVEL: u32 = 1;
}

/// Unit vector for a heading angle (radians, 0 = +x, growing clockwise on screen)
#[inline]
pub fn heading_vector(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(mut angle: f32) -> f32 {
    use std::f32::consts::PI;
    while angle >= PI {
        angle -= 2.0 * PI;
    }
    while angle < -PI {
        angle += 2.0 * PI;
    }
    angle
}
