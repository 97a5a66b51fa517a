//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick per frame, velocities in units per tick
//! - Seeded RNG only
//! - Stable iteration order (insertion order, which is ID order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod input;
pub mod phase;
pub mod physics;
pub mod spawn;
pub mod state;
pub mod store;
pub mod tick;

pub use collision::{Resolution, circles_overlap, resolve};
pub use input::{Control, InputState};
pub use phase::{Action, Transition, observe_health, transition};
pub use physics::{
    bullet_in_play, enemy_in_play, fire_bullet, integrate_bullets, integrate_enemies, step_player,
};
pub use spawn::{SpawnSide, spawn_chance, try_spawn};
pub use state::{
    Arena, Bullet, Enemy, GameEvent, GamePhase, GameState, Player, PlayerId, Snapshot,
};
pub use store::EntityStore;
pub use tick::{apply_action, tick};
