//! Game state and core simulation types
//!
//! Everything the tick mutates lives on [`GameState`]; renderers only ever see
//! a [`Snapshot`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::store::EntityStore;
use crate::consts::*;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, nothing simulated
    #[default]
    Menu,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Player health ran out
    GameOver,
}

/// Fixed logical play area, origin at the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Default for Arena {
    fn default() -> Self {
        Self {
            width: ARENA_WIDTH,
            height: ARENA_HEIGHT,
        }
    }
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a point so it stays `margin` away from every wall
    pub fn clamp_inside(&self, pos: Vec2, margin: f32) -> Vec2 {
        Vec2::new(
            pos.x.clamp(margin, self.width - margin),
            pos.y.clamp(margin, self.height - margin),
        )
    }

    /// True while `pos` is strictly within the arena grown by `margin` on every side
    pub fn contains_with_margin(&self, pos: Vec2, margin: f32) -> bool {
        pos.x > -margin
            && pos.x < self.width + margin
            && pos.y > -margin
            && pos.y < self.height + margin
    }
}

/// Identifies who fired a bullet. Only one local pilot exists today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlayerId(pub u32);

/// The player's ship
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub pos: Vec2,
    /// Heading in radians, normalized to [-π, π)
    pub angle: f32,
    /// May dip below zero inside a tick; see [`Player::display_health`]
    pub health: i32,
    pub score: u64,
}

impl Player {
    /// Fresh ship parked at the center of the arena
    pub fn spawn(arena: &Arena) -> Self {
        Self {
            id: PlayerId::default(),
            pos: arena.center(),
            angle: 0.0,
            health: PLAYER_START_HEALTH,
            score: 0,
        }
    }

    pub fn is_dead(&self) -> bool {
        self.health <= 0
    }

    /// Health as shown to the user, never negative
    pub fn display_health(&self) -> u32 {
        self.health.max(0) as u32
    }
}

/// A projectile fired by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub owner: PlayerId,
}

/// A hostile drifting in from the arena edge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Level at spawn time. Any hit is lethal regardless of this value.
    pub health: u32,
}

/// Things that happened during a tick, for HUD/audio collaborators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    BulletFired { bullet_id: u32 },
    EnemySpawned { enemy_id: u32 },
    EnemyDestroyed { enemy_id: u32, bullet_id: u32 },
    PlayerHit { enemy_id: u32, health: i32 },
    GameOver { score: u64 },
}

/// Read-only view handed to renderers after each tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: GamePhase,
    pub level: u32,
    pub tick: u64,
    pub arena: Arena,
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Complete game state (deterministic for a given seed and input sequence)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub phase: GamePhase,
    /// Difficulty scalar; fixed at [`START_LEVEL`] for the whole session
    pub level: u32,
    /// Ticks simulated since the last new game
    pub time_ticks: u64,
    pub arena: Arena,
    pub store: EntityStore,
}

impl GameState {
    /// Create a new game state sitting in the menu
    pub fn new(seed: u64, arena: Arena) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Menu,
            level: START_LEVEL,
            time_ticks: 0,
            arena,
            store: EntityStore::new(Player::spawn(&arena)),
        }
    }

    /// Put the player, entities and level back to new-game values.
    /// The RNG keeps running so consecutive games differ.
    pub fn reset_session(&mut self) {
        self.store.reset(Player::spawn(&self.arena));
        self.level = START_LEVEL;
        self.time_ticks = 0;
    }

    pub fn player(&self) -> &Player {
        self.store.player()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            phase: self.phase,
            level: self.level,
            tick: self.time_ticks,
            arena: self.arena,
            player: self.store.player().clone(),
            bullets: self.store.bullets().to_vec(),
            enemies: self.store.enemies().to_vec(),
        }
    }
}
