//! Enemy spawning
//!
//! One roll per tick. Enemies appear just beyond a random edge and drift
//! inward with some lateral wobble, so they trend toward the interior without
//! homing on the player.

use glam::Vec2;
use rand::Rng;

use super::state::{Arena, Enemy};
use crate::consts::*;

/// Which wall an enemy enters from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl SpawnSide {
    const ALL: [SpawnSide; 4] = [
        SpawnSide::Top,
        SpawnSide::Right,
        SpawnSide::Bottom,
        SpawnSide::Left,
    ];

    /// Unit vector pointing from this wall into the arena
    pub fn inward(&self) -> Vec2 {
        match self {
            SpawnSide::Top => Vec2::Y,
            SpawnSide::Right => Vec2::NEG_X,
            SpawnSide::Bottom => Vec2::NEG_Y,
            SpawnSide::Left => Vec2::X,
        }
    }
}

/// Per-tick spawn probability at `level`
pub fn spawn_chance(level: u32) -> f32 {
    SPAWN_BASE_CHANCE + level as f32 * SPAWN_CHANCE_PER_LEVEL
}

/// Roll once; on success build an enemy at an arena edge.
///
/// `id` is only consumed when an enemy is actually produced.
pub fn try_spawn<R: Rng>(
    rng: &mut R,
    arena: &Arena,
    level: u32,
    id: impl FnOnce() -> u32,
) -> Option<Enemy> {
    if rng.random::<f32>() >= spawn_chance(level) {
        return None;
    }

    let side = SpawnSide::ALL[rng.random_range(0..SpawnSide::ALL.len())];
    Some(spawn_at(rng, arena, side, level, id()))
}

/// Build an enemy on the given side
pub fn spawn_at<R: Rng>(rng: &mut R, arena: &Arena, side: SpawnSide, level: u32, id: u32) -> Enemy {
    let along: f32 = rng.random();
    let pos = match side {
        SpawnSide::Top => Vec2::new(along * arena.width, -ENEMY_RADIUS),
        SpawnSide::Right => Vec2::new(arena.width + ENEMY_RADIUS, along * arena.height),
        SpawnSide::Bottom => Vec2::new(along * arena.width, arena.height + ENEMY_RADIUS),
        SpawnSide::Left => Vec2::new(-ENEMY_RADIUS, along * arena.height),
    };

    let inward_speed = rng.random_range(ENEMY_MIN_INWARD_SPEED..ENEMY_MAX_INWARD_SPEED);
    let lateral_speed = rng.random_range(-ENEMY_MAX_LATERAL_SPEED..ENEMY_MAX_LATERAL_SPEED);
    let inward = side.inward();
    let lateral = inward.perp();

    Enemy {
        id,
        pos,
        vel: inward * inward_speed + lateral * lateral_speed,
        health: level,
    }
}
