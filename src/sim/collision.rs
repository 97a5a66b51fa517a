//! Collision detection and resolution
//!
//! Everything is a circle. Resolution runs in a single pass over immutable
//! inputs and returns the surviving sets plus a record of what hit what.
//!
//! Tie-break: enemies are visited in collection order, and each enemy takes
//! the first unconsumed bullet (in collection order) that overlaps it. A
//! bullet is consumed by at most one enemy and an enemy by at most one
//! bullet per tick.

use glam::Vec2;

use super::state::{Bullet, Enemy, Player};
use crate::consts::*;

/// Strict circle overlap: touching at exactly the radius sum is a miss
#[inline]
pub fn circles_overlap(pos_a: Vec2, radius_a: f32, pos_b: Vec2, radius_b: f32) -> bool {
    pos_a.distance(pos_b) < radius_a + radius_b
}

/// Output of [`resolve`]
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub player: Player,
    pub bullets: Vec<Bullet>,
    pub enemies: Vec<Enemy>,
    /// `(enemy_id, bullet_id)` for every bullet kill, in resolution order
    pub kills: Vec<(u32, u32)>,
    /// Enemy ids that rammed the player, in resolution order
    pub rams: Vec<u32>,
}

/// Resolve bullet/enemy and then player/enemy overlaps
pub fn resolve(player: &Player, bullets: &[Bullet], enemies: &[Enemy]) -> Resolution {
    let mut player = player.clone();
    let mut bullet_consumed = vec![false; bullets.len()];
    let mut kills = Vec::new();
    let mut rams = Vec::new();
    let mut survivors = Vec::with_capacity(enemies.len());

    for enemy in enemies {
        let hit = bullets.iter().enumerate().find(|(i, bullet)| {
            !bullet_consumed[*i]
                && circles_overlap(bullet.pos, BULLET_RADIUS, enemy.pos, ENEMY_RADIUS)
        });

        match hit {
            Some((i, bullet)) => {
                bullet_consumed[i] = true;
                player.score += KILL_SCORE;
                kills.push((enemy.id, bullet.id));
            }
            None => survivors.push(enemy),
        }
    }

    // Health may go negative here; the phase observation handles the floor
    let mut enemies_left = Vec::with_capacity(survivors.len());
    for enemy in survivors {
        if circles_overlap(player.pos, PLAYER_RADIUS, enemy.pos, ENEMY_RADIUS) {
            player.health -= COLLISION_DAMAGE;
            rams.push(enemy.id);
        } else {
            enemies_left.push(enemy.clone());
        }
    }

    let bullets_left = bullets
        .iter()
        .zip(&bullet_consumed)
        .filter(|(_, consumed)| !**consumed)
        .map(|(b, _)| b.clone())
        .collect();

    Resolution {
        player,
        bullets: bullets_left,
        enemies: enemies_left,
        kills,
        rams,
    }
}
