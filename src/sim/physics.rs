//! Per-tick integration
//!
//! Everything here is a pure function of its inputs. Velocities are in units
//! per tick, there is no `dt`: the loop runs once per frame.

use super::input::{Control, InputState};
use super::state::{Arena, Bullet, Enemy, Player};
use crate::consts::*;
use crate::{heading_vector, normalize_angle};

/// Apply held movement controls and clamp to the arena.
///
/// Thrust uses the heading from before this tick's turn.
pub fn step_player(player: &Player, input: &InputState, arena: &Arena) -> Player {
    let heading = heading_vector(player.angle);
    let mut pos = player.pos;
    let mut angle = player.angle;

    if input.is_held(Control::Forward) {
        pos += heading * PLAYER_FORWARD_SPEED;
    }
    if input.is_held(Control::Backward) {
        pos -= heading * PLAYER_REVERSE_SPEED;
    }
    if input.is_held(Control::TurnLeft) {
        angle -= PLAYER_TURN_RATE;
    }
    if input.is_held(Control::TurnRight) {
        angle += PLAYER_TURN_RATE;
    }

    Player {
        pos: arena.clamp_inside(pos, PLAYER_RADIUS),
        angle: normalize_angle(angle),
        ..player.clone()
    }
}

/// Advance bullets by their velocity without culling
pub fn integrate_bullets(bullets: &[Bullet]) -> Vec<Bullet> {
    bullets
        .iter()
        .map(|b| Bullet {
            pos: b.pos + b.vel,
            ..b.clone()
        })
        .collect()
}

/// Advance enemies by their velocity without culling
pub fn integrate_enemies(enemies: &[Enemy]) -> Vec<Enemy> {
    enemies
        .iter()
        .map(|e| Enemy {
            pos: e.pos + e.vel,
            ..e.clone()
        })
        .collect()
}

/// Bullets live until they reach the cull margin
pub fn bullet_in_play(bullet: &Bullet, arena: &Arena) -> bool {
    arena.contains_with_margin(bullet.pos, BULLET_CULL_MARGIN)
}

pub fn enemy_in_play(enemy: &Enemy, arena: &Arena) -> bool {
    arena.contains_with_margin(enemy.pos, ENEMY_CULL_MARGIN)
}

/// Build a bullet leaving the player's current position along its heading
pub fn fire_bullet(player: &Player, id: u32) -> Bullet {
    Bullet {
        id,
        pos: player.pos,
        vel: heading_vector(player.angle) * BULLET_SPEED,
        owner: player.id,
    }
}
