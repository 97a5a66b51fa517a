//! Entity storage
//!
//! Owns the player and the ordered bullet/enemy collections. Collections are
//! kept in insertion order, which doubles as id order since ids only grow.

use super::state::{Bullet, Enemy, Player};

#[derive(Debug, Clone)]
pub struct EntityStore {
    player: Player,
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    /// Next entity ID, shared by bullets and enemies
    next_id: u32,
}

impl EntityStore {
    pub fn new(player: Player) -> Self {
        Self {
            player,
            bullets: Vec::new(),
            enemies: Vec::new(),
            next_id: 1,
        }
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn bullets(&self) -> &[Bullet] {
        &self.bullets
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_player(&mut self, player: Player) {
        self.player = player;
    }

    pub fn add_bullet(&mut self, bullet: Bullet) {
        debug_assert!(self.bullets.iter().all(|b| b.id != bullet.id));
        self.bullets.push(bullet);
    }

    pub fn add_enemy(&mut self, enemy: Enemy) {
        debug_assert!(self.enemies.iter().all(|e| e.id != enemy.id));
        self.enemies.push(enemy);
    }

    pub fn set_bullets(&mut self, bullets: Vec<Bullet>) {
        self.bullets = bullets;
    }

    pub fn set_enemies(&mut self, enemies: Vec<Enemy>) {
        self.enemies = enemies;
    }

    /// Drop every bullet matching `predicate`, returning how many went
    pub fn prune_bullets(&mut self, mut predicate: impl FnMut(&Bullet) -> bool) -> usize {
        let before = self.bullets.len();
        self.bullets.retain(|b| !predicate(b));
        before - self.bullets.len()
    }

    /// Drop every enemy matching `predicate`, returning how many went
    pub fn prune_enemies(&mut self, mut predicate: impl FnMut(&Enemy) -> bool) -> usize {
        let before = self.enemies.len();
        self.enemies.retain(|e| !predicate(e));
        before - self.enemies.len()
    }

    /// New-game reset. IDs keep counting so nothing from the old run can alias.
    pub fn reset(&mut self, player: Player) {
        self.player = player;
        self.bullets.clear();
        self.enemies.clear();
    }
}
