//! Pairwise hit tests
//!
//! Pure predicates consumed by the tick's resolution pass. All shape tests
//! go through the sprite masks in [`MaskTable`]; a footprint missing from
//! the table reads as a miss, never a fault.

use glam::Vec2;

use crate::sim::entities::{Asteroid, Booster, Bullet, Enemy, Explosion, Ship};
use crate::sim::mask::masks_collide;
use crate::sim::state::MaskTable;
use crate::tuning::SessionConfig;
use crate::consts::{BOOSTER_SIZE, EXPLOSION_SIZE};

/// Whether a bullet position has left the playfield.
///
/// The upper boundary is inclusive: a bullet exactly at `screen.x` is out.
/// The lower boundary is strict, so a bullet at 0 is still in play.
pub fn out_of_bounds(pos: Vec2, screen: Vec2) -> bool {
    pos.x >= screen.x || pos.y >= screen.y || pos.x < 0.0 || pos.y < 0.0
}

fn pair(masks: &MaskTable, a: (u32, u32), a_pos: Vec2, b: (u32, u32), b_pos: Vec2) -> bool {
    match (masks.get(a), masks.get(b)) {
        (Some(ma), Some(mb)) => masks_collide(ma, a_pos, mb, b_pos),
        _ => false,
    }
}

pub fn bullet_hits_asteroid(masks: &MaskTable, bullet: &Bullet, asteroid: &Asteroid) -> bool {
    match masks.bullet_mask(bullet.kind) {
        Some(mb) => match masks.get(asteroid.size.hitbox()) {
            Some(ma) => masks_collide(mb, bullet.pos, ma, asteroid.pos),
            None => false,
        },
        None => false,
    }
}

pub fn bullet_hits_enemy(masks: &MaskTable, bullet: &Bullet, enemy: &Enemy) -> bool {
    match (masks.bullet_mask(bullet.kind), masks.get(enemy.archetype.stats().hitbox)) {
        (Some(mb), Some(me)) => masks_collide(mb, bullet.pos, me, enemy.pos),
        _ => false,
    }
}

pub fn bullet_hits_player(
    masks: &MaskTable,
    bullet: &Bullet,
    player: &Ship,
    cfg: &SessionConfig,
) -> bool {
    match (masks.bullet_mask(bullet.kind), masks.get(cfg.player_hitbox)) {
        (Some(mb), Some(mp)) => masks_collide(mb, bullet.pos, mp, player.pos),
        _ => false,
    }
}

pub fn asteroid_hits_player(
    masks: &MaskTable,
    asteroid: &Asteroid,
    player: &Ship,
    cfg: &SessionConfig,
) -> bool {
    pair(
        masks,
        asteroid.size.hitbox(),
        asteroid.pos,
        cfg.player_hitbox,
        player.pos,
    )
}

pub fn booster_hits_player(
    masks: &MaskTable,
    booster: &Booster,
    player: &Ship,
    cfg: &SessionConfig,
) -> bool {
    pair(masks, BOOSTER_SIZE, booster.pos, cfg.player_hitbox, player.pos)
}

pub fn explosion_hits_asteroid(
    masks: &MaskTable,
    explosion: &Explosion,
    asteroid: &Asteroid,
) -> bool {
    pair(
        masks,
        EXPLOSION_SIZE,
        explosion.pos,
        asteroid.size.hitbox(),
        asteroid.pos,
    )
}

pub fn explosion_hits_enemy(masks: &MaskTable, explosion: &Explosion, enemy: &Enemy) -> bool {
    pair(
        masks,
        EXPLOSION_SIZE,
        explosion.pos,
        enemy.archetype.stats().hitbox,
        enemy.pos,
    )
}

pub fn explosion_hits_bullet(masks: &MaskTable, explosion: &Explosion, bullet: &Bullet) -> bool {
    match (masks.get(EXPLOSION_SIZE), masks.bullet_mask(bullet.kind)) {
        (Some(me), Some(mb)) => masks_collide(me, explosion.pos, mb, bullet.pos),
        _ => false,
    }
}

pub fn explosion_hits_booster(masks: &MaskTable, explosion: &Explosion, booster: &Booster) -> bool {
    pair(
        masks,
        EXPLOSION_SIZE,
        explosion.pos,
        BOOSTER_SIZE,
        booster.pos,
    )
}
