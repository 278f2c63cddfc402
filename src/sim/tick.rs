//! The per-tick simulation pipeline
//!
//! One call to [`tick`] advances a session by exactly one frame, in a fixed
//! order: input, spawners, modifier bookkeeping, movement, collision
//! resolution, terminal check. Collision resolution runs collect-then-remove:
//! kills are recorded in id sets and applied between stages, so an entity
//! removed by one check is never evaluated again in the same pass and no
//! collection is mutated mid-iteration.

use glam::Vec2;

use crate::consts::SPAWN_MARGIN;
use crate::events::GameEvent;
use crate::sim::collision;
use crate::sim::entities::{
    AimMode, Asteroid, Bullet, BulletOwner, Explosion, SizeClass, WeaponKind, salvo_offsets,
};
use crate::sim::spawn::spawn_tick;
use crate::sim::state::{GamePhase, GameState};
use crate::tuning::SessionConfig;

/// Input snapshot for a single tick.
///
/// `now` is the host's monotonic clock; it gates weapon cooldowns and
/// modifier expiries, while spawn cadence counts frames. `switch_weapon` is
/// an edge (one event per key press); the rest are held states.
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    pub now: f64,
    pub pointer: Vec2,
    pub fire_held: bool,
    pub switch_weapon: bool,
    pub stasis_held: bool,
}

/// Advance the session by one frame
pub fn tick(state: &mut GameState, input: &TickInput, cfg: &SessionConfig) {
    if state.phase == GamePhase::GameOver {
        return;
    }

    // (a) input: weapon switching and firing
    handle_input(state, input, cfg);

    // (b) spawners (suppressed under stasis)
    spawn_tick(state, input.pointer, input.now, cfg);

    // (c) modifier bookkeeping: pickups, expiries, ammo depletion, drain
    collect_boosters(state, input.now, cfg);
    state.modifiers.update(
        input.now,
        input.stasis_held,
        cfg,
        &mut state.loadout,
        &mut state.events,
    );

    // (d) movement; the stasis partition freezes everything that is not the
    // player or a player bullet
    update_entities(state, input, cfg);

    // (e) collision resolution, (g) terminal check
    if resolve_collisions(state, input.now, cfg) {
        state.phase = GamePhase::GameOver;
        state.emit(GameEvent::GameOver);
        log::info!(
            "game over: score={} frame={}",
            state.score,
            state.frame
        );
    }

    state.frame += 1;
}

fn handle_input(state: &mut GameState, input: &TickInput, cfg: &SessionConfig) {
    if input.switch_weapon {
        let kind = state.loadout.switch();
        state.emit(GameEvent::WeaponSwitched(kind));
    }

    let cooldown_over = input.now - state.player.last_fire_time
        > state.loadout.effective_fire_interval() as f64;
    if input.fire_held && cooldown_over && state.loadout.active_weapon().ammo.available() {
        fire_player_salvo(state, input, cfg);
    }

    if !state.modifiers.stasis_active() {
        fire_enemy_salvos(state, input);
    }
}

fn fire_player_salvo(state: &mut GameState, input: &TickInput, cfg: &SessionConfig) {
    let kind = state.loadout.active;
    let offsets: Vec<f32> = salvo_offsets(state.loadout.salvo_size).collect();

    state.player.last_fire_time = input.now;
    for offset in offsets {
        let id = state.next_entity_id();
        state.player_bullets.push(Bullet::aimed(
            id,
            state.player.pos,
            input.pointer,
            cfg.bullet_speed,
            offset,
            kind,
            BulletOwner::Player,
        ));
    }
    // One round per trigger pull, regardless of salvo size
    state.loadout.weapon_mut(kind).ammo.consume();
    state.emit(GameEvent::PlayerFired(kind));
}

fn fire_enemy_salvos(state: &mut GameState, input: &TickInput) {
    // Collect salvo specs first; bullets are pushed after the enemy loop
    let mut salvos: Vec<(Vec2, Vec2, f32, u32)> = Vec::new();
    let player_pos = state.player.pos;

    for enemy in &mut state.enemies {
        if input.now < enemy.next_fire_at {
            continue;
        }
        let stats = enemy.archetype.stats();
        enemy.next_fire_at = input.now + stats.fire_interval;
        let target = match stats.aim {
            AimMode::Player => player_pos,
            AimMode::Pointer => input.pointer,
        };
        salvos.push((enemy.pos, target, stats.bullet_speed, stats.salvo));
    }

    for (from, target, speed, count) in salvos {
        let offsets: Vec<f32> = salvo_offsets(count).collect();
        for offset in offsets {
            let id = state.next_entity_id();
            state.enemy_bullets.push(Bullet::aimed(
                id,
                from,
                target,
                speed,
                offset,
                WeaponKind::Normal,
                BulletOwner::Enemy,
            ));
        }
        state.emit(GameEvent::EnemyFired);
    }
}

fn collect_boosters(state: &mut GameState, now: f64, cfg: &SessionConfig) {
    let picked: Vec<(u32, _)> = state
        .boosters
        .iter()
        .filter(|b| collision::booster_hits_player(&state.masks, b, &state.player, cfg))
        .map(|b| (b.id, b.kind))
        .collect();
    if picked.is_empty() {
        return;
    }

    state.boosters.retain(|b| !picked.iter().any(|(id, _)| *id == b.id));
    for (_, kind) in picked {
        state.modifiers.apply_pickup(
            kind,
            now,
            cfg,
            &mut state.loadout,
            &mut state.player,
            &mut state.events,
        );
        state.emit(GameEvent::BoosterPickedUp(kind));
    }
}

fn update_entities(state: &mut GameState, input: &TickInput, cfg: &SessionConfig) {
    state.player.update(input.pointer, cfg);
    for bullet in &mut state.player_bullets {
        bullet.update();
    }

    if state.modifiers.stasis_active() {
        return;
    }

    for bullet in &mut state.enemy_bullets {
        bullet.update();
    }
    for asteroid in &mut state.asteroids {
        asteroid.update(cfg.screen_size, SPAWN_MARGIN);
    }
    state.explosions.retain_mut(|e| e.update());
    let player_pos = state.player.pos;
    for enemy in &mut state.enemies {
        enemy.update(player_pos);
    }
}

/// Resolve every pairwise interaction for this tick, in fixed priority
/// order. Returns true if the player died.
fn resolve_collisions(state: &mut GameState, now: f64, cfg: &SessionConfig) -> bool {
    let screen = cfg.screen_size;
    let mut dead_player_bullets: Vec<u32> = Vec::new();
    let mut dead_enemy_bullets: Vec<u32> = Vec::new();
    let mut dead_asteroids: Vec<u32> = Vec::new();
    let mut dead_enemies: Vec<u32> = Vec::new();
    let mut dead_boosters: Vec<u32> = Vec::new();
    let mut fragments: Vec<(Vec2, Vec2, SizeClass)> = Vec::new();
    let mut detonations: Vec<Vec2> = Vec::new();
    let mut player_died = false;

    // 1-3: player bullets vs bounds, asteroids, enemies
    for i in 0..state.player_bullets.len() {
        let bullet = state.player_bullets[i];

        if collision::out_of_bounds(bullet.pos, screen) {
            dead_player_bullets.push(bullet.id);
            continue;
        }

        let hit_asteroids: Vec<Asteroid> = state
            .asteroids
            .iter()
            .filter(|a| {
                !dead_asteroids.contains(&a.id)
                    && collision::bullet_hits_asteroid(&state.masks, &bullet, a)
            })
            .copied()
            .collect();
        if !hit_asteroids.is_empty() {
            for asteroid in &hit_asteroids {
                dead_asteroids.push(asteroid.id);
                fragments.extend(asteroid.fragments(&mut state.rng, cfg));
                state.score += 1;
                state.events.push(GameEvent::AsteroidDestroyed);
            }
            if bullet.kind == WeaponKind::Explosive {
                detonations.push(bullet.pos);
            }
            dead_player_bullets.push(bullet.id);
            continue;
        }

        let mut bullet_spent = false;
        for enemy in &mut state.enemies {
            if dead_enemies.contains(&enemy.id) {
                continue;
            }
            if collision::bullet_hits_enemy(&state.masks, &bullet, enemy) {
                bullet_spent = true;
                if enemy.damage(1.0, now, cfg) {
                    state.score += enemy.archetype.stats().score_gain;
                    dead_enemies.push(enemy.id);
                    state.events.push(GameEvent::EnemyDestroyed);
                }
            }
        }
        if bullet_spent {
            if bullet.kind == WeaponKind::Explosive {
                detonations.push(bullet.pos);
            }
            dead_player_bullets.push(bullet.id);
        }
    }

    // 4: enemy bullets vs bounds, asteroids, player
    for i in 0..state.enemy_bullets.len() {
        let bullet = state.enemy_bullets[i];

        if collision::out_of_bounds(bullet.pos, screen) {
            dead_enemy_bullets.push(bullet.id);
            continue;
        }

        let hit_asteroids: Vec<Asteroid> = state
            .asteroids
            .iter()
            .filter(|a| {
                !dead_asteroids.contains(&a.id)
                    && collision::bullet_hits_asteroid(&state.masks, &bullet, a)
            })
            .copied()
            .collect();
        if !hit_asteroids.is_empty() {
            // Same fragmentation rule, but hostile fire earns no score
            for asteroid in &hit_asteroids {
                dead_asteroids.push(asteroid.id);
                fragments.extend(asteroid.fragments(&mut state.rng, cfg));
                state.events.push(GameEvent::AsteroidDestroyed);
            }
            dead_enemy_bullets.push(bullet.id);
            continue;
        }

        if collision::bullet_hits_player(&state.masks, &bullet, &state.player, cfg)
            && !state.modifiers.shield_active()
            && !state.player.invulnerable(now)
        {
            player_died |= state.player.damage(1.0, now, cfg);
            state.events.push(GameEvent::PlayerHit);
        }
    }

    // 5: explosions vs asteroids, enemy bullets, enemies, boosters
    for i in 0..state.explosions.len() {
        let explosion = state.explosions[i];

        for asteroid in &state.asteroids {
            if !dead_asteroids.contains(&asteroid.id)
                && collision::explosion_hits_asteroid(&state.masks, &explosion, asteroid)
            {
                // Consumed outright: no fragments from a blast
                dead_asteroids.push(asteroid.id);
                state.score += 1;
                state.events.push(GameEvent::AsteroidDestroyed);
            }
        }

        for bullet in &state.enemy_bullets {
            if !dead_enemy_bullets.contains(&bullet.id)
                && collision::explosion_hits_bullet(&state.masks, &explosion, bullet)
            {
                dead_enemy_bullets.push(bullet.id);
            }
        }

        for enemy in &mut state.enemies {
            if dead_enemies.contains(&enemy.id) {
                continue;
            }
            if collision::explosion_hits_enemy(&state.masks, &explosion, enemy)
                && enemy.damage(cfg.explosion_contact_damage, now, cfg)
            {
                state.score += enemy.archetype.stats().score_gain;
                dead_enemies.push(enemy.id);
                state.events.push(GameEvent::EnemyDestroyed);
            }
        }

        for booster in &state.boosters {
            if !dead_boosters.contains(&booster.id)
                && collision::explosion_hits_booster(&state.masks, &explosion, booster)
            {
                dead_boosters.push(booster.id);
            }
        }
    }

    // 6: asteroids vs player
    let ramming: Vec<u32> = state
        .asteroids
        .iter()
        .filter(|a| {
            !dead_asteroids.contains(&a.id)
                && collision::asteroid_hits_player(&state.masks, a, &state.player, cfg)
        })
        .map(|a| a.id)
        .collect();
    if !ramming.is_empty() {
        if state.modifiers.shield_active() {
            // Shattered harmlessly; a shield block is not a kill, so no score
            dead_asteroids.extend(ramming);
        } else if !state.player.invulnerable(now) {
            player_died |= state.player.damage(1.0, now, cfg);
            state.events.push(GameEvent::PlayerHit);
        }
    }

    // Apply the kill sets, then introduce spawns produced by this pass;
    // fragments and detonations only become collidable next tick
    state
        .player_bullets
        .retain(|b| !dead_player_bullets.contains(&b.id));
    state
        .enemy_bullets
        .retain(|b| !dead_enemy_bullets.contains(&b.id));
    state.asteroids.retain(|a| !dead_asteroids.contains(&a.id));
    state.enemies.retain(|e| !dead_enemies.contains(&e.id));
    state.boosters.retain(|b| !dead_boosters.contains(&b.id));

    for (pos, vel, size) in fragments {
        state.push_fragment(pos, vel, size);
    }
    for pos in detonations {
        let id = state.next_entity_id();
        state.explosions.push(Explosion::new(id, pos));
        state.events.push(GameEvent::BulletDetonated);
    }

    player_died
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::GameEvent;
    use crate::sim::entities::{Booster, BoosterKind, Enemy, EnemyArchetype};

    fn setup() -> (SessionConfig, GameState) {
        let cfg = SessionConfig::default();
        let state = GameState::new(77, &cfg);
        (cfg, state)
    }

    /// Pointer parked on the player so the ship holds still
    fn idle_input(state: &GameState, now: f64) -> TickInput {
        TickInput {
            now,
            pointer: state.player.pos,
            ..Default::default()
        }
    }

    fn asteroid_at(id: u32, pos: Vec2, size: SizeClass) -> Asteroid {
        Asteroid {
            id,
            pos,
            vel: Vec2::ZERO,
            size,
            angle: 0.0,
            spin: 0.0,
        }
    }

    fn bullet_at(id: u32, pos: Vec2, kind: WeaponKind, owner: BulletOwner) -> Bullet {
        Bullet {
            id,
            pos,
            vel: Vec2::ZERO,
            heading: 0.0,
            kind,
            owner,
        }
    }

    #[test]
    fn test_resolution_with_no_overlaps_is_idempotent() {
        let (cfg, mut state) = setup();
        state
            .asteroids
            .push(asteroid_at(100, Vec2::new(100.0, 100.0), SizeClass::Large));
        state.enemies.push(Enemy::new(
            101,
            EnemyArchetype::Raider,
            Vec2::new(1000.0, 100.0),
            0.0,
            0.0,
        ));
        state.player_bullets.push(bullet_at(
            102,
            Vec2::new(500.0, 500.0),
            WeaponKind::Normal,
            BulletOwner::Player,
        ));

        let before = state.clone();
        let died = resolve_collisions(&mut state, 1.0, &cfg);
        assert!(!died);
        assert_eq!(state.score, before.score);
        assert_eq!(state.asteroids, before.asteroids);
        assert_eq!(state.enemies, before.enemies);
        assert_eq!(state.player_bullets, before.player_bullets);
        assert_eq!(state.player, before.player);
    }

    #[test]
    fn test_bullet_at_screen_edge_is_removed() {
        let (cfg, mut state) = setup();
        state.player_bullets.push(bullet_at(
            1,
            Vec2::new(cfg.screen_size.x, 300.0),
            WeaponKind::Normal,
            BulletOwner::Player,
        ));
        resolve_collisions(&mut state, 1.0, &cfg);
        assert!(state.player_bullets.is_empty());
    }

    #[test]
    fn test_bullet_fragments_asteroid_and_scores() {
        let (cfg, mut state) = setup();
        let pos = Vec2::new(300.0, 300.0);
        state.asteroids.push(asteroid_at(1, pos, SizeClass::Large));
        state
            .player_bullets
            .push(bullet_at(2, pos, WeaponKind::Normal, BulletOwner::Player));

        resolve_collisions(&mut state, 1.0, &cfg);

        assert_eq!(state.score, 1);
        assert!(state.player_bullets.is_empty());
        // Large shatters into exactly two mediums
        assert_eq!(state.asteroids.len(), 2);
        assert!(
            state
                .asteroids
                .iter()
                .all(|a| a.size == SizeClass::Medium)
        );
    }

    #[test]
    fn test_fragments_are_not_hit_in_the_same_pass() {
        let (cfg, mut state) = setup();
        let pos = Vec2::new(300.0, 300.0);
        state.asteroids.push(asteroid_at(1, pos, SizeClass::Medium));
        // Two overlapping bullets: the first shatters the asteroid; the
        // second must fly on through where the fragments will appear
        state
            .player_bullets
            .push(bullet_at(2, pos, WeaponKind::Normal, BulletOwner::Player));
        state
            .player_bullets
            .push(bullet_at(3, pos, WeaponKind::Normal, BulletOwner::Player));

        resolve_collisions(&mut state, 1.0, &cfg);

        assert_eq!(state.score, 1);
        assert_eq!(state.asteroids.len(), 3);
        assert_eq!(state.player_bullets.len(), 1);
    }

    #[test]
    fn test_three_hits_kill_raider_and_award_its_score() {
        let (cfg, mut state) = setup();
        let pos = Vec2::new(300.0, 300.0);
        state
            .enemies
            .push(Enemy::new(1, EnemyArchetype::Raider, pos, 0.0, 0.0));

        for hit in 0..3u32 {
            let id = state.next_entity_id();
            state
                .player_bullets
                .push(bullet_at(id, pos, WeaponKind::Normal, BulletOwner::Player));
            resolve_collisions(&mut state, hit as f64, &cfg);
        }

        assert!(state.enemies.is_empty());
        assert_eq!(state.score, EnemyArchetype::Raider.stats().score_gain);
    }

    #[test]
    fn test_explosive_bullet_detonates_on_asteroid() {
        let (cfg, mut state) = setup();
        let pos = Vec2::new(300.0, 300.0);
        state.asteroids.push(asteroid_at(1, pos, SizeClass::Small));
        state
            .player_bullets
            .push(bullet_at(2, pos, WeaponKind::Explosive, BulletOwner::Player));

        resolve_collisions(&mut state, 1.0, &cfg);

        assert_eq!(state.explosions.len(), 1);
        assert!(state.events.contains(&GameEvent::BulletDetonated));
    }

    #[test]
    fn test_explosion_consumes_asteroid_without_fragments() {
        let (cfg, mut state) = setup();
        let pos = Vec2::new(300.0, 300.0);
        state.asteroids.push(asteroid_at(1, pos, SizeClass::Large));
        let id = state.next_entity_id();
        state.explosions.push(Explosion::new(id, pos));

        resolve_collisions(&mut state, 1.0, &cfg);

        // Destroyed outright: +1 score and no fragments, unlike a bullet kill
        assert!(state.asteroids.is_empty());
        assert_eq!(state.score, 1);
    }

    #[test]
    fn test_explosion_wears_enemy_down_fractionally() {
        let (cfg, mut state) = setup();
        let pos = Vec2::new(300.0, 300.0);
        state
            .enemies
            .push(Enemy::new(1, EnemyArchetype::Swarmer, pos, 0.0, 0.0));
        let id = state.next_entity_id();
        state.explosions.push(Explosion::new(id, pos));

        // Swarmer has 1.0 hp; at 1/16 per tick it takes 16 contact ticks
        for t in 0..15 {
            resolve_collisions(&mut state, t as f64 * 0.016, &cfg);
            assert_eq!(state.enemies.len(), 1, "died early at tick {t}");
        }
        resolve_collisions(&mut state, 0.3, &cfg);
        assert!(state.enemies.is_empty());
        assert_eq!(state.score, EnemyArchetype::Swarmer.stats().score_gain);
    }

    #[test]
    fn test_enemy_bullet_fragments_asteroid_without_score() {
        let (cfg, mut state) = setup();
        let pos = Vec2::new(300.0, 300.0);
        state.asteroids.push(asteroid_at(1, pos, SizeClass::Medium));
        state
            .enemy_bullets
            .push(bullet_at(2, pos, WeaponKind::Normal, BulletOwner::Enemy));

        resolve_collisions(&mut state, 1.0, &cfg);

        assert_eq!(state.score, 0);
        assert!(state.enemy_bullets.is_empty());
        assert_eq!(state.asteroids.len(), 3);
    }

    #[test]
    fn test_shield_blocks_asteroid_without_score_or_damage() {
        let (cfg, mut state) = setup();
        let hp_before = state.player.hp;
        state.modifiers.apply_pickup(
            BoosterKind::Shield,
            1.0,
            &cfg,
            &mut state.loadout,
            &mut state.player,
            &mut state.events,
        );

        state
            .asteroids
            .push(asteroid_at(1, state.player.pos, SizeClass::Large));
        resolve_collisions(&mut state, 1.5, &cfg);

        assert!(state.asteroids.is_empty());
        assert_eq!(state.player.hp, hp_before);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_unshielded_asteroid_hit_damages_once_per_window() {
        let (cfg, mut state) = setup();
        let hp_before = state.player.hp;
        state
            .asteroids
            .push(asteroid_at(1, state.player.pos, SizeClass::Large));

        resolve_collisions(&mut state, 1.0, &cfg);
        assert_eq!(state.player.hp, hp_before - 1.0);
        assert_eq!(state.asteroids.len(), 1, "ramming asteroid survives");

        // Still inside the invulnerability window: no further damage
        resolve_collisions(&mut state, 1.1, &cfg);
        assert_eq!(state.player.hp, hp_before - 1.0);

        // Window expired: the same asteroid connects again
        resolve_collisions(&mut state, 1.0 + cfg.player_invuln_secs + 0.1, &cfg);
        assert_eq!(state.player.hp, hp_before - 2.0);
    }

    #[test]
    fn test_player_death_transitions_to_game_over() {
        let (cfg, mut state) = setup();
        state.player.hp = 1.0;
        state
            .asteroids
            .push(asteroid_at(1, state.player.pos, SizeClass::Large));

        let input = idle_input(&state, 1.0);
        tick(&mut state, &input, &cfg);

        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events.contains(&GameEvent::GameOver));

        // A terminal session ignores further ticks
        let frame = state.frame;
        let input = idle_input(&state, 2.0);
        tick(&mut state, &input, &cfg);
        assert_eq!(state.frame, frame);
    }

    #[test]
    fn test_stasis_freezes_world_but_not_player_bullets() {
        let (cfg, mut state) = setup();
        state.modifiers.stasis.charge = 100.0;

        let far = Vec2::new(900.0, 600.0);
        state.asteroids.push(Asteroid {
            vel: Vec2::new(3.0, 0.0),
            ..asteroid_at(1, far, SizeClass::Medium)
        });
        state
            .enemies
            .push(Enemy::new(2, EnemyArchetype::Raider, Vec2::new(50.0, 50.0), 0.0, 0.0));
        state.player_bullets.push(Bullet {
            vel: Vec2::new(10.0, 0.0),
            ..bullet_at(3, Vec2::new(100.0, 400.0), WeaponKind::Normal, BulletOwner::Player)
        });

        let asteroid_pos = state.asteroids[0].pos;
        let enemy_pos = state.enemies[0].pos;
        let bullet_pos = state.player_bullets[0].pos;

        let input = TickInput {
            stasis_held: true,
            ..idle_input(&state, 1.0)
        };
        tick(&mut state, &input, &cfg);

        assert!(state.modifiers.stasis_active());
        assert_eq!(state.asteroids[0].pos, asteroid_pos);
        assert_eq!(state.enemies[0].pos, enemy_pos);
        assert_ne!(state.player_bullets[0].pos, bullet_pos);
    }

    #[test]
    fn test_fire_rate_limits_salvos() {
        let (cfg, mut state) = setup();
        // Aim somewhere fixed, hold the trigger for a simulated second
        for frame in 0..60u64 {
            let input = TickInput {
                now: frame as f64 / 60.0,
                pointer: Vec2::new(1000.0, 360.0),
                fire_held: true,
                ..Default::default()
            };
            tick(&mut state, &input, &cfg);
        }
        // Strict 0.2 s cooldown across one second of holding: shots land at
        // t > 0.2, 0.4167, 0.65, 0.8667 - four salvos before t reaches 1.0
        let fired = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::PlayerFired(_)))
            .count();
        assert_eq!(fired, 4);
    }

    #[test]
    fn test_multi_shot_salvo_fires_three_bullets() {
        let (cfg, mut state) = setup();
        state.loadout.salvo_size = 3;
        let input = TickInput {
            now: 1.0,
            pointer: Vec2::new(1000.0, 360.0),
            fire_held: true,
            ..Default::default()
        };
        tick(&mut state, &input, &cfg);
        assert_eq!(state.player_bullets.len(), 3);
        // Outermost bullets diverge symmetrically from the middle one
        let headings: Vec<f32> = state.player_bullets.iter().map(|b| b.heading).collect();
        assert!((headings[0] - headings[1]).abs() > 1.0);
        assert!((headings[2] - headings[1]).abs() > 1.0);
    }

    #[test]
    fn test_explosive_rounds_deplete_and_block_firing() {
        let (cfg, mut state) = setup();
        state.loadout.explosive.ammo = crate::sim::state::Ammo::Count(1);
        state.loadout.active = WeaponKind::Explosive;

        let input = TickInput {
            now: 1.0,
            pointer: Vec2::new(1000.0, 360.0),
            fire_held: true,
            ..Default::default()
        };
        tick(&mut state, &input, &cfg);
        assert_eq!(state.player_bullets.len(), 1);
        assert_eq!(state.loadout.explosive.ammo.count(), Some(0));

        // Dry weapon reverted to normal by the modifier manager
        assert_eq!(state.loadout.active, WeaponKind::Normal);
    }

    #[test]
    fn test_booster_pickup_is_consumed() {
        let (cfg, mut state) = setup();
        let id = state.next_entity_id();
        state.boosters.push(Booster {
            id,
            kind: BoosterKind::Heal,
            pos: state.player.pos,
        });
        state.player.hp = 2.0;

        let input = idle_input(&state, 1.0);
        tick(&mut state, &input, &cfg);

        assert!(state.boosters.is_empty());
        assert_eq!(state.player.hp, 2.0 + cfg.heal_amount);
        assert!(
            state
                .drain_events()
                .contains(&GameEvent::BoosterPickedUp(BoosterKind::Heal))
        );
    }

    #[test]
    fn test_enemy_fires_after_its_cooldown() {
        let (cfg, mut state) = setup();
        let mut enemy = Enemy::new(1, EnemyArchetype::Raider, Vec2::new(200.0, 200.0), 0.0, 0.0);
        enemy.next_fire_at = 1.0;
        state.enemies.push(enemy);

        let early = idle_input(&state, 0.5);
        tick(&mut state, &early, &cfg);
        assert!(state.enemy_bullets.is_empty());

        let late = idle_input(&state, 1.2);
        tick(&mut state, &late, &cfg);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemy_bullets[0].owner, BulletOwner::Enemy);
    }

    #[test]
    fn test_dreadnought_fires_a_seven_bullet_spread() {
        let (cfg, mut state) = setup();
        let mut enemy = Enemy::new(
            1,
            EnemyArchetype::Dreadnought,
            Vec2::new(200.0, 200.0),
            0.0,
            0.0,
        );
        enemy.next_fire_at = 0.5;
        state.enemies.push(enemy);

        let input = idle_input(&state, 1.0);
        tick(&mut state, &input, &cfg);
        assert_eq!(state.enemy_bullets.len(), 7);
    }
}
