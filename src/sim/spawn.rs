//! Spawning policy
//!
//! All spawn cadence is frame-count-based: the counter advances once per
//! simulation tick, so spawn density is deterministic at the fixed tick rate
//! regardless of measured wall-clock frame time. Difficulty escalates with
//! cumulative score, not elapsed time: past the score trigger the enemy
//! spawner switches to boss archetypes and raises the bar.
//!
//! Every spawner is suppressed while stasis is active.

use glam::Vec2;
use rand::Rng;

use crate::consts::SPAWN_MARGIN;
use crate::sim::entities::{
    Asteroid, Booster, BoosterKind, Enemy, EnemyArchetype, SizeClass, StrengthClass,
};
use crate::sim::state::GameState;
use crate::tuning::SessionConfig;

/// Run all frame-gated spawners for this tick
pub fn spawn_tick(state: &mut GameState, pointer: Vec2, now: f64, cfg: &SessionConfig) {
    if state.modifiers.stasis_active() {
        return;
    }

    if state.frame % cfg.asteroid_spawn_interval == 0 {
        cast_asteroid(state, pointer, cfg);
    }

    if state.frame % cfg.enemy_spawn_interval == 0 && state.frame != 0 {
        if state.score < state.score_trigger {
            spawn_enemy_wave(state, StrengthClass::Normal, now, cfg);
        } else {
            spawn_enemy_wave(state, StrengthClass::Boss, now, cfg);
            state.score_trigger += cfg.score_trigger_step;
            log::info!(
                "boss wave at score {}; next trigger {}",
                state.score,
                state.score_trigger
            );
        }
    }

    if state.frame % cfg.booster_spawn_interval == 0 && state.frame != 0 {
        spawn_booster(state, cfg);
    }
}

/// A random position in the off-screen band along one of the four edges
fn edge_position<R: Rng>(rng: &mut R, screen: Vec2) -> Vec2 {
    match rng.random_range(0..4) {
        0 => Vec2::new(-SPAWN_MARGIN, rng.random_range(0.0..screen.y)),
        1 => Vec2::new(screen.x + SPAWN_MARGIN, rng.random_range(0.0..screen.y)),
        2 => Vec2::new(rng.random_range(0.0..screen.x), -SPAWN_MARGIN),
        _ => Vec2::new(rng.random_range(0.0..screen.x), screen.y + SPAWN_MARGIN),
    }
}

/// Spawn one asteroid drifting in from an edge, aimed at the pointer with
/// distance-scaled speed
fn cast_asteroid(state: &mut GameState, aim: Vec2, cfg: &SessionConfig) {
    let id = state.next_entity_id();
    let pos = edge_position(&mut state.rng, cfg.screen_size);
    let size = match state.rng.random_range(0..3) {
        0 => SizeClass::Small,
        1 => SizeClass::Medium,
        _ => SizeClass::Large,
    };
    let vel = (aim - pos) / cfg.asteroid_speed_divisor;
    let spin = state.rng.random_range(-2.0..2.0);
    state.asteroids.push(Asteroid {
        id,
        pos,
        vel,
        size,
        angle: 0.0,
        spin,
    });
}

/// Spawn a wave leader of the requested strength, plus its escort copies
fn spawn_enemy_wave(state: &mut GameState, class: StrengthClass, now: f64, cfg: &SessionConfig) {
    let candidates: Vec<EnemyArchetype> = EnemyArchetype::ALL
        .iter()
        .copied()
        .filter(|a| a.stats().class == class)
        .collect();
    if candidates.is_empty() {
        // A class with no archetypes spawns nothing this wave
        return;
    }
    let archetype = candidates[state.rng.random_range(0..candidates.len())];
    let count = 1 + archetype.stats().escorts;

    for _ in 0..count {
        let id = state.next_entity_id();
        let pos = edge_position(&mut state.rng, cfg.screen_size);
        let jitter = state.rng.random_range(0.5..1.5);
        state.enemies.push(Enemy::new(id, archetype, pos, now, jitter));
    }
}

/// Spawn one booster of a uniformly random kind, inset from the edges so it
/// is always reachable
fn spawn_booster(state: &mut GameState, cfg: &SessionConfig) {
    let id = state.next_entity_id();
    let kind = BoosterKind::ALL[state.rng.random_range(0..BoosterKind::ALL.len())];
    let pos = Vec2::new(
        state
            .rng
            .random_range(cfg.booster_inset..cfg.screen_size.x - cfg.booster_inset),
        state
            .rng
            .random_range(cfg.booster_inset..cfg.screen_size.y - cfg.booster_inset),
    );
    state.boosters.push(Booster { id, kind, pos });
}
