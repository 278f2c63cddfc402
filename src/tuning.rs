//! Data-driven session configuration
//!
//! Everything an operator might want to rebalance lives here, constructed
//! explicitly and passed into the session at start. Nothing in the simulation
//! reads global state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Tuning for one game session.
///
/// Defaults reproduce the reference balance. Wall-clock values are in
/// seconds; cadences are in simulation frames.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Playfield size in pixels
    pub screen_size: Vec2,

    // === Movement ===
    /// Ship velocity = (pointer - pos) / divisor, per tick
    pub ship_speed_divisor: f32,
    /// Player bullet speed, pixels per tick
    pub bullet_speed: f32,
    /// Asteroid velocity = (aim - spawn_pos) / divisor
    pub asteroid_speed_divisor: f32,
    /// Fragment velocity = parent velocity * this factor (plus jitter)
    pub fragment_speed_factor: f32,

    // === Spawning ===
    /// Spawn one asteroid every N frames
    pub asteroid_spawn_interval: u64,
    /// Spawn an enemy wave every N frames
    pub enemy_spawn_interval: u64,
    /// Spawn one booster every N frames
    pub booster_spawn_interval: u64,
    /// Boosters spawn at least this far from every screen edge
    pub booster_inset: f32,
    /// Score at which the next spawn is a boss instead of a normal wave
    pub score_trigger_start: u32,
    /// Trigger increment applied after each boss spawn
    pub score_trigger_step: u32,

    // === Weapons ===
    /// Seconds between normal shots
    pub normal_fire_interval: f32,
    /// Seconds between explosive shots
    pub explosive_fire_interval: f32,
    /// Explosive rounds granted per ammo pickup
    pub explosive_ammo_per_pickup: u32,

    // === Boosters and abilities ===
    /// Active window granted (and stacked) per timed-booster pickup, seconds
    pub booster_duration: f64,
    /// Fire-interval divisor while rapid fire is active
    pub rapid_fire_multiplier: f32,
    /// Salvo size while multi-shot is active
    pub multi_shot_salvo: u32,
    /// Hit points restored by a heal pickup
    pub heal_amount: f32,
    /// Stasis charge granted per pickup
    pub stasis_charge_per_pickup: f32,
    /// Stasis charge cap
    pub stasis_charge_max: f32,
    /// Stasis charge drained per tick while held
    pub stasis_drain_per_tick: f32,

    // === Health and damage ===
    /// Player hit points at session start
    pub player_max_hp: f32,
    /// Player hitbox, pixels
    pub player_hitbox: (u32, u32),
    /// Post-hit window during which further player damage is ignored, seconds
    pub player_invuln_secs: f64,
    /// Enemy damage-flash window, seconds (visual only)
    pub enemy_flash_secs: f64,
    /// Damage an explosion deals to an enemy per tick of contact
    pub explosion_contact_damage: f32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            screen_size: Vec2::new(1280.0, 720.0),

            ship_speed_divisor: 40.0,
            bullet_speed: 10.0,
            asteroid_speed_divisor: 300.0,
            fragment_speed_factor: 0.5,

            asteroid_spawn_interval: 50,
            enemy_spawn_interval: 700,
            booster_spawn_interval: 400,
            booster_inset: 100.0,
            score_trigger_start: 150,
            score_trigger_step: 150,

            normal_fire_interval: 0.2,
            explosive_fire_interval: 0.5,
            explosive_ammo_per_pickup: 20,

            booster_duration: 10.0,
            rapid_fire_multiplier: 2.0,
            multi_shot_salvo: 3,
            heal_amount: 2.0,
            stasis_charge_per_pickup: 200.0,
            stasis_charge_max: 1000.0,
            stasis_drain_per_tick: 1.0,

            player_max_hp: 5.0,
            player_hitbox: (40, 40),
            player_invuln_secs: 0.3,
            enemy_flash_secs: 0.1,
            explosion_contact_damage: 1.0 / 16.0,
        }
    }
}

impl SessionConfig {
    /// Parse a config from JSON, reporting what went wrong
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Playfield center (player spawn point)
    pub fn screen_center(&self) -> Vec2 {
        self.screen_size / 2.0
    }
}
