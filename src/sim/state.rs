//! Session state
//!
//! Everything one game session owns lives in `GameState`: the player, the
//! entity collections, the weapon loadout, the modifier timers, the seeded
//! RNG, and the frame counter. Two timebases coexist deliberately: spawn
//! cadence counts frames, while weapon cooldowns and booster expiries read
//! the monotonic clock the host supplies each tick.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{BOOSTER_SIZE, BULLET_SIZE, EXPLOSION_SIZE, EXPLOSIVE_BULLET_SIZE};
use crate::events::GameEvent;
use crate::sim::entities::{
    Asteroid, Booster, Bullet, Enemy, EnemyArchetype, Explosion, Ship, SizeClass, WeaponKind,
};
use crate::sim::mask::Mask;
use crate::sim::modifiers::Modifiers;
use crate::tuning::SessionConfig;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Running,
    /// Terminal; the host constructs a fresh session to play again
    GameOver,
}

/// Ammo supply for one weapon
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Ammo {
    Infinite,
    Count(u32),
}

impl Ammo {
    pub fn available(&self) -> bool {
        match self {
            Ammo::Infinite => true,
            Ammo::Count(n) => *n > 0,
        }
    }

    /// Consume one round; counted ammo saturates at zero
    pub fn consume(&mut self) {
        if let Ammo::Count(n) = self {
            *n = n.saturating_sub(1);
        }
    }

    pub fn add(&mut self, amount: u32) {
        if let Ammo::Count(n) = self {
            *n += amount;
        }
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            Ammo::Infinite => None,
            Ammo::Count(n) => Some(*n),
        }
    }
}

/// One weapon slot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Weapon {
    pub kind: WeaponKind,
    pub ammo: Ammo,
    /// Base seconds between shots, before rapid-fire scaling
    pub fire_interval: f32,
}

/// The player's weapons and firing posture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Loadout {
    pub normal: Weapon,
    pub explosive: Weapon,
    pub active: WeaponKind,
    /// Bullets per salvo (raised to the multi-shot count while boosted)
    pub salvo_size: u32,
    /// Multiplier on the base fire interval. Rapid fire divides this on
    /// activation and multiplies it back on expiry; the pair must stay exact
    /// inverses so repeated cycles cannot drift the rate.
    pub fire_interval_scale: f32,
}

impl Loadout {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            normal: Weapon {
                kind: WeaponKind::Normal,
                ammo: Ammo::Infinite,
                fire_interval: cfg.normal_fire_interval,
            },
            explosive: Weapon {
                kind: WeaponKind::Explosive,
                ammo: Ammo::Count(0),
                fire_interval: cfg.explosive_fire_interval,
            },
            active: WeaponKind::Normal,
            salvo_size: 1,
            fire_interval_scale: 1.0,
        }
    }

    pub fn weapon(&self, kind: WeaponKind) -> &Weapon {
        match kind {
            WeaponKind::Normal => &self.normal,
            WeaponKind::Explosive => &self.explosive,
        }
    }

    pub fn weapon_mut(&mut self, kind: WeaponKind) -> &mut Weapon {
        match kind {
            WeaponKind::Normal => &mut self.normal,
            WeaponKind::Explosive => &mut self.explosive,
        }
    }

    pub fn active_weapon(&self) -> &Weapon {
        self.weapon(self.active)
    }

    /// Seconds between shots for the active weapon, after scaling
    pub fn effective_fire_interval(&self) -> f32 {
        self.active_weapon().fire_interval * self.fire_interval_scale
    }

    /// Cycle to the next weapon slot
    pub fn switch(&mut self) -> WeaponKind {
        self.active = match self.active {
            WeaponKind::Normal => WeaponKind::Explosive,
            WeaponKind::Explosive => WeaponKind::Normal,
        };
        self.active
    }
}

/// Precomputed sprite masks for every footprint the session can produce.
///
/// Rebuilt (not serialized) because masks are derived data; call
/// [`GameState::rebuild_masks`] after deserializing a session.
#[derive(Debug, Clone, Default)]
pub struct MaskTable {
    entries: Vec<((u32, u32), Mask)>,
}

impl MaskTable {
    pub fn new(cfg: &SessionConfig) -> Self {
        let mut sizes = vec![
            cfg.player_hitbox,
            BULLET_SIZE,
            EXPLOSIVE_BULLET_SIZE,
            BOOSTER_SIZE,
            EXPLOSION_SIZE,
        ];
        sizes.extend(
            [SizeClass::Small, SizeClass::Medium, SizeClass::Large]
                .iter()
                .map(|s| s.hitbox()),
        );
        sizes.extend(EnemyArchetype::ALL.iter().map(|a| a.stats().hitbox));
        sizes.sort_unstable();
        sizes.dedup();

        Self {
            entries: sizes
                .into_iter()
                .map(|(w, h)| ((w, h), Mask::ellipse(w, h)))
                .collect(),
        }
    }

    /// Mask for a footprint. A size missing from the table (possible only if
    /// a catalog changes without a rebuild) reads as no mask, which collision
    /// code treats as a miss rather than a fault.
    pub fn get(&self, size: (u32, u32)) -> Option<&Mask> {
        self.entries.iter().find(|(s, _)| *s == size).map(|(_, m)| m)
    }

    pub fn bullet_mask(&self, kind: WeaponKind) -> Option<&Mask> {
        match kind {
            WeaponKind::Normal => self.get(BULLET_SIZE),
            WeaponKind::Explosive => self.get(EXPLOSIVE_BULLET_SIZE),
        }
    }
}

fn skipped_rng() -> Pcg32 {
    Pcg32::seed_from_u64(0)
}

/// Complete state of one session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Session seed, for reproducing a run together with the input trace
    pub seed: u64,
    #[serde(skip, default = "skipped_rng")]
    pub rng: Pcg32,
    /// Simulation frame counter; drives spawn cadence
    pub frame: u64,
    pub phase: GamePhase,
    pub score: u32,
    /// Score at which the next enemy spawn escalates to a boss
    pub score_trigger: u32,

    pub player: Ship,
    pub loadout: Loadout,
    pub modifiers: Modifiers,

    pub enemies: Vec<Enemy>,
    pub player_bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<Bullet>,
    pub asteroids: Vec<Asteroid>,
    pub boosters: Vec<Booster>,
    pub explosions: Vec<Explosion>,

    /// Events produced this tick, drained by the host
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    #[serde(skip)]
    pub masks: MaskTable,

    next_id: u32,
}

impl GameState {
    /// Construct a fresh session
    pub fn new(seed: u64, cfg: &SessionConfig) -> Self {
        log::info!("new session: seed={seed}");
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            frame: 0,
            phase: GamePhase::Running,
            score: 0,
            score_trigger: cfg.score_trigger_start,
            player: Ship::new(cfg),
            loadout: Loadout::new(cfg),
            modifiers: Modifiers::default(),
            enemies: Vec::new(),
            player_bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            asteroids: Vec::new(),
            boosters: Vec::new(),
            explosions: Vec::new(),
            events: Vec::new(),
            masks: MaskTable::new(cfg),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Regenerate derived mask data after deserialization
    pub fn rebuild_masks(&mut self, cfg: &SessionConfig) {
        self.masks = MaskTable::new(cfg);
    }

    /// Take this tick's events, leaving the queue empty
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Queue an event for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Queue a spawned asteroid fragment, assigning it an id
    pub fn push_fragment(&mut self, pos: Vec2, vel: Vec2, size: SizeClass) {
        use rand::Rng;
        let id = self.next_entity_id();
        let spin = self.rng.random_range(-2.0..2.0);
        self.asteroids.push(Asteroid {
            id,
            pos,
            vel,
            size,
            angle: 0.0,
            spin,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_ids_are_unique_and_increasing() {
        let cfg = SessionConfig::default();
        let mut state = GameState::new(1, &cfg);
        let a = state.next_entity_id();
        let b = state.next_entity_id();
        assert!(b > a);
    }

    #[test]
    fn test_loadout_switch_cycles() {
        let cfg = SessionConfig::default();
        let mut loadout = Loadout::new(&cfg);
        assert_eq!(loadout.active, WeaponKind::Normal);
        assert_eq!(loadout.switch(), WeaponKind::Explosive);
        assert_eq!(loadout.switch(), WeaponKind::Normal);
    }

    #[test]
    fn test_counted_ammo_saturates_at_zero() {
        let mut ammo = Ammo::Count(1);
        ammo.consume();
        ammo.consume();
        assert_eq!(ammo.count(), Some(0));
        assert!(!ammo.available());
        assert!(Ammo::Infinite.available());
    }

    #[test]
    fn test_mask_table_covers_all_catalog_footprints() {
        let cfg = SessionConfig::default();
        let table = MaskTable::new(&cfg);
        assert!(table.get(cfg.player_hitbox).is_some());
        for size in [SizeClass::Small, SizeClass::Medium, SizeClass::Large] {
            assert!(table.get(size.hitbox()).is_some());
        }
        for archetype in EnemyArchetype::ALL {
            assert!(table.get(archetype.stats().hitbox).is_some());
        }
        assert!(table.bullet_mask(WeaponKind::Normal).is_some());
        assert!(table.bullet_mask(WeaponKind::Explosive).is_some());
    }

    #[test]
    fn test_state_serde_roundtrip_then_mask_rebuild() {
        let cfg = SessionConfig::default();
        let mut state = GameState::new(9, &cfg);
        state.score = 42;
        let json = serde_json::to_string(&state).unwrap();
        let mut back: GameState = serde_json::from_str(&json).unwrap();
        assert_eq!(back.score, 42);
        assert_eq!(back.seed, 9);
        // Masks are derived data and come back empty until rebuilt
        assert!(back.masks.get(cfg.player_hitbox).is_none());
        back.rebuild_masks(&cfg);
        assert!(back.masks.get(cfg.player_hitbox).is_some());
    }
}
