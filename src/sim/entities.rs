//! Game entities and their catalogs
//!
//! Every entity is a small plain struct: a position, a velocity or steering
//! rule, and whatever bookkeeping its lifecycle needs. Catalog data (enemy
//! archetypes, booster kinds, asteroid size classes) lives in closed enums so
//! dispatch is a `match`, not a string lookup.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::{EXPLOSION_FRAMES, SPREAD_HALF_ANGLE_DEG};
use crate::tuning::SessionConfig;
use crate::{bearing_deg, normalize_or_default, rotate_deg};

/// The player's ship. Steers toward the pointer with rubber-band damping:
/// velocity is proportional to cursor distance, so there is no terminal
/// velocity and the ship never quite catches a moving cursor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ship {
    pub pos: Vec2,
    /// Sprite rotation, degrees (visual only)
    pub heading: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Further damage is ignored until this timestamp
    pub invulnerable_until: f64,
    /// Timestamp of the most recent shot, for cooldown gating
    pub last_fire_time: f64,
}

impl Ship {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            pos: cfg.screen_center(),
            heading: 0.0,
            hp: cfg.player_max_hp,
            max_hp: cfg.player_max_hp,
            invulnerable_until: 0.0,
            last_fire_time: 0.0,
        }
    }

    /// Advance one tick toward the pointer
    pub fn update(&mut self, pointer: Vec2, cfg: &SessionConfig) {
        let velocity = (pointer - self.pos) / cfg.ship_speed_divisor;
        self.pos += velocity;
        self.heading = bearing_deg(self.pos, pointer);
    }

    /// Whether the post-hit invulnerability window is open
    pub fn invulnerable(&self, now: f64) -> bool {
        now < self.invulnerable_until
    }

    /// Apply damage, arm the invulnerability window, report death
    pub fn damage(&mut self, amount: f32, now: f64, cfg: &SessionConfig) -> bool {
        self.hp -= amount;
        self.invulnerable_until = now + cfg.player_invuln_secs;
        self.hp <= 0.0
    }

    /// Restore hit points, capped at the maximum
    pub fn heal(&mut self, amount: f32) {
        self.hp = (self.hp + amount).min(self.max_hp);
    }
}

/// Enemy strength class, used by the score-gated spawner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StrengthClass {
    Normal,
    Boss,
}

/// What an enemy leads its shots with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AimMode {
    /// Fires at the player's ship
    Player,
    /// Fires at the pointer, denying the dodge-by-cursor trick
    Pointer,
}

/// Fixed stats for one enemy archetype
#[derive(Debug, Clone, Copy)]
pub struct ArchetypeStats {
    pub hitbox: (u32, u32),
    pub hp: f32,
    /// Seconds between salvos
    pub fire_interval: f64,
    /// Bullets per salvo
    pub salvo: u32,
    /// Pixels per tick toward the player
    pub speed: f32,
    pub score_gain: u32,
    pub class: StrengthClass,
    /// Extra copies spawned alongside the leader
    pub escorts: u32,
    /// Bullet speed, pixels per tick
    pub bullet_speed: f32,
    pub aim: AimMode,
}

/// The closed enemy catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyArchetype {
    /// Mid-line fighter that arrives with a pair of escorts
    Raider,
    /// Fast, fragile, and numerous
    Swarmer,
    /// Slow boss with a wide seven-bullet spread
    Dreadnought,
    /// Boss that snipes the pointer at high velocity
    Hunter,
}

impl EnemyArchetype {
    pub const ALL: [EnemyArchetype; 4] = [
        EnemyArchetype::Raider,
        EnemyArchetype::Swarmer,
        EnemyArchetype::Dreadnought,
        EnemyArchetype::Hunter,
    ];

    pub fn stats(&self) -> ArchetypeStats {
        match self {
            EnemyArchetype::Raider => ArchetypeStats {
                hitbox: (35, 40),
                hp: 3.0,
                fire_interval: 1.5,
                salvo: 1,
                speed: 1.0,
                score_gain: 2,
                class: StrengthClass::Normal,
                escorts: 2,
                bullet_speed: 5.0,
                aim: AimMode::Player,
            },
            EnemyArchetype::Swarmer => ArchetypeStats {
                hitbox: (20, 20),
                hp: 1.0,
                fire_interval: 2.0,
                salvo: 1,
                speed: 2.0,
                score_gain: 1,
                class: StrengthClass::Normal,
                escorts: 5,
                bullet_speed: 5.0,
                aim: AimMode::Player,
            },
            EnemyArchetype::Dreadnought => ArchetypeStats {
                hitbox: (80, 80),
                hp: 30.0,
                fire_interval: 2.0,
                salvo: 7,
                speed: 0.5,
                score_gain: 10,
                class: StrengthClass::Boss,
                escorts: 0,
                bullet_speed: 2.0,
                aim: AimMode::Player,
            },
            EnemyArchetype::Hunter => ArchetypeStats {
                hitbox: (40, 40),
                hp: 5.0,
                fire_interval: 0.5,
                salvo: 1,
                speed: 1.0,
                score_gain: 10,
                class: StrengthClass::Boss,
                escorts: 0,
                bullet_speed: 10.0,
                aim: AimMode::Pointer,
            },
        }
    }
}

/// A hostile ship steering straight at the player
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub archetype: EnemyArchetype,
    pub pos: Vec2,
    pub heading: f32,
    pub hp: f32,
    pub max_hp: f32,
    /// Damage-flash window end (visual only, does not gate damage)
    pub flash_until: f64,
    /// Earliest timestamp of the next salvo
    pub next_fire_at: f64,
}

impl Enemy {
    pub fn new(id: u32, archetype: EnemyArchetype, pos: Vec2, now: f64, jitter: f64) -> Self {
        let stats = archetype.stats();
        Self {
            id,
            archetype,
            pos,
            heading: 0.0,
            hp: stats.hp,
            max_hp: stats.hp,
            flash_until: 0.0,
            next_fire_at: now + stats.fire_interval + jitter,
        }
    }

    /// Advance one tick: constant-speed pursuit of the player
    pub fn update(&mut self, player_pos: Vec2) {
        let dir = normalize_or_default(player_pos - self.pos);
        self.pos += dir * self.archetype.stats().speed;
        self.heading = bearing_deg(self.pos, player_pos);
    }

    /// Apply damage, arm the flash window, report whether the enemy died
    pub fn damage(&mut self, amount: f32, now: f64, cfg: &SessionConfig) -> bool {
        self.hp -= amount;
        self.flash_until = now + cfg.enemy_flash_secs;
        self.hp <= 0.0
    }
}

/// Who fired a bullet, selecting which collision rules apply to it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BulletOwner {
    Player,
    Enemy,
}

/// Bullet payload kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeaponKind {
    Normal,
    Explosive,
}

/// A projectile. Velocity is fixed at creation; there is no homing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bullet {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub heading: f32,
    pub kind: WeaponKind,
    pub owner: BulletOwner,
}

impl Bullet {
    /// Aim a bullet from `pos` toward `target`, rotated by `angle_offset`
    /// degrees for spread shots. A degenerate direction (target on top of the
    /// firer) falls back to the default heading instead of producing NaN.
    pub fn aimed(
        id: u32,
        pos: Vec2,
        target: Vec2,
        speed: f32,
        angle_offset: f32,
        kind: WeaponKind,
        owner: BulletOwner,
    ) -> Self {
        let dir = rotate_deg(target - pos, angle_offset);
        Self {
            id,
            pos,
            vel: normalize_or_default(dir) * speed,
            heading: bearing_deg(pos, target) - angle_offset,
            kind,
            owner,
        }
    }

    pub fn update(&mut self) {
        self.pos += self.vel;
    }
}

/// Spread offsets for an N-bullet salvo: evenly spaced over the spread
/// window, minimum first; a single bullet flies straight.
pub fn salvo_offsets(count: u32) -> impl Iterator<Item = f32> {
    let span = 2.0 * SPREAD_HALF_ANGLE_DEG;
    (0..count).map(move |i| {
        if count == 1 {
            0.0
        } else {
            -SPREAD_HALF_ANGLE_DEG + span / (count - 1) as f32 * i as f32
        }
    })
}

/// Asteroid size class. Only large and medium asteroids fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeClass {
    Small,
    Medium,
    Large,
}

impl SizeClass {
    pub fn hitbox(&self) -> (u32, u32) {
        match self {
            SizeClass::Small => (10, 10),
            SizeClass::Medium => (40, 40),
            SizeClass::Large => (105, 105),
        }
    }

    /// Fragment rule: how many fragments of which class this size breaks
    /// into, or `None` for sizes that vanish outright.
    pub fn fragments_into(&self) -> Option<(u32, SizeClass)> {
        match self {
            SizeClass::Large => Some((2, SizeClass::Medium)),
            SizeClass::Medium => Some((3, SizeClass::Small)),
            SizeClass::Small => None,
        }
    }
}

/// A drifting rock. Velocity is fixed at spawn; the sprite spins but the
/// mask footprint stays centered on `pos`, so spin never affects collision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: SizeClass,
    pub angle: f32,
    /// Degrees of decorative spin per tick
    pub spin: f32,
}

impl Asteroid {
    /// Advance one tick: wrap at the off-screen margin, spin, drift
    pub fn update(&mut self, screen: Vec2, margin: f32) {
        if self.pos.x > screen.x + margin {
            self.pos.x = -margin;
        } else if self.pos.x + margin < 0.0 {
            self.pos.x = screen.x + margin;
        }
        if self.pos.y > screen.y + margin {
            self.pos.y = -margin;
        } else if self.pos.y + margin < 0.0 {
            self.pos.y = screen.y + margin;
        }
        self.angle += self.spin;
        self.pos += self.vel;
    }

    /// Fragment specs for this asteroid: jittered position and slowed,
    /// scattered velocity per fragment. Ids are assigned by the caller.
    pub fn fragments<R: Rng>(
        &self,
        rng: &mut R,
        cfg: &SessionConfig,
    ) -> Vec<(Vec2, Vec2, SizeClass)> {
        let Some((count, size)) = self.size.fragments_into() else {
            return Vec::new();
        };
        (0..count)
            .map(|_| {
                let pos = self.pos
                    + Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0));
                let vel = self.vel * cfg.fragment_speed_factor
                    + Vec2::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5));
                (pos, vel, size)
            })
            .collect()
    }
}

/// The closed booster catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoosterKind {
    /// Timed: halves the fire interval
    RapidFire,
    /// Timed: blocks incoming damage, shatters asteroids on contact
    Shield,
    /// Timed: three-bullet salvos
    MultiShot,
    /// Ammo grant for the explosive weapon
    ExplosiveAmmo,
    /// Instant hit-point restore
    Heal,
    /// Charge for the stasis ability
    Stasis,
}

impl BoosterKind {
    pub const ALL: [BoosterKind; 6] = [
        BoosterKind::RapidFire,
        BoosterKind::Shield,
        BoosterKind::MultiShot,
        BoosterKind::ExplosiveAmmo,
        BoosterKind::Heal,
        BoosterKind::Stasis,
    ];
}

/// A pickup sitting on the field until the player touches it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Booster {
    pub id: u32,
    pub kind: BoosterKind,
    pub pos: Vec2,
}

/// A finite frame-indexed detonation. Damages on contact while animating,
/// removes itself after the last frame; never restarts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Explosion {
    pub id: u32,
    pub pos: Vec2,
    pub frame: u32,
}

impl Explosion {
    pub fn new(id: u32, pos: Vec2) -> Self {
        Self { id, pos, frame: 0 }
    }

    /// Advance one animation frame; returns false once exhausted
    pub fn update(&mut self) -> bool {
        self.frame += 1;
        self.frame < EXPLOSION_FRAMES
    }
}
