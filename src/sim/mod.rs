//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and
//! deterministic:
//! - One tick per call, fixed 60 Hz step
//! - Seeded RNG only; a seed plus the input trace reproduces a run
//! - Kill sets applied between collision stages, never mid-iteration
//! - No rendering, audio, or platform dependencies; observable effects go
//!   out through the event queue

pub mod collision;
pub mod entities;
pub mod mask;
pub mod modifiers;
pub mod spawn;
pub mod state;
pub mod tick;

pub use entities::{
    Asteroid, Booster, BoosterKind, Bullet, BulletOwner, Enemy, EnemyArchetype, Explosion, Ship,
    SizeClass, StrengthClass, WeaponKind,
};
pub use mask::{Mask, masks_collide};
pub use modifiers::Modifiers;
pub use state::{Ammo, GamePhase, GameState, Loadout, MaskTable, Weapon};
pub use tick::{TickInput, tick};
