//! Typed game events
//!
//! The simulation never touches an audio device or a framebuffer. Everything
//! the host needs to react to (sound triggers, HUD hints, session end) is
//! queued as a `GameEvent` during the tick and drained afterward.

use crate::sim::entities::{BoosterKind, WeaponKind};

/// One observable event produced by a simulation tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Player fired a salvo
    PlayerFired(WeaponKind),
    /// An enemy fired a salvo
    EnemyFired,
    /// Active weapon cycled
    WeaponSwitched(WeaponKind),
    /// A booster was picked up
    BoosterPickedUp(BoosterKind),
    /// First explosive ammo acquired (HUD hint: weapon switch available)
    ExplosiveUnlocked,
    /// Explosive ammo ran dry; loadout reverted to the normal weapon
    WeaponDepleted,
    /// An asteroid was destroyed
    AsteroidDestroyed,
    /// An explosive bullet detonated
    BulletDetonated,
    /// An enemy was destroyed
    EnemyDestroyed,
    /// The player took damage
    PlayerHit,
    /// Stasis loop sound should start
    StasisEngaged,
    /// Stasis loop sound should stop
    StasisReleased,
    /// The session ended
    GameOver,
}
