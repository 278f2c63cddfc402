//! Timed-modifier manager
//!
//! Three modifier lifecycles share the booster catalog:
//! - timed boosters (rapid fire, shield, multi-shot): a wall-clock expiry
//!   that stacks duration on re-pickup,
//! - the ammo-gated explosive weapon: counted rounds, reverting to the
//!   normal weapon when dry,
//! - the charge-based stasis ability: a held-input drain that freezes every
//!   entity except the player and player bullets.
//!
//! Heal is an instant and never enters the manager's bookkeeping.

use serde::{Deserialize, Serialize};

use crate::events::GameEvent;
use crate::sim::entities::{BoosterKind, Ship, WeaponKind};
use crate::sim::state::Loadout;
use crate::tuning::SessionConfig;

/// The timed subset of the booster catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TimedBooster {
    RapidFire,
    Shield,
    MultiShot,
}

/// Charge-gated stasis ability
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct StasisAbility {
    pub charge: f32,
    pub active: bool,
}

/// Modifier timers and ability state for one session.
///
/// Invariant: a timeout of 0 means inactive; a positive timeout is the
/// wall-clock instant the effect expires. Activation and deactivation are
/// exact inverses, so active state and timeout can never disagree.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Modifiers {
    rapid_fire_until: f64,
    shield_until: f64,
    multi_shot_until: f64,
    pub stasis: StasisAbility,
}

impl Modifiers {
    /// Whether incoming damage is currently blocked by the shield
    pub fn shield_active(&self) -> bool {
        self.shield_until > 0.0
    }

    /// Whether the world (everything but the player and player bullets) is
    /// frozen
    pub fn stasis_active(&self) -> bool {
        self.stasis.active
    }

    fn timeout_mut(&mut self, booster: TimedBooster) -> &mut f64 {
        match booster {
            TimedBooster::RapidFire => &mut self.rapid_fire_until,
            TimedBooster::Shield => &mut self.shield_until,
            TimedBooster::MultiShot => &mut self.multi_shot_until,
        }
    }

    /// Apply one picked-up booster.
    ///
    /// Timed boosters activate once and stack duration on re-pickup; the
    /// effect itself is never applied twice while active.
    pub fn apply_pickup(
        &mut self,
        kind: BoosterKind,
        now: f64,
        cfg: &SessionConfig,
        loadout: &mut Loadout,
        player: &mut Ship,
        events: &mut Vec<GameEvent>,
    ) {
        match kind {
            BoosterKind::RapidFire => self.pickup_timed(TimedBooster::RapidFire, now, cfg, loadout),
            BoosterKind::Shield => self.pickup_timed(TimedBooster::Shield, now, cfg, loadout),
            BoosterKind::MultiShot => self.pickup_timed(TimedBooster::MultiShot, now, cfg, loadout),
            BoosterKind::ExplosiveAmmo => {
                let ammo = &mut loadout.explosive.ammo;
                if !ammo.available() {
                    events.push(GameEvent::ExplosiveUnlocked);
                }
                ammo.add(cfg.explosive_ammo_per_pickup);
            }
            BoosterKind::Heal => player.heal(cfg.heal_amount),
            BoosterKind::Stasis => {
                self.stasis.charge =
                    (self.stasis.charge + cfg.stasis_charge_per_pickup).min(cfg.stasis_charge_max);
            }
        }
    }

    fn pickup_timed(
        &mut self,
        booster: TimedBooster,
        now: f64,
        cfg: &SessionConfig,
        loadout: &mut Loadout,
    ) {
        let timeout = self.timeout_mut(booster);
        if *timeout == 0.0 {
            *timeout = now + cfg.booster_duration;
            activate(booster, cfg, loadout);
        } else {
            // Already active: stack duration, never reapply the effect
            *timeout += cfg.booster_duration;
        }
    }

    /// Per-tick bookkeeping: expire timed boosters, revert a dry explosive
    /// weapon, track the stasis hold and drain its charge.
    pub fn update(
        &mut self,
        now: f64,
        stasis_held: bool,
        cfg: &SessionConfig,
        loadout: &mut Loadout,
        events: &mut Vec<GameEvent>,
    ) {
        for booster in [
            TimedBooster::RapidFire,
            TimedBooster::Shield,
            TimedBooster::MultiShot,
        ] {
            let timeout = self.timeout_mut(booster);
            if *timeout > 0.0 && now > *timeout {
                *timeout = 0.0;
                deactivate(booster, cfg, loadout);
            }
        }

        // A dry explosive weapon reverts the loadout to normal rounds
        if loadout.active == WeaponKind::Explosive && !loadout.explosive.ammo.available() {
            loadout.active = WeaponKind::Normal;
            events.push(GameEvent::WeaponDepleted);
        }

        // Stasis: active only while held and charged; drains while active
        let was_active = self.stasis.active;
        self.stasis.active = stasis_held && self.stasis.charge > 0.0;
        if self.stasis.active {
            self.stasis.charge = (self.stasis.charge - cfg.stasis_drain_per_tick).max(0.0);
        }
        if self.stasis.active && !was_active {
            events.push(GameEvent::StasisEngaged);
        } else if was_active && !self.stasis.active {
            events.push(GameEvent::StasisReleased);
        }
    }
}

fn activate(booster: TimedBooster, cfg: &SessionConfig, loadout: &mut Loadout) {
    match booster {
        TimedBooster::RapidFire => loadout.fire_interval_scale /= cfg.rapid_fire_multiplier,
        TimedBooster::MultiShot => loadout.salvo_size = cfg.multi_shot_salvo,
        // The shield is its own flag (shield_until); the host reads it for
        // the sprite swap
        TimedBooster::Shield => {}
    }
}

fn deactivate(booster: TimedBooster, cfg: &SessionConfig, loadout: &mut Loadout) {
    match booster {
        TimedBooster::RapidFire => loadout.fire_interval_scale *= cfg.rapid_fire_multiplier,
        TimedBooster::MultiShot => loadout.salvo_size = 1,
        TimedBooster::Shield => {}
    }
}
