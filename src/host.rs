//! Host boundary
//!
//! The simulation consumes a queue of discrete input signals and produces a
//! queue of events; everything platform-shaped (window, pointer device,
//! audio output) lives on the far side of this module. `InputState` folds
//! raw signals into the per-tick snapshot; `DemoPilot` is a scripted host
//! for headless runs.

use glam::Vec2;

use crate::sim::{GameState, TickInput};
use crate::tuning::SessionConfig;

/// A discrete input signal from the host's event queue
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Quit,
    PointerMoved(Vec2),
    FireDown,
    FireUp,
    WeaponSwitch,
    StasisDown,
    StasisUp,
}

/// Folds the host's input events into per-tick snapshots.
///
/// Held states persist between ticks; edges (weapon switch) fire once in the
/// snapshot for the tick they arrived in and then clear.
#[derive(Debug, Clone)]
pub struct InputState {
    pointer: Vec2,
    fire_held: bool,
    stasis_held: bool,
    switch_pending: bool,
    quit: bool,
}

impl InputState {
    pub fn new(cfg: &SessionConfig) -> Self {
        Self {
            pointer: cfg.screen_center(),
            fire_held: false,
            stasis_held: false,
            switch_pending: false,
            quit: false,
        }
    }

    /// Consume one queued signal
    pub fn push(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.quit = true,
            InputEvent::PointerMoved(pos) => self.pointer = pos,
            InputEvent::FireDown => self.fire_held = true,
            InputEvent::FireUp => self.fire_held = false,
            InputEvent::WeaponSwitch => self.switch_pending = true,
            InputEvent::StasisDown => self.stasis_held = true,
            InputEvent::StasisUp => self.stasis_held = false,
        }
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }

    /// Build the snapshot for this tick, clearing one-shot edges
    pub fn snapshot(&mut self, now: f64) -> TickInput {
        let input = TickInput {
            now,
            pointer: self.pointer,
            fire_held: self.fire_held,
            switch_weapon: self.switch_pending,
            stasis_held: self.stasis_held,
        };
        self.switch_pending = false;
        input
    }
}

/// Scripted stand-in for a human at the pointer, used by the headless demo
/// binary. Keeps the ship orbiting the screen center, holds fire, and aims
/// at whatever threat is nearest.
#[derive(Debug, Clone, Default)]
pub struct DemoPilot;

impl DemoPilot {
    /// Produce this tick's input events
    pub fn drive(&self, state: &GameState, cfg: &SessionConfig, out: &mut Vec<InputEvent>) {
        // Aim at the nearest asteroid or enemy; otherwise trace a slow orbit
        // so asteroids aimed at the pointer spread around the field
        let player = state.player.pos;
        let nearest_threat = state
            .asteroids
            .iter()
            .map(|a| a.pos)
            .chain(state.enemies.iter().map(|e| e.pos))
            .min_by(|a, b| {
                a.distance_squared(player)
                    .partial_cmp(&b.distance_squared(player))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });

        let pointer = match nearest_threat {
            Some(threat) => threat,
            None => {
                let t = state.frame as f32 * 0.01;
                cfg.screen_center() + Vec2::new(t.cos(), t.sin()) * 150.0
            }
        };

        out.push(InputEvent::PointerMoved(pointer));
        if state.frame == 0 {
            out.push(InputEvent::FireDown);
        }
        // Burn stasis charge whenever the field gets crowded
        if state.asteroids.len() > 12 {
            out.push(InputEvent::StasisDown);
        } else {
            out.push(InputEvent::StasisUp);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_clear_after_snapshot() {
        let cfg = SessionConfig::default();
        let mut input = InputState::new(&cfg);
        input.push(InputEvent::WeaponSwitch);
        input.push(InputEvent::FireDown);

        let first = input.snapshot(1.0);
        assert!(first.switch_weapon);
        assert!(first.fire_held);

        let second = input.snapshot(2.0);
        assert!(!second.switch_weapon, "switch is an edge, not a hold");
        assert!(second.fire_held, "fire is held until FireUp");
    }

    #[test]
    fn test_pointer_tracks_latest_position() {
        let cfg = SessionConfig::default();
        let mut input = InputState::new(&cfg);
        input.push(InputEvent::PointerMoved(Vec2::new(10.0, 20.0)));
        input.push(InputEvent::PointerMoved(Vec2::new(30.0, 40.0)));
        assert_eq!(input.snapshot(0.0).pointer, Vec2::new(30.0, 40.0));
    }

    #[test]
    fn test_quit_is_sticky() {
        let cfg = SessionConfig::default();
        let mut input = InputState::new(&cfg);
        assert!(!input.quit_requested());
        input.push(InputEvent::Quit);
        input.snapshot(0.0);
        assert!(input.quit_requested());
    }
}
