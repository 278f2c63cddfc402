//! Astrofield entry point
//!
//! Headless demo driver: the scripted pilot plays full sessions at the fixed
//! tick step, and each finished session feeds the leaderboard before the
//! next one starts. A rendering/audio host plugs in at the same boundary
//! the pilot uses (input events in, game events and state snapshots out).

use astrofield::consts::TICK_DT;
use astrofield::events::GameEvent;
use astrofield::host::{DemoPilot, InputState};
use astrofield::sim::{GamePhase, GameState, tick};
use astrofield::{HighScores, SessionConfig};

/// Safety cap so a pilot that never dies still ends its session
const MAX_SESSION_TICKS: u64 = 20_000;

fn main() {
    env_logger::init();
    log::info!("Astrofield (headless demo) starting...");

    let cfg = load_config();
    let sessions = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(3u64);
    let base_seed = 0xA57E0F1Eu64;

    // Sessions loop at the process level: each game over feeds the
    // leaderboard and a fresh session starts
    let mut scores = HighScores::new();
    for i in 0..sessions {
        let seed = base_seed.wrapping_add(i);
        let state = run_session(seed, &cfg);
        match scores.add_score(state.score, state.frame, seed) {
            Some(rank) => log::info!(
                "session {i}: score {} over {} frames (rank {rank})",
                state.score,
                state.frame
            ),
            None => log::info!(
                "session {i}: score {} over {} frames",
                state.score,
                state.frame
            ),
        }
    }

    match serde_json::to_string_pretty(&scores) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("failed to serialize leaderboard: {e}"),
    }
}

/// Load a session config from the optional first argument, falling back to
/// defaults on any problem
fn load_config() -> SessionConfig {
    let Some(path) = std::env::args().nth(1) else {
        return SessionConfig::default();
    };
    match std::fs::read_to_string(&path) {
        Ok(json) => match SessionConfig::from_json(&json) {
            Ok(cfg) => {
                log::info!("loaded config from {path}");
                cfg
            }
            Err(e) => {
                log::warn!("bad config {path}: {e}; using defaults");
                SessionConfig::default()
            }
        },
        Err(e) => {
            log::warn!("cannot read {path}: {e}; using defaults");
            SessionConfig::default()
        }
    }
}

/// Run one session to game over (or the tick cap) and return its final state.
///
/// The clock advances one fixed step per tick rather than reading a wall
/// clock, so demo runs are reproducible; an interactive host would block on
/// the frame boundary here instead.
fn run_session(seed: u64, cfg: &SessionConfig) -> GameState {
    let mut state = GameState::new(seed, cfg);
    let mut input = InputState::new(cfg);
    let pilot = DemoPilot;
    let mut queue = Vec::new();
    let mut now = 0.0f64;

    while state.phase == GamePhase::Running && state.frame < MAX_SESSION_TICKS {
        queue.clear();
        pilot.drive(&state, cfg, &mut queue);
        for event in queue.drain(..) {
            input.push(event);
        }
        if input.quit_requested() {
            break;
        }

        let snapshot = input.snapshot(now);
        tick(&mut state, &snapshot, cfg);

        // A real host would route these to the mixer and HUD
        for event in state.drain_events() {
            match event {
                GameEvent::GameOver => log::info!("game over at frame {}", state.frame),
                GameEvent::ExplosiveUnlocked => {
                    log::debug!("hint: explosive rounds available")
                }
                _ => log::trace!("{event:?}"),
            }
        }

        now += TICK_DT;
    }

    state
}
