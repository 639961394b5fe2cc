//! Solar flares: the global disorientation cycle.
//!
//! A single deadline-driven machine, `Idle → Warning → Active → Idle`.
//! Phase changes happen only when the simulation clock passes the stored
//! deadline, so tests drive the whole cycle by setting `SimClock.now_ms`.

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::player::StatusEffects;
use bevy::prelude::*;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlarePhase {
    #[default]
    Idle,
    /// The flare is imminent; presentation shows the warning, movement is
    /// unaffected.
    Warning,
    /// Disorientation is in force.
    Active,
}

#[derive(Resource, Debug, Clone, Copy)]
pub struct FlareState {
    pub phase: FlarePhase,
    /// When the current phase ends (ms, simulation clock).
    pub deadline_ms: f64,
}

impl FlareState {
    /// Schedule the first flare relative to `now_ms`.
    pub fn scheduled(now_ms: f64, config: &SimConfig) -> Self {
        let jitter = rand::thread_rng().gen_range(0.0..config.flare_jitter_ms);
        Self {
            phase: FlarePhase::Idle,
            deadline_ms: now_ms + config.flare_interval_ms + jitter,
        }
    }
}

/// Advance the flare cycle and toggle player disorientation with it.
pub fn solar_flare_system(
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    mut state: ResMut<FlareState>,
    mut players: Query<&mut StatusEffects>,
) {
    if !clock.reached(state.deadline_ms) {
        return;
    }

    match state.phase {
        FlarePhase::Idle => {
            state.phase = FlarePhase::Warning;
            state.deadline_ms = clock.now_ms + config.flare_warning_ms;
        }
        FlarePhase::Warning => {
            state.phase = FlarePhase::Active;
            state.deadline_ms = clock.now_ms + config.flare_active_ms;
            for mut status in players.iter_mut() {
                status.disoriented = true;
            }
        }
        FlarePhase::Active => {
            state.phase = FlarePhase::Idle;
            let jitter = rand::thread_rng().gen_range(0.0..config.flare_jitter_ms);
            state.deadline_ms = clock.now_ms + config.flare_interval_ms + jitter;
            for mut status in players.iter_mut() {
                status.disoriented = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{FLARE_ACTIVE_MS, FLARE_WARNING_MS};
    use crate::player::Player;

    fn build_flare_app() -> (App, Entity) {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SimClock {
            now_ms: 0.0,
            delta_secs: 0.1,
        });
        app.insert_resource(SimConfig::default());
        app.insert_resource(FlareState {
            phase: FlarePhase::Idle,
            deadline_ms: 1_000.0,
        });
        app.add_systems(Update, solar_flare_system);
        let player = app
            .world_mut()
            .spawn((Player, StatusEffects::default()))
            .id();
        (app, player)
    }

    fn set_now(app: &mut App, now_ms: f64) {
        app.world_mut().resource_mut::<SimClock>().now_ms = now_ms;
    }

    fn disoriented(app: &App, player: Entity) -> bool {
        app.world().get::<StatusEffects>(player).unwrap().disoriented
    }

    #[test]
    fn full_cycle_sets_and_clears_disorientation() {
        let (mut app, player) = build_flare_app();

        // Before the deadline nothing happens.
        set_now(&mut app, 500.0);
        app.update();
        assert_eq!(app.world().resource::<FlareState>().phase, FlarePhase::Idle);
        assert!(!disoriented(&app, player));

        // Deadline passes: warning phase, still no disorientation.
        set_now(&mut app, 1_000.0);
        app.update();
        assert_eq!(app.world().resource::<FlareState>().phase, FlarePhase::Warning);
        assert!(!disoriented(&app, player));

        // Warning elapses: active, disoriented.
        set_now(&mut app, 1_000.0 + FLARE_WARNING_MS);
        app.update();
        assert_eq!(app.world().resource::<FlareState>().phase, FlarePhase::Active);
        assert!(disoriented(&app, player));

        // Active elapses: back to idle, cleared, next flare scheduled ahead.
        let active_end = 1_000.0 + FLARE_WARNING_MS + FLARE_ACTIVE_MS;
        set_now(&mut app, active_end);
        app.update();
        let state = *app.world().resource::<FlareState>();
        assert_eq!(state.phase, FlarePhase::Idle);
        assert!(!disoriented(&app, player));
        assert!(state.deadline_ms >= active_end + 30_000.0);
        assert!(state.deadline_ms <= active_end + 40_000.0);
    }

    #[test]
    fn one_phase_change_per_deadline() {
        let (mut app, _player) = build_flare_app();
        // Jump the clock far past the deadline; the machine steps exactly one
        // phase and re-anchors the next deadline to the current clock.
        set_now(&mut app, 1_000_000.0);
        app.update();
        assert_eq!(app.world().resource::<FlareState>().phase, FlarePhase::Warning);
        // Same clock value: the fresh warning deadline is still ahead.
        app.update();
        assert_eq!(app.world().resource::<FlareState>().phase, FlarePhase::Warning);
        set_now(&mut app, 1_000_000.0 + FLARE_WARNING_MS);
        app.update();
        assert_eq!(app.world().resource::<FlareState>().phase, FlarePhase::Active);
    }
}
