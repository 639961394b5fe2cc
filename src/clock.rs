//! Monotonic simulation clock.
//!
//! Every timed behaviour in the core (flare scheduling, portal cooldowns,
//! stun countdowns, guide choreography, the cheat-buffer reset) is a
//! deadline compared against this clock once per tick.  Nothing sleeps and
//! nothing is cancelled; deadlines simply pass.
//!
//! Systems read `clock.delta_secs` for integration rather than `Res<Time>`
//! directly so tests can drive a frame of any length by mutating the
//! resource, the same trick the input-snapshot layer plays for input.

use bevy::prelude::*;

/// Milliseconds elapsed since session start, plus the delta of the current
/// tick. Advanced once per frame by [`advance_sim_clock`], before every
/// other simulation system.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SimClock {
    /// Monotonic session time in milliseconds.
    pub now_ms: f64,
    /// Length of the current tick in seconds.
    pub delta_secs: f32,
}

impl SimClock {
    /// True once `deadline_ms` has passed. Deadlines at exactly `now_ms`
    /// count as reached.
    pub fn reached(&self, deadline_ms: f64) -> bool {
        self.now_ms >= deadline_ms
    }
}

/// Copy the frame delta out of Bevy's `Time` and accumulate session time.
pub fn advance_sim_clock(time: Res<Time>, mut clock: ResMut<SimClock>) {
    clock.delta_secs = time.delta_secs();
    clock.now_ms += time.delta_secs_f64() * 1000.0;
}
