//! Player input resolution and movement integration.
//!
//! ## Pipeline (runs in order every `Update` frame)
//!
//! 1. [`player_acceleration_system`]: resolves the input snapshot into an
//!    acceleration under the strict precedence keyboard → joystick →
//!    pointer target, gated on the stun timer as it stood at tick entry.
//! 2. [`status_tick_system`]: counts stun timers down to exactly zero.
//! 3. Attractor systems (planet, black holes, bridge) add their velocity
//!    deltas between acceleration and integration.
//! 4. [`integrate_player_system`]: accelerate → drag → clamp → integrate.
//! 5. [`world_bounds_system`]: inelastic wall stop at the world edge.
//!
//! Tests populate [`InputSnapshot`] directly and run only the systems under
//! test, so none of this requires a window or input devices.

use super::state::{Acceleration, Body, ControlLock, Player, StatusEffects, ThrustState};
use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::input::InputSnapshot;
use bevy::prelude::*;

// ── Status timers ───────────────────────────────────────────────────────────

/// Count down stun timers, clamping at exactly zero.
///
/// Runs after acceleration, so input stays dead through the tick whose
/// delta consumes the timer and recovers on the next one.  Repeated
/// subtraction leaves sub-epsilon float residue, so near-zero remainders
/// snap to exactly 0.  Disorientation is not timed here; the solar flare
/// sets and clears it explicitly.
pub fn status_tick_system(clock: Res<SimClock>, mut q: Query<&mut StatusEffects>) {
    for mut status in q.iter_mut() {
        if status.stun_remaining > 0.0 {
            let remaining = (status.stun_remaining - clock.delta_secs).max(0.0);
            status.stun_remaining = if remaining <= f32::EPSILON { 0.0 } else { remaining };
        }
    }
}

// ── Input → acceleration ────────────────────────────────────────────────────

/// Resolve the input snapshot into the player's acceleration for this tick.
///
/// Precedence is strict: the first applicable source wins and the rest are
/// ignored:
///
/// 1. **Keyboard axis**: fixed-magnitude acceleration along the axis
///    (diagonals normalized); clears any pointer target.
/// 2. **Joystick**: direction × acceleration, gated by the dead zone.
/// 3. **Pointer target**: acceleration toward the target; the target clears
///    once inside the arrival radius.
///
/// A stunned or locked player accelerates at zero regardless of input.
/// No input source active is not an error: it's a zero-acceleration tick.
pub fn player_acceleration_system(
    mut snapshot: ResMut<InputSnapshot>,
    lock: Res<ControlLock>,
    config: Res<SimConfig>,
    mut thrust: ResMut<ThrustState>,
    mut q: Query<(&Transform, &mut Acceleration, &StatusEffects), With<Player>>,
) {
    let Ok((transform, mut accel, status)) = q.single_mut() else {
        return;
    };

    if lock.0 || status.is_stunned() {
        accel.0 = Vec2::ZERO;
        thrust.thrusting = false;
        return;
    }

    let pos = transform.translation.truncate();
    let magnitude = config.player_acceleration;

    accel.0 = if let Some(axis) = snapshot.keyboard_axis {
        snapshot.pointer_target = None;
        axis.normalize_or_zero() * magnitude
    } else if let Some(stick) = snapshot
        .joystick
        .filter(|s| s.length() > config.joystick_dead_zone)
    {
        stick.normalize_or_zero() * magnitude
    } else if let Some(target) = snapshot.pointer_target {
        let to_target = target - pos;
        if to_target.length() < config.arrive_radius {
            snapshot.pointer_target = None;
            Vec2::ZERO
        } else {
            to_target.normalize_or_zero() * magnitude
        }
    } else {
        Vec2::ZERO
    };

    thrust.thrusting = accel.0 != Vec2::ZERO;
}

// ── Integration ───────────────────────────────────────────────────────────────

/// Integrate the player body: `v += a·dt`, drag on coasting ticks, speed
/// clamp (halved while disoriented), then `p += v·dt`.
///
/// Drag only applies when no acceleration was produced this tick: thrust
/// and drag never fight each other, so holding a key reaches max speed
/// instead of an equilibrium below it.
pub fn integrate_player_system(
    clock: Res<SimClock>,
    lock: Res<ControlLock>,
    config: Res<SimConfig>,
    mut thrust: ResMut<ThrustState>,
    mut q: Query<(&mut Transform, &mut Body, &Acceleration, &StatusEffects), With<Player>>,
) {
    let Ok((mut transform, mut body, accel, status)) = q.single_mut() else {
        return;
    };
    let dt = clock.delta_secs;

    if lock.0 {
        body.velocity = Vec2::ZERO;
        thrust.moving_fast = false;
        return;
    }

    body.velocity += accel.0 * dt;

    if accel.0 == Vec2::ZERO {
        let speed = body.velocity.length();
        if speed > 0.0 {
            let decayed = (speed - body.drag * dt).max(0.0);
            body.velocity *= decayed / speed;
        }
    }

    let max_speed = if status.disoriented {
        body.max_speed * config.disorient_speed_factor
    } else {
        body.max_speed
    };
    body.velocity = body.velocity.clamp_length_max(max_speed);

    transform.translation += (body.velocity * dt).extend(0.0);
    thrust.moving_fast = body.velocity.length() > body.max_speed * config.fast_speed_fraction;
}

// ── World bounds ──────────────────────────────────────────────────────────────

/// Clamp the player inside the world with an inelastic stop: the velocity
/// component that would exit the bounds is zeroed, not negated.
pub fn world_bounds_system(
    config: Res<SimConfig>,
    mut q: Query<(&mut Transform, &mut Body), With<Player>>,
) {
    let Ok((mut transform, mut body)) = q.single_mut() else {
        return;
    };

    let pos = transform.translation.truncate();
    let clamped = pos.clamp(
        Vec2::ZERO,
        Vec2::new(config.world_width, config.world_height),
    );

    if clamped.x != pos.x {
        body.velocity.x = 0.0;
    }
    if clamped.y != pos.y {
        body.velocity.y = 0.0;
    }
    transform.translation = clamped.extend(transform.translation.z);
}

// ── Unit tests ────────────────────────────────────────────────────────────────
