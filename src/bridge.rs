//! Rainbow bridges: rideable parametric arcs spawned for the epilogue.
//!
//! An arc is a straight baseline from its start point, rotated by `angle`,
//! with a sine bulge lifting the middle.  Riding is a soft force: each tick
//! the velocity of a player inside the band blends 90/10 toward the local
//! tangent direction at ride speed, so entering, leaving, and steering
//! along the arc all stay under player control.

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::player::{Body, Player};
use bevy::prelude::*;
use std::f32::consts::PI;

#[derive(Component, Debug, Clone, Copy)]
pub struct RainbowBridge {
    pub start: Vec2,
    /// Baseline rotation in radians.
    pub angle: f32,
    pub arc_length: f32,
    pub arc_height: f32,
    /// Simulation-clock birth time; the bridge despawns after its lifetime.
    pub spawned_at_ms: f64,
}

impl RainbowBridge {
    pub fn new(start: Vec2, angle: f32, arc_length: f32, config: &SimConfig, now_ms: f64) -> Self {
        Self {
            start,
            angle,
            arc_length,
            arc_height: arc_length * config.bridge_arc_height_ratio,
            spawned_at_ms: now_ms,
        }
    }

    /// Point on the arc at parameter `t` in `[0, 1]`.
    ///
    /// Local frame: x runs along the baseline, y bulges upward (negative,
    /// world y grows downward) following a half sine.
    pub fn arc_point(&self, t: f32) -> Vec2 {
        let local = Vec2::new(t * self.arc_length, -(t * PI).sin() * self.arc_height);
        self.start + Vec2::from_angle(self.angle).rotate(local)
    }

    /// Unit tangent at `t`, via a central difference.  The arc is smooth so
    /// a small step is plenty.
    pub fn tangent(&self, t: f32) -> Vec2 {
        let h = 0.01;
        let ahead = self.arc_point((t + h).min(1.0));
        let behind = self.arc_point((t - h).max(0.0));
        (ahead - behind).normalize_or_zero()
    }

    /// Parameter of the sampled arc point closest to `point`.
    pub fn closest_progress(&self, point: Vec2, samples: u32) -> f32 {
        let mut best_t = 0.0;
        let mut best_dist = f32::MAX;
        for i in 0..=samples {
            let t = i as f32 / samples as f32;
            let dist = self.arc_point(t).distance(point);
            if dist < best_dist {
                best_dist = dist;
                best_t = t;
            }
        }
        best_t
    }

    pub fn expired(&self, now_ms: f64, config: &SimConfig) -> bool {
        now_ms >= self.spawned_at_ms + config.bridge_lifetime_ms
    }
}

/// Blend the velocity of a player riding a bridge toward the arc tangent.
pub fn bridge_ride_system(
    config: Res<SimConfig>,
    bridges: Query<&RainbowBridge>,
    mut players: Query<(&Transform, &mut Body), With<Player>>,
) {
    let Ok((transform, mut body)) = players.single_mut() else {
        return;
    };
    let pos = transform.translation.truncate();

    for bridge in bridges.iter() {
        let t = bridge.closest_progress(pos, crate::constants::BRIDGE_PROGRESS_SAMPLES);
        if bridge.arc_point(t).distance(pos) > config.bridge_ride_half_width {
            continue;
        }
        let keep = config.bridge_blend_keep;
        body.velocity =
            body.velocity * keep + bridge.tangent(t) * config.bridge_ride_speed * (1.0 - keep);
        break;
    }
}

/// Despawn bridges past their lifetime.
pub fn bridge_lifetime_system(
    mut commands: Commands,
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    bridges: Query<(Entity, &RainbowBridge)>,
) {
    for (entity, bridge) in bridges.iter() {
        if bridge.expired(clock.now_ms, &config) {
            commands.entity(entity).despawn();
        }
    }
}

/// Spawn the three epilogue arcs fanning out from the player's position.
pub fn spawn_epilogue_bridges(
    commands: &mut Commands,
    origin: Vec2,
    config: &SimConfig,
    now_ms: f64,
) {
    for angle in [-PI / 6.0, 0.0, PI / 6.0] {
        commands.spawn(RainbowBridge::new(
            origin,
            angle,
            config.bridge_arc_length,
            config,
            now_ms,
        ));
    }
}
