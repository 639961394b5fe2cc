//! The home planet: a soft gravity well and a hard surface.
//!
//! The planet sits mostly below the bottom world edge so only its upper dome
//! is reachable.  Its pull is a velocity nudge, not an orbital model: full
//! strength near the surface, fading linearly to zero at the edge of the
//! well.  The surface itself is impenetrable: the player is projected back
//! onto it and the inward radial velocity component is cancelled, so
//! tangential sliding along the dome still works.

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::player::{Body, Player};
use bevy::prelude::*;

/// The single planet in the world.
#[derive(Resource, Debug, Clone, Copy)]
pub struct Planet {
    pub center: Vec2,
    pub radius: f32,
}

impl Planet {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            center: Vec2::new(config.planet_center_x, config.planet_center_y),
            radius: config.planet_radius,
        }
    }

    /// Altitude above the surface; negative when inside the planet.
    pub fn altitude(&self, point: Vec2) -> f32 {
        point.distance(self.center) - self.radius
    }

    /// Pull strength multiplier at `point`: 1 inside the full-strength band,
    /// fading linearly to 0 across the fade band, 0 beyond.
    pub fn pull_factor(&self, point: Vec2, config: &SimConfig) -> f32 {
        let altitude = self.altitude(point);
        if altitude <= config.planet_gravity_range {
            1.0
        } else {
            let past = altitude - config.planet_gravity_range;
            (1.0 - past / config.planet_gravity_fade).max(0.0)
        }
    }
}

pub fn spawn_planet(mut commands: Commands, config: Res<SimConfig>) {
    commands.insert_resource(Planet::from_config(&config));
    println!("✓ Planet initialized");
}

/// Nudge the player's velocity toward the planet center while inside the
/// gravity well.  Runs between input acceleration and integration.
pub fn planet_gravity_system(
    clock: Res<SimClock>,
    planet: Res<Planet>,
    config: Res<SimConfig>,
    mut q: Query<(&Transform, &mut Body), With<Player>>,
) {
    let Ok((transform, mut body)) = q.single_mut() else {
        return;
    };
    let pos = transform.translation.truncate();
    let factor = planet.pull_factor(pos, &config);
    if factor <= 0.0 {
        return;
    }
    let to_center = planet.center - pos;
    if to_center == Vec2::ZERO {
        return;
    }
    body.velocity +=
        to_center.normalize() * config.planet_gravity * factor * clock.delta_secs;
}

/// Keep the player out of the planet interior.
///
/// Runs after integration: projects a penetrating player back onto the
/// surface and zeroes the velocity component pointing into the planet.
pub fn surface_constrain_system(
    planet: Res<Planet>,
    mut q: Query<(&mut Transform, &mut Body), With<Player>>,
) {
    let Ok((mut transform, mut body)) = q.single_mut() else {
        return;
    };
    let pos = transform.translation.truncate();
    let from_center = pos - planet.center;
    let dist = from_center.length();
    if dist >= planet.radius || dist == 0.0 {
        return;
    }

    let outward = from_center / dist;
    let surface = planet.center + outward * planet.radius;
    transform.translation = surface.extend(transform.translation.z);

    // Cancel only the inward radial component; tangential motion survives.
    let radial = body.velocity.dot(outward);
    if radial < 0.0 {
        body.velocity -= outward * radial;
    }
}
