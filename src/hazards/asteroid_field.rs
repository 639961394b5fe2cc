//! Drifting asteroid fields with deterministic contact knockback.

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::events::PlayerStunned;
use crate::player::{Body, Player, StatusEffects};
use bevy::prelude::*;
use rand::Rng;

/// Zone centers and asteroid counts, hand-placed to leave the middle of the
/// map and the planet approach clear.
const ASTEROID_ZONES: [(f32, f32, u32); 4] = [
    (800.0, 600.0, 8),
    (2800.0, 1200.0, 10),
    (1200.0, 2400.0, 7),
    (3400.0, 2200.0, 9),
];

#[derive(Component, Debug)]
pub struct Asteroid {
    pub radius: f32,
    /// Set while the player overlaps; knockback fires only on the rising
    /// edge so a single brush is a single hit.
    pub touching_player: bool,
}

pub fn spawn_asteroid_fields(mut commands: Commands, config: Res<SimConfig>) {
    let mut rng = rand::thread_rng();
    let mut total = 0;
    for &(cx, cy, count) in ASTEROID_ZONES.iter() {
        for _ in 0..count {
            let pos = Vec2::new(
                cx + rng.gen_range(-config.asteroid_zone_spread..config.asteroid_zone_spread),
                cy + rng.gen_range(-config.asteroid_zone_spread..config.asteroid_zone_spread),
            );
            let drift = Vec2::new(
                rng.gen_range(-config.asteroid_drift_speed..config.asteroid_drift_speed),
                rng.gen_range(-config.asteroid_drift_speed..config.asteroid_drift_speed),
            );
            commands.spawn((
                Asteroid {
                    radius: rng.gen_range(18.0..34.0),
                    touching_player: false,
                },
                Body {
                    velocity: drift,
                    ..Default::default()
                },
                Transform::from_translation(pos.extend(0.0)),
            ));
            total += 1;
        }
    }
    println!("✓ Spawned {total} asteroids across {} zones", ASTEROID_ZONES.len());
}

/// Integrate asteroid drift and bounce them off the world bounds with a
/// fixed restitution.
pub fn asteroid_drift_system(
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    mut q: Query<(&mut Transform, &mut Body, &Asteroid)>,
) {
    for (mut transform, mut body, asteroid) in q.iter_mut() {
        let delta = body.velocity * clock.delta_secs;
        transform.translation += delta.extend(0.0);

        let r = asteroid.radius;
        let pos = transform.translation.truncate();
        if (pos.x - r < 0.0 && body.velocity.x < 0.0)
            || (pos.x + r > config.world_width && body.velocity.x > 0.0)
        {
            body.velocity.x = -body.velocity.x * config.asteroid_bounce;
        }
        if (pos.y - r < 0.0 && body.velocity.y < 0.0)
            || (pos.y + r > config.world_height && body.velocity.y > 0.0)
        {
            body.velocity.y = -body.velocity.y * config.asteroid_bounce;
        }
    }
}

/// Knock the player back on first contact with an asteroid.
///
/// The response is fully deterministic: velocity is set along the
/// separating normal at the configured speed (asteroid mass and incoming
/// speed are ignored) and a stun is applied.  The per-asteroid latch keeps
/// a lingering overlap from re-firing.
pub fn asteroid_contact_system(
    config: Res<SimConfig>,
    mut stun_events: MessageWriter<PlayerStunned>,
    mut asteroids: Query<(&Transform, &mut Asteroid), Without<Player>>,
    mut players: Query<(&Transform, &mut Body, &mut StatusEffects), With<Player>>,
) {
    let Ok((player_transform, mut body, mut status)) = players.single_mut() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (asteroid_transform, mut asteroid) in asteroids.iter_mut() {
        let asteroid_pos = asteroid_transform.translation.truncate();
        let contact_dist = asteroid.radius + config.player_body_radius;
        let overlapping = player_pos.distance(asteroid_pos) < contact_dist;

        if overlapping && !asteroid.touching_player {
            let normal = (player_pos - asteroid_pos).normalize_or_zero();
            // Degenerate exact-overlap: push along +X rather than not at all.
            let normal = if normal == Vec2::ZERO { Vec2::X } else { normal };
            body.velocity = normal * config.asteroid_knockback_speed;
            status.stun_remaining = config.asteroid_stun_secs;
            stun_events.write(PlayerStunned {
                duration: config.asteroid_stun_secs,
            });
        }
        asteroid.touching_player = overlapping;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ASTEROID_KNOCKBACK_SPEED, ASTEROID_STUN_SECS};
    use approx::assert_relative_eq;

    fn build_test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SimClock {
            now_ms: 0.0,
            delta_secs: 0.1,
        });
        app.insert_resource(SimConfig::default());
        app.add_message::<PlayerStunned>();
        app.add_systems(Update, asteroid_contact_system);
        app
    }

    fn spawn_player_at(app: &mut App, pos: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Body::default(),
                StatusEffects::default(),
                Transform::from_translation(pos.extend(0.0)),
            ))
            .id()
    }

    fn spawn_asteroid_at(app: &mut App, pos: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Asteroid {
                    radius: 24.0,
                    touching_player: false,
                },
                Body::default(),
                Transform::from_translation(pos.extend(0.0)),
            ))
            .id()
    }

    #[test]
    fn contact_sets_knockback_along_separating_normal() {
        let mut app = build_test_app();
        let player = spawn_player_at(&mut app, Vec2::new(530.0, 500.0));
        spawn_asteroid_at(&mut app, Vec2::new(500.0, 500.0));
        app.update();

        let body = app.world().get::<Body>(player).unwrap();
        assert_relative_eq!(body.velocity.x, ASTEROID_KNOCKBACK_SPEED, epsilon = 1e-3);
        assert_relative_eq!(body.velocity.y, 0.0, epsilon = 1e-3);
        let status = app.world().get::<StatusEffects>(player).unwrap();
        assert_eq!(status.stun_remaining, ASTEROID_STUN_SECS);
    }

    #[test]
    fn lingering_overlap_fires_only_once() {
        let mut app = build_test_app();
        let player = spawn_player_at(&mut app, Vec2::new(530.0, 500.0));
        spawn_asteroid_at(&mut app, Vec2::new(500.0, 500.0));
        app.update();

        // Damp the knockback manually and stay overlapping.
        app.world_mut().get_mut::<Body>(player).unwrap().velocity = Vec2::ZERO;
        app.update();
        assert_eq!(
            app.world().get::<Body>(player).unwrap().velocity,
            Vec2::ZERO,
            "second overlapping tick must not re-trigger knockback"
        );
    }

    #[test]
    fn leaving_and_returning_retriggers() {
        let mut app = build_test_app();
        let player = spawn_player_at(&mut app, Vec2::new(530.0, 500.0));
        spawn_asteroid_at(&mut app, Vec2::new(500.0, 500.0));
        app.update();

        // Step out of contact so the latch clears.
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(700.0, 500.0, 0.0);
        app.world_mut().get_mut::<Body>(player).unwrap().velocity = Vec2::ZERO;
        app.update();

        // Back into contact: hits again.
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(530.0, 500.0, 0.0);
        app.update();
        let body = app.world().get::<Body>(player).unwrap();
        assert_relative_eq!(body.velocity.x, ASTEROID_KNOCKBACK_SPEED, epsilon = 1e-3);
    }

    #[test]
    fn drift_bounces_off_world_bounds_with_restitution() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SimClock {
            now_ms: 0.0,
            delta_secs: 0.1,
        });
        app.insert_resource(SimConfig::default());
        app.add_systems(Update, asteroid_drift_system);
        let asteroid = app
            .world_mut()
            .spawn((
                Asteroid {
                    radius: 24.0,
                    touching_player: false,
                },
                Body {
                    velocity: Vec2::new(-50.0, 0.0),
                    ..Default::default()
                },
                Transform::from_translation(Vec3::new(20.0, 500.0, 0.0)),
            ))
            .id();
        app.update();

        let body = app.world().get::<Body>(asteroid).unwrap();
        assert_relative_eq!(body.velocity.x, 50.0 * 0.8, epsilon = 1e-3);
    }
}
