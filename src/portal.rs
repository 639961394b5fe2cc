//! Paired teleport portals with a shared per-pair cooldown.

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::events::PortalTeleport;
use crate::planet::Planet;
use crate::player::{Body, Player};
use bevy::prelude::*;
use rand::rngs::ThreadRng;
use rand::Rng;

/// One linked portal pair.
///
/// The cooldown is shared across both endpoints so a teleport cannot
/// immediately bounce the player back through the partner.
#[derive(Component, Debug, Clone, Copy)]
pub struct Portal {
    pub a: Vec2,
    pub b: Vec2,
    /// Clock time (ms) the pair can next fire.
    pub cooldown_until_ms: f64,
    /// Permanent discovery flags, one per endpoint; presentation reads them.
    pub revealed_a: bool,
    pub revealed_b: bool,
}

impl Portal {
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            a,
            b,
            cooldown_until_ms: 0.0,
            revealed_a: false,
            revealed_b: false,
        }
    }
}

fn candidate_point(rng: &mut ThreadRng, config: &SimConfig) -> Vec2 {
    Vec2::new(
        rng.gen_range(config.portal_margin..config.world_width - config.portal_margin),
        rng.gen_range(config.portal_margin..config.world_height - config.portal_margin),
    )
}

fn clear_of_planet(point: Vec2, planet: &Planet, config: &SimConfig) -> bool {
    point.distance(planet.center) > planet.radius + config.portal_planet_clearance
}

/// Rejection-sample one endpoint clear of the planet footprint.  Falls back
/// to the last candidate if the attempt budget runs out.
fn sample_endpoint(rng: &mut ThreadRng, planet: &Planet, config: &SimConfig) -> Vec2 {
    let mut point = candidate_point(rng, config);
    for _ in 0..config.portal_placement_attempts {
        if clear_of_planet(point, planet, config) {
            return point;
        }
        point = candidate_point(rng, config);
    }
    point
}

/// Resample the partner until the pair is far enough apart.  Best-effort:
/// after the attempt budget the closest-found candidate stands.
fn sample_partner(rng: &mut ThreadRng, a: Vec2, planet: &Planet, config: &SimConfig) -> Vec2 {
    let mut best = sample_endpoint(rng, planet, config);
    for _ in 0..config.portal_separation_attempts {
        if best.distance(a) >= config.portal_min_pair_distance {
            return best;
        }
        let candidate = sample_endpoint(rng, planet, config);
        if candidate.distance(a) > best.distance(a) {
            best = candidate;
        }
    }
    best
}

pub fn spawn_portals(mut commands: Commands, planet: Res<Planet>, config: Res<SimConfig>) {
    let mut rng = rand::thread_rng();
    for _ in 0..config.portal_pairs {
        let a = sample_endpoint(&mut rng, &planet, &config);
        let b = sample_partner(&mut rng, a, &planet, &config);
        commands.spawn(Portal::new(a, b));
    }
    println!("✓ Spawned {} portal pairs", config.portal_pairs);
}

/// Flip each endpoint's discovery flag the first time the player comes
/// near.  Flags never reset.
pub fn portal_reveal_system(
    config: Res<SimConfig>,
    players: Query<&Transform, With<Player>>,
    mut portals: Query<&mut Portal>,
) {
    let Ok(transform) = players.single() else {
        return;
    };
    let pos = transform.translation.truncate();

    for mut portal in portals.iter_mut() {
        if !portal.revealed_a && pos.distance(portal.a) < config.portal_reveal_radius {
            portal.revealed_a = true;
        }
        if !portal.revealed_b && pos.distance(portal.b) < config.portal_reveal_radius {
            portal.revealed_b = true;
        }
    }
}

/// Teleport the player through an overlapped portal whose pair cooldown has
/// elapsed: move to the partner, damp velocity, arm the shared cooldown.
pub fn portal_teleport_system(
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    mut teleports: MessageWriter<PortalTeleport>,
    mut players: Query<(&mut Transform, &mut Body), With<Player>>,
    mut portals: Query<&mut Portal>,
) {
    let Ok((mut transform, mut body)) = players.single_mut() else {
        return;
    };
    let pos = transform.translation.truncate();

    for mut portal in portals.iter_mut() {
        if !clock.reached(portal.cooldown_until_ms) {
            continue;
        }
        let destination = if pos.distance(portal.a) < config.portal_radius {
            portal.b
        } else if pos.distance(portal.b) < config.portal_radius {
            portal.a
        } else {
            continue;
        };

        transform.translation = destination.extend(transform.translation.z);
        body.velocity *= config.portal_velocity_damp;
        portal.cooldown_until_ms = clock.now_ms + config.portal_cooldown_ms;
        teleports.write(PortalTeleport {
            from: pos,
            to: destination,
        });
        // One teleport per tick at most.
        break;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{PORTAL_COOLDOWN_MS, PORTAL_VELOCITY_DAMP};
    use approx::assert_relative_eq;

    fn build_portal_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SimClock {
            now_ms: 0.0,
            delta_secs: 0.1,
        });
        app.insert_resource(SimConfig::default());
        app.add_message::<PortalTeleport>();
        app.add_systems(Update, portal_teleport_system);
        app
    }

    fn spawn_player_at(app: &mut App, pos: Vec2, velocity: Vec2) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Body {
                    velocity,
                    ..Default::default()
                },
                Transform::from_translation(pos.extend(0.0)),
            ))
            .id()
    }

    fn player_pos(app: &App, player: Entity) -> Vec2 {
        app.world()
            .get::<Transform>(player)
            .unwrap()
            .translation
            .truncate()
    }

    #[test]
    fn overlap_teleports_to_the_partner_and_damps_velocity() {
        let mut app = build_portal_app();
        let player = spawn_player_at(&mut app, Vec2::new(1000.0, 1000.0), Vec2::new(100.0, 0.0));
        app.world_mut()
            .spawn(Portal::new(Vec2::new(1000.0, 1000.0), Vec2::new(3000.0, 2000.0)));
        app.update();

        assert_eq!(player_pos(&app, player), Vec2::new(3000.0, 2000.0));
        let body = app.world().get::<Body>(player).unwrap();
        assert_relative_eq!(body.velocity.x, 100.0 * PORTAL_VELOCITY_DAMP, epsilon = 1e-3);
    }

    #[test]
    fn shared_cooldown_blocks_the_return_trip() {
        let mut app = build_portal_app();
        let player = spawn_player_at(&mut app, Vec2::new(1000.0, 1000.0), Vec2::ZERO);
        app.world_mut()
            .spawn(Portal::new(Vec2::new(1000.0, 1000.0), Vec2::new(3000.0, 2000.0)));

        // First trip fires at t=0.
        app.update();
        assert_eq!(player_pos(&app, player), Vec2::new(3000.0, 2000.0));

        // Standing on the partner endpoint before the cooldown elapses.
        app.world_mut().resource_mut::<SimClock>().now_ms = PORTAL_COOLDOWN_MS - 1.0;
        app.update();
        assert_eq!(player_pos(&app, player), Vec2::new(3000.0, 2000.0));

        // At the cooldown boundary the pair fires again.
        app.world_mut().resource_mut::<SimClock>().now_ms = PORTAL_COOLDOWN_MS;
        app.update();
        assert_eq!(player_pos(&app, player), Vec2::new(1000.0, 1000.0));
    }

    #[test]
    fn reveal_flags_are_permanent() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SimConfig::default());
        app.add_systems(Update, portal_reveal_system);
        let player = app
            .world_mut()
            .spawn((Player, Transform::from_translation(Vec3::new(1000.0, 1000.0, 0.0))))
            .id();
        let portal = app
            .world_mut()
            .spawn(Portal::new(Vec2::new(1100.0, 1000.0), Vec2::new(3000.0, 2000.0)))
            .id();

        app.update();
        assert!(app.world().get::<Portal>(portal).unwrap().revealed_a);
        assert!(!app.world().get::<Portal>(portal).unwrap().revealed_b);

        // Walking away does not un-reveal.
        app.world_mut()
            .get_mut::<Transform>(player)
            .unwrap()
            .translation = Vec3::new(200.0, 200.0, 0.0);
        app.update();
        assert!(app.world().get::<Portal>(portal).unwrap().revealed_a);
    }

    #[test]
    fn sampled_endpoints_avoid_the_planet_footprint() {
        let config = SimConfig::default();
        let planet = Planet::from_config(&config);
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let point = sample_endpoint(&mut rng, &planet, &config);
            assert!(
                clear_of_planet(point, &planet, &config),
                "endpoint {point} inside planet clearance"
            );
        }
    }
}
