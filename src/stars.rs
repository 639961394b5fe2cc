//! Star placement, the collection magnet, and pickup handling.
//!
//! Placement policy follows rarity: common colors cluster so wandering
//! pays off, uncommon scatter uniformly, rare colors hug the world's
//! edges, and gold is everywhere.  Collection feeds the
//! [`SpectrumTracker`] and surfaces its one-shot outcomes as messages.

use crate::config::SimConfig;
use crate::events::{CheatCollectAll, ColorCompleted, SpectrumCompleted, StarCollected};
use crate::player::Player;
use crate::spectrum::{Rarity, SpectrumTracker, StarColor, STAR_COLORS};
use bevy::prelude::*;
use rand::rngs::ThreadRng;
use rand::Rng;

/// A collectible star.
#[derive(Component, Debug, Clone, Copy)]
pub struct Star {
    pub color: StarColor,
}

// ── Placement ─────────────────────────────────────────────────────────────────

fn random_point(rng: &mut ThreadRng, config: &SimConfig) -> Vec2 {
    Vec2::new(
        rng.gen_range(config.spawn_margin..config.world_width - config.spawn_margin),
        rng.gen_range(config.spawn_margin..config.world_height - config.spawn_margin),
    )
}

/// A point inside one of the four border bands, uniformly chosen.
fn edge_point(rng: &mut ThreadRng, config: &SimConfig) -> Vec2 {
    let depth = config.edge_zone_depth;
    match rng.gen_range(0..4u8) {
        0 => Vec2::new(rng.gen_range(0.0..config.world_width), rng.gen_range(0.0..depth)),
        1 => Vec2::new(
            rng.gen_range(0.0..config.world_width),
            rng.gen_range(config.world_height - depth..config.world_height),
        ),
        2 => Vec2::new(rng.gen_range(0.0..depth), rng.gen_range(0.0..config.world_height)),
        _ => Vec2::new(
            rng.gen_range(config.world_width - depth..config.world_width),
            rng.gen_range(0.0..config.world_height),
        ),
    }
}

fn clamp_to_world(point: Vec2, config: &SimConfig) -> Vec2 {
    point.clamp(
        Vec2::ZERO,
        Vec2::new(config.world_width, config.world_height),
    )
}

fn positions_for(rng: &mut ThreadRng, rarity: Rarity, count: u32, config: &SimConfig) -> Vec<Vec2> {
    let mut positions = Vec::with_capacity(count as usize);
    match rarity {
        Rarity::Common => {
            // Clusters of 2-4 around a shared anchor.
            let mut remaining = count;
            while remaining > 0 {
                let anchor = random_point(rng, config);
                let cluster = rng.gen_range(2..=4u32).min(remaining);
                for _ in 0..cluster {
                    let offset = Vec2::new(
                        rng.gen_range(-config.cluster_spread..config.cluster_spread),
                        rng.gen_range(-config.cluster_spread..config.cluster_spread),
                    );
                    positions.push(clamp_to_world(anchor + offset, config));
                }
                remaining -= cluster;
            }
        }
        Rarity::Uncommon => {
            for _ in 0..count {
                positions.push(random_point(rng, config));
            }
        }
        Rarity::Rare => {
            for _ in 0..count {
                positions.push(edge_point(rng, config));
            }
        }
    }
    positions
}

pub fn spawn_stars(mut commands: Commands, config: Res<SimConfig>) {
    let mut rng = rand::thread_rng();
    let mut total = 0;

    for entry in STAR_COLORS.iter() {
        for pos in positions_for(&mut rng, entry.rarity, entry.spawn_count, &config) {
            commands.spawn((
                Star { color: entry.color },
                Transform::from_translation(pos.extend(0.0)),
            ));
            total += 1;
        }
    }
    for _ in 0..config.gold_spawn_count {
        let pos = random_point(&mut rng, &config);
        commands.spawn((
            Star {
                color: StarColor::Gold,
            },
            Transform::from_translation(pos.extend(0.0)),
        ));
        total += 1;
    }
    println!("✓ Spawned {total} stars");
}

// ── Magnet and collection ─────────────────────────────────────────────────────

/// Nudge nearby stars toward the player, strongest at close range.
///
/// Displacement per tick is `strength · (1 − d/radius)` along the line to
/// the player; the min-distance guard keeps the falloff finite at contact.
pub fn star_magnet_system(
    config: Res<SimConfig>,
    players: Query<&Transform, (With<Player>, Without<Star>)>,
    mut stars: Query<&mut Transform, With<Star>>,
) {
    let Ok(player_transform) = players.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for mut transform in stars.iter_mut() {
        let pos = transform.translation.truncate();
        let dist = pos.distance(player_pos);
        if dist >= config.magnet_radius || dist < config.magnet_min_dist {
            continue;
        }
        let pull = config.magnet_strength * (1.0 - dist / config.magnet_radius);
        let step = (player_pos - pos).normalize_or_zero() * pull;
        transform.translation += step.extend(0.0);
    }
}

/// Collect overlapped stars, update the tracker, and emit the one-shot
/// completion messages its outcomes report.
pub fn star_collect_system(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut tracker: ResMut<SpectrumTracker>,
    mut collected: MessageWriter<StarCollected>,
    mut color_completed: MessageWriter<ColorCompleted>,
    mut spectrum_completed: MessageWriter<SpectrumCompleted>,
    players: Query<&Transform, With<Player>>,
    stars: Query<(Entity, &Transform, &Star)>,
) {
    let Ok(player_transform) = players.single() else {
        return;
    };
    let player_pos = player_transform.translation.truncate();

    for (entity, transform, star) in stars.iter() {
        let pos = transform.translation.truncate();
        if pos.distance(player_pos) >= config.star_collect_radius {
            continue;
        }

        commands.entity(entity).despawn();
        let outcome = tracker.record(star.color, config.required_per_color);
        collected.write(StarCollected {
            color: star.color,
            position: pos,
        });
        if outcome.just_completed {
            color_completed.write(ColorCompleted { color: star.color });
        }
        if outcome.all_complete {
            spectrum_completed.write(SpectrumCompleted);
        }
    }
}

/// Handle the collect-all cheat: despawn every star and bulk-complete the
/// tracker, preserving the exactly-once completion signals.
pub fn cheat_collect_system(
    mut commands: Commands,
    config: Res<SimConfig>,
    mut tracker: ResMut<SpectrumTracker>,
    mut cheats: MessageReader<CheatCollectAll>,
    mut color_completed: MessageWriter<ColorCompleted>,
    mut spectrum_completed: MessageWriter<SpectrumCompleted>,
    stars: Query<Entity, With<Star>>,
) {
    if cheats.read().next().is_none() {
        return;
    }
    cheats.clear();

    for entity in stars.iter() {
        commands.entity(entity).despawn();
    }
    let outcome = tracker.fill_all(config.required_per_color);
    for color in outcome.newly_completed {
        color_completed.write(ColorCompleted { color });
    }
    if !outcome.was_already_complete {
        spectrum_completed.write(SpectrumCompleted);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{MAGNET_RADIUS, REQUIRED_PER_COLOR, STAR_COLLECT_RADIUS};

    fn build_star_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(SimConfig::default());
        app.insert_resource(SpectrumTracker::default());
        app.add_message::<StarCollected>();
        app.add_message::<ColorCompleted>();
        app.add_message::<SpectrumCompleted>();
        app.add_message::<CheatCollectAll>();
        app
    }

    fn spawn_player_at(app: &mut App, pos: Vec2) -> Entity {
        app.world_mut()
            .spawn((Player, Transform::from_translation(pos.extend(0.0))))
            .id()
    }

    fn spawn_star_at(app: &mut App, color: StarColor, pos: Vec2) -> Entity {
        app.world_mut()
            .spawn((Star { color }, Transform::from_translation(pos.extend(0.0))))
            .id()
    }

    fn drain<M: Message + Clone>(app: &mut App) -> Vec<M> {
        let mut messages = app.world_mut().resource_mut::<Messages<M>>();
        messages.drain().collect()
    }

    #[test]
    fn overlapped_star_is_collected_and_despawned() {
        let mut app = build_star_app();
        spawn_player_at(&mut app, Vec2::new(500.0, 500.0));
        let star = spawn_star_at(&mut app, StarColor::Red, Vec2::new(510.0, 500.0));
        app.add_systems(Update, star_collect_system);
        app.update();

        assert!(app.world().get_entity(star).is_err(), "star must despawn");
        let tracker = app.world().resource::<SpectrumTracker>();
        assert_eq!(tracker.collected(StarColor::Red), 1);
        assert_eq!(drain::<StarCollected>(&mut app).len(), 1);
    }

    #[test]
    fn distant_star_is_untouched() {
        let mut app = build_star_app();
        spawn_player_at(&mut app, Vec2::new(500.0, 500.0));
        let star = spawn_star_at(
            &mut app,
            StarColor::Red,
            Vec2::new(500.0 + STAR_COLLECT_RADIUS + 5.0, 500.0),
        );
        app.add_systems(Update, star_collect_system);
        app.update();

        assert!(app.world().get_entity(star).is_ok());
        assert!(drain::<StarCollected>(&mut app).is_empty());
    }

    #[test]
    fn threshold_collection_emits_color_completed_once() {
        let mut app = build_star_app();
        spawn_player_at(&mut app, Vec2::new(500.0, 500.0));
        app.add_systems(Update, star_collect_system);

        for _ in 0..REQUIRED_PER_COLOR + 1 {
            spawn_star_at(&mut app, StarColor::Blue, Vec2::new(500.0, 500.0));
            app.update();
        }

        assert_eq!(drain::<ColorCompleted>(&mut app).len(), 1);
        assert!(drain::<SpectrumCompleted>(&mut app).is_empty());
    }

    #[test]
    fn cheat_collects_everything_exactly_once() {
        let mut app = build_star_app();
        spawn_player_at(&mut app, Vec2::new(500.0, 500.0));
        for color in StarColor::SPECTRUM {
            spawn_star_at(&mut app, color, Vec2::new(3000.0, 2500.0));
        }
        app.add_systems(Update, cheat_collect_system);

        app.world_mut()
            .resource_mut::<Messages<CheatCollectAll>>()
            .write(CheatCollectAll);
        app.update();

        assert_eq!(drain::<ColorCompleted>(&mut app).len(), 7);
        assert_eq!(drain::<SpectrumCompleted>(&mut app).len(), 1);
        assert_eq!(
            app.world_mut()
                .query_filtered::<(), With<Star>>()
                .iter(app.world())
                .count(),
            0
        );

        // Cheating again does not re-fire the completion signals.
        app.world_mut()
            .resource_mut::<Messages<CheatCollectAll>>()
            .write(CheatCollectAll);
        app.update();
        assert!(drain::<ColorCompleted>(&mut app).is_empty());
        assert!(drain::<SpectrumCompleted>(&mut app).is_empty());
    }

    #[test]
    fn magnet_pulls_stars_in_and_spares_distant_ones() {
        let mut app = build_star_app();
        spawn_player_at(&mut app, Vec2::new(500.0, 500.0));
        let near = spawn_star_at(&mut app, StarColor::Gold, Vec2::new(530.0, 500.0));
        let far = spawn_star_at(
            &mut app,
            StarColor::Gold,
            Vec2::new(500.0 + MAGNET_RADIUS + 10.0, 500.0),
        );
        app.add_systems(Update, star_magnet_system);
        app.update();

        let near_x = app.world().get::<Transform>(near).unwrap().translation.x;
        let far_x = app.world().get::<Transform>(far).unwrap().translation.x;
        assert!(near_x < 530.0, "near star must step toward the player");
        assert_eq!(far_x, 500.0 + MAGNET_RADIUS + 10.0);
    }

    #[test]
    fn spawn_counts_follow_the_color_table() {
        let config = SimConfig::default();
        let mut rng = rand::thread_rng();
        for entry in STAR_COLORS.iter() {
            let positions = positions_for(&mut rng, entry.rarity, entry.spawn_count, &config);
            assert_eq!(positions.len() as u32, entry.spawn_count);
            for pos in positions {
                assert!(pos.x >= 0.0 && pos.x <= config.world_width);
                assert!(pos.y >= 0.0 && pos.y <= config.world_height);
            }
        }
    }
}
