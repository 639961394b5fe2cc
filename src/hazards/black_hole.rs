//! Black holes: radial pull fields that never trap the player outright.

use crate::clock::SimClock;
use crate::config::SimConfig;
use crate::player::{Body, Player};
use bevy::prelude::*;

/// Fixed hole placements, kept away from the planet approach and the
/// world center.
const BLACK_HOLE_POSITIONS: [(f32, f32); 3] = [(1600.0, 900.0), (3000.0, 2000.0), (600.0, 2100.0)];

#[derive(Component, Debug, Clone, Copy)]
pub struct BlackHole {
    pub center: Vec2,
}

impl BlackHole {
    /// Pull magnitude (u/s²) at `point`: ramps linearly from 0 at the pull
    /// radius to full strength at the center.  Zero outside the radius and
    /// inside the min-distance guard.
    pub fn pull_at(&self, point: Vec2, config: &SimConfig) -> f32 {
        let dist = point.distance(self.center);
        if dist >= config.black_hole_pull_radius || dist < config.black_hole_min_dist {
            return 0.0;
        }
        config.black_hole_pull_strength * (1.0 - dist / config.black_hole_pull_radius)
    }
}

pub fn spawn_black_holes(mut commands: Commands) {
    for &(x, y) in BLACK_HOLE_POSITIONS.iter() {
        let center = Vec2::new(x, y);
        commands.spawn((
            BlackHole { center },
            Transform::from_translation(center.extend(0.0)),
        ));
    }
    println!("✓ Spawned {} black holes", BLACK_HOLE_POSITIONS.len());
}

/// Apply each hole's pull as a velocity nudge.  The player's own thrust is
/// never suppressed, so a hole can always be escaped by accelerating away.
pub fn black_hole_pull_system(
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    holes: Query<&BlackHole>,
    mut players: Query<(&Transform, &mut Body), With<Player>>,
) {
    let Ok((transform, mut body)) = players.single_mut() else {
        return;
    };
    let pos = transform.translation.truncate();

    for hole in holes.iter() {
        let pull = hole.pull_at(pos, &config);
        if pull <= 0.0 {
            continue;
        }
        let toward = (hole.center - pos).normalize_or_zero();
        body.velocity += toward * pull * clock.delta_secs;
    }
}
