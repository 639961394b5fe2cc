//! Nebula fog banks: proximity probes with no physics effect.
//!
//! The fog only informs presentation (visibility dimming, muffled audio).
//! The simulation tracks a single `FogState` resource that anything can
//! read without querying fog entities.

use crate::config::SimConfig;
use crate::player::Player;
use bevy::prelude::*;

const FOG_POSITIONS: [(f32, f32); 4] = [
    (2200.0, 700.0),
    (1000.0, 1600.0),
    (3300.0, 1400.0),
    (2600.0, 2500.0),
];

#[derive(Component, Debug, Clone, Copy)]
pub struct NebulaFog {
    pub center: Vec2,
    pub radius: f32,
}

impl NebulaFog {
    pub fn is_player_inside(&self, player_pos: Vec2) -> bool {
        player_pos.distance(self.center) < self.radius
    }
}

/// Whether the player is currently inside any fog bank.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct FogState {
    pub player_in_fog: bool,
}

pub fn spawn_nebula_fogs(mut commands: Commands, config: Res<SimConfig>) {
    for &(x, y) in FOG_POSITIONS.iter() {
        let center = Vec2::new(x, y);
        commands.spawn((
            NebulaFog {
                center,
                radius: config.fog_radius,
            },
            Transform::from_translation(center.extend(0.0)),
        ));
    }
    println!("✓ Spawned {} nebula fog banks", FOG_POSITIONS.len());
}

pub fn fog_probe_system(
    mut state: ResMut<FogState>,
    fogs: Query<&NebulaFog>,
    players: Query<&Transform, With<Player>>,
) {
    let Ok(transform) = players.single() else {
        return;
    };
    let pos = transform.translation.truncate();
    state.player_in_fog = fogs.iter().any(|fog| fog.is_player_inside(pos));
}
