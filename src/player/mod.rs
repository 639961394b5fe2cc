//! Player entity: components, spawning, and the movement controller.

pub mod control;
pub mod state;

pub use control::{
    integrate_player_system, player_acceleration_system, status_tick_system, world_bounds_system,
};
pub use state::{Acceleration, Body, ControlLock, Player, StatusEffects, ThrustState};

use crate::config::SimConfig;
use bevy::prelude::*;

/// Spawn the player just above the planet's north pole, at rest.
pub fn spawn_player(mut commands: Commands, config: Res<SimConfig>) {
    let spawn = Vec2::new(
        config.planet_center_x,
        config.planet_center_y - config.planet_radius - config.player_spawn_altitude,
    );
    commands.spawn((
        Player,
        Body {
            max_speed: config.player_max_speed,
            drag: config.player_drag,
            ..Default::default()
        },
        Acceleration::default(),
        StatusEffects::default(),
        Transform::from_translation(spawn.extend(1.0)),
    ));
    println!("✓ Player spawned at {spawn}");
}
