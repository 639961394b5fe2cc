//! Simulation wiring: resources, messages, startup, and the per-tick
//! system order.
//!
//! The `Update` schedule runs as one explicit chain.  Order is load-bearing:
//! the clock advances first, input resolves before forces, every force
//! applies before integration, constraints come right after integration,
//! and the progression systems run last so they observe the settled frame.

use crate::bridge::{bridge_lifetime_system, bridge_ride_system};
use crate::clock::{advance_sim_clock, SimClock};
use crate::config::{load_sim_config, SimConfig};
use crate::events::{
    AnswerDelivered, CheatCollectAll, ColorCompleted, PlayerStunned, PortalTeleport,
    ProgressionChanged, QuestionSubmitted, SpectrumCompleted, StarCollected,
};
use crate::guide::{guide_materialize_system, guide_reach_system, guide_spawn_system};
use crate::hazards::{
    asteroid_contact_system, asteroid_drift_system, black_hole_pull_system, fog_probe_system,
    solar_flare_system, spawn_asteroid_fields, spawn_black_holes, spawn_nebula_fogs, FlareState,
    FogState,
};
use crate::input::{cheat_sequence_system, keyboard_snapshot_system, CheatBuffer, InputSnapshot};
use crate::oracle::oracle_answer_system;
use crate::planet::{planet_gravity_system, spawn_planet, surface_constrain_system};
use crate::player::{
    integrate_player_system, player_acceleration_system, spawn_player, status_tick_system,
    world_bounds_system, ControlLock, ThrustState,
};
use crate::portal::{portal_reveal_system, portal_teleport_system, spawn_portals};
use crate::progression::ProgressionState;
use crate::spectrum::SpectrumTracker;
use crate::stars::{cheat_collect_system, spawn_stars, star_collect_system, star_magnet_system};
use bevy::prelude::*;

pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SimConfig>()
            .init_resource::<SimClock>()
            .init_resource::<InputSnapshot>()
            .init_resource::<CheatBuffer>()
            .init_resource::<ThrustState>()
            .init_resource::<ControlLock>()
            .init_resource::<SpectrumTracker>()
            .init_resource::<FogState>()
            .init_state::<ProgressionState>()
            .add_message::<StarCollected>()
            .add_message::<ColorCompleted>()
            .add_message::<SpectrumCompleted>()
            .add_message::<PlayerStunned>()
            .add_message::<PortalTeleport>()
            .add_message::<ProgressionChanged>()
            .add_message::<QuestionSubmitted>()
            .add_message::<AnswerDelivered>()
            .add_message::<CheatCollectAll>()
            .add_systems(
                Startup,
                (
                    load_sim_config,
                    schedule_first_flare,
                    spawn_planet,
                    spawn_player,
                    spawn_stars,
                    spawn_asteroid_fields,
                    spawn_black_holes,
                    spawn_nebula_fogs,
                    spawn_portals,
                )
                    .chain(),
            )
            .add_systems(
                Update,
                (
                    (
                        advance_sim_clock,
                        keyboard_snapshot_system,
                        cheat_sequence_system,
                        player_acceleration_system,
                        status_tick_system,
                    )
                        .chain(),
                    (
                        planet_gravity_system,
                        black_hole_pull_system,
                        bridge_ride_system,
                        bridge_lifetime_system,
                        integrate_player_system,
                        world_bounds_system,
                        surface_constrain_system,
                    )
                        .chain(),
                    (
                        asteroid_drift_system,
                        asteroid_contact_system,
                        solar_flare_system,
                        fog_probe_system,
                    )
                        .chain(),
                    (
                        star_magnet_system,
                        star_collect_system,
                        cheat_collect_system,
                        portal_reveal_system,
                        portal_teleport_system,
                    )
                        .chain(),
                    (
                        guide_spawn_system,
                        guide_materialize_system,
                        guide_reach_system,
                        oracle_answer_system,
                    )
                        .chain(),
                )
                    .chain(),
            );
        println!("✓ Simulation plugin registered");
    }
}

/// Arm the flare cycle once the config has settled.
fn schedule_first_flare(mut commands: Commands, config: Res<SimConfig>) {
    commands.insert_resource(FlareState::scheduled(0.0, &config));
}
