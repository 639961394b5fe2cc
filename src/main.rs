//! Headless soak host: runs the simulation with a scripted wanderer.
//!
//! Useful for eyeballing the startup log and message flow without a
//! presentation layer.  The driver retargets the pointer at a random spot
//! every few seconds and quits after a fixed session.

use bevy::app::{AppExit, ScheduleRunnerPlugin};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use rand::Rng;
use spectra::clock::SimClock;
use spectra::config::SimConfig;
use spectra::events::{PortalTeleport, ProgressionChanged, StarCollected};
use spectra::input::InputSnapshot;
use spectra::simulation::SimulationPlugin;
use std::time::Duration;

const SESSION_MS: f64 = 120_000.0;
const RETARGET_MS: f64 = 4_000.0;

#[derive(Resource, Default)]
struct WanderDriver {
    next_retarget_ms: f64,
}

fn main() {
    App::new()
        .add_plugins(
            MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
                1.0 / 60.0,
            ))),
        )
        .add_plugins(StatesPlugin)
        .add_plugins(SimulationPlugin)
        .init_resource::<WanderDriver>()
        .add_systems(Update, (wander_system, report_system, session_end_system))
        .run();
}

/// Point the scripted pilot somewhere new every few seconds.
fn wander_system(
    clock: Res<SimClock>,
    config: Res<SimConfig>,
    mut driver: ResMut<WanderDriver>,
    mut snapshot: ResMut<InputSnapshot>,
) {
    if !clock.reached(driver.next_retarget_ms) {
        return;
    }
    let mut rng = rand::thread_rng();
    let target = Vec2::new(
        rng.gen_range(config.spawn_margin..config.world_width - config.spawn_margin),
        rng.gen_range(config.spawn_margin..config.world_height - config.spawn_margin),
    );
    snapshot.pointer_target = Some(target);
    driver.next_retarget_ms = clock.now_ms + RETARGET_MS;
}

fn report_system(
    mut collected: MessageReader<StarCollected>,
    mut teleports: MessageReader<PortalTeleport>,
    mut progression: MessageReader<ProgressionChanged>,
) {
    for event in collected.read() {
        println!("collected {:?} at {}", event.color, event.position);
    }
    for event in teleports.read() {
        println!("teleported {} -> {}", event.from, event.to);
    }
    for event in progression.read() {
        println!("progression -> {:?}", event.state);
    }
}

fn session_end_system(clock: Res<SimClock>, mut exit: MessageWriter<AppExit>) {
    if clock.reached(SESSION_MS) {
        println!("✓ Soak session complete");
        exit.write(AppExit::Success);
    }
}
