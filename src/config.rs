//! Runtime simulation configuration loaded from `assets/sim.toml`.
//!
//! [`SimConfig`] is a Bevy [`Resource`] that mirrors every constant in
//! [`crate::constants`].  At startup, [`load_sim_config`] reads
//! `assets/sim.toml` and overwrites the defaults with any values present in
//! the file.  Missing keys fall back to the compile-time defaults, so a
//! minimal TOML can override just the constants you care about.
//!
//! ## Usage in systems
//!
//! Add `config: Res<SimConfig>` to any system parameter list and read values
//! with `config.player_max_speed`, `config.portal_cooldown_ms`, etc.
//!
//! Keep `src/constants.rs` in sync: it remains the **authoritative default**
//! source used by `SimConfig::default()`.

use crate::constants::*;
use bevy::prelude::*;
use serde::Deserialize;

/// Runtime-tunable simulation and gameplay configuration.
///
/// All fields default to the corresponding compile-time constant from
/// `src/constants.rs`.  Override any subset by setting the value in
/// `assets/sim.toml`.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    // ── World Bounds ─────────────────────────────────────────────────────────
    pub world_width: f32,
    pub world_height: f32,
    pub spawn_margin: f32,

    // ── Player: Movement ─────────────────────────────────────────────────────
    pub player_acceleration: f32,
    pub player_max_speed: f32,
    pub player_drag: f32,
    pub arrive_radius: f32,
    pub joystick_dead_zone: f32,
    pub fast_speed_fraction: f32,
    pub disorient_speed_factor: f32,

    // ── Planet ───────────────────────────────────────────────────────────────
    pub planet_radius: f32,
    pub planet_center_x: f32,
    pub planet_center_y: f32,
    pub planet_gravity: f32,
    pub planet_gravity_range: f32,
    pub planet_gravity_fade: f32,
    pub player_spawn_altitude: f32,

    // ── Stars ────────────────────────────────────────────────────────────────
    pub required_per_color: u32,
    pub gold_spawn_count: u32,
    pub cluster_spread: f32,
    pub edge_zone_depth: f32,
    pub star_collect_radius: f32,
    pub magnet_radius: f32,
    pub magnet_strength: f32,
    pub magnet_min_dist: f32,

    // ── Portals ──────────────────────────────────────────────────────────────
    pub portal_pairs: u32,
    pub portal_radius: f32,
    pub portal_cooldown_ms: f64,
    pub portal_margin: f32,
    pub portal_min_pair_distance: f32,
    pub portal_placement_attempts: u32,
    pub portal_separation_attempts: u32,
    pub portal_planet_clearance: f32,
    pub portal_reveal_radius: f32,
    pub portal_velocity_damp: f32,

    // ── Hazards: Asteroid Field ──────────────────────────────────────────────
    pub asteroid_zone_spread: f32,
    pub asteroid_drift_speed: f32,
    pub asteroid_bounce: f32,
    pub asteroid_knockback_speed: f32,
    pub asteroid_stun_secs: f32,
    pub player_body_radius: f32,

    // ── Hazards: Black Hole ──────────────────────────────────────────────────
    pub black_hole_pull_radius: f32,
    pub black_hole_pull_strength: f32,
    pub black_hole_min_dist: f32,

    // ── Hazards: Nebula Fog ──────────────────────────────────────────────────
    pub fog_radius: f32,

    // ── Hazards: Solar Flare ─────────────────────────────────────────────────
    pub flare_interval_ms: f64,
    pub flare_jitter_ms: f64,
    pub flare_warning_ms: f64,
    pub flare_active_ms: f64,

    // ── Rainbow Bridge ───────────────────────────────────────────────────────
    pub bridge_ride_speed: f32,
    pub bridge_lifetime_ms: f64,
    pub bridge_arc_height_ratio: f32,
    pub bridge_arc_length: f32,
    pub bridge_blend_keep: f32,
    pub bridge_ride_half_width: f32,

    // ── Guide ────────────────────────────────────────────────────────────────
    pub guide_materialize_ms: f64,
    pub guide_ready_ms: f64,
    pub guide_spawn_offset: f32,
    pub guide_spawn_margin: f32,
    pub guide_reach_radius: f32,

    // ── Cheats ───────────────────────────────────────────────────────────────
    pub cheat_reset_ms: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            // World Bounds
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            spawn_margin: SPAWN_MARGIN,
            // Player: Movement
            player_acceleration: PLAYER_ACCELERATION,
            player_max_speed: PLAYER_MAX_SPEED,
            player_drag: PLAYER_DRAG,
            arrive_radius: ARRIVE_RADIUS,
            joystick_dead_zone: JOYSTICK_DEAD_ZONE,
            fast_speed_fraction: FAST_SPEED_FRACTION,
            disorient_speed_factor: DISORIENT_SPEED_FACTOR,
            // Planet
            planet_radius: PLANET_RADIUS,
            planet_center_x: PLANET_CENTER_X,
            planet_center_y: PLANET_CENTER_Y,
            planet_gravity: PLANET_GRAVITY,
            planet_gravity_range: PLANET_GRAVITY_RANGE,
            planet_gravity_fade: PLANET_GRAVITY_FADE,
            player_spawn_altitude: PLAYER_SPAWN_ALTITUDE,
            // Stars
            required_per_color: REQUIRED_PER_COLOR,
            gold_spawn_count: GOLD_SPAWN_COUNT,
            cluster_spread: CLUSTER_SPREAD,
            edge_zone_depth: EDGE_ZONE_DEPTH,
            star_collect_radius: STAR_COLLECT_RADIUS,
            magnet_radius: MAGNET_RADIUS,
            magnet_strength: MAGNET_STRENGTH,
            magnet_min_dist: MAGNET_MIN_DIST,
            // Portals
            portal_pairs: PORTAL_PAIRS,
            portal_radius: PORTAL_RADIUS,
            portal_cooldown_ms: PORTAL_COOLDOWN_MS,
            portal_margin: PORTAL_MARGIN,
            portal_min_pair_distance: PORTAL_MIN_PAIR_DISTANCE,
            portal_placement_attempts: PORTAL_PLACEMENT_ATTEMPTS,
            portal_separation_attempts: PORTAL_SEPARATION_ATTEMPTS,
            portal_planet_clearance: PORTAL_PLANET_CLEARANCE,
            portal_reveal_radius: PORTAL_REVEAL_RADIUS,
            portal_velocity_damp: PORTAL_VELOCITY_DAMP,
            // Hazards: Asteroid Field
            asteroid_zone_spread: ASTEROID_ZONE_SPREAD,
            asteroid_drift_speed: ASTEROID_DRIFT_SPEED,
            asteroid_bounce: ASTEROID_BOUNCE,
            asteroid_knockback_speed: ASTEROID_KNOCKBACK_SPEED,
            asteroid_stun_secs: ASTEROID_STUN_SECS,
            player_body_radius: PLAYER_BODY_RADIUS,
            // Hazards: Black Hole
            black_hole_pull_radius: BLACK_HOLE_PULL_RADIUS,
            black_hole_pull_strength: BLACK_HOLE_PULL_STRENGTH,
            black_hole_min_dist: BLACK_HOLE_MIN_DIST,
            // Hazards: Nebula Fog
            fog_radius: FOG_RADIUS,
            // Hazards: Solar Flare
            flare_interval_ms: FLARE_INTERVAL_MS,
            flare_jitter_ms: FLARE_JITTER_MS,
            flare_warning_ms: FLARE_WARNING_MS,
            flare_active_ms: FLARE_ACTIVE_MS,
            // Rainbow Bridge
            bridge_ride_speed: BRIDGE_RIDE_SPEED,
            bridge_lifetime_ms: BRIDGE_LIFETIME_MS,
            bridge_arc_height_ratio: BRIDGE_ARC_HEIGHT_RATIO,
            bridge_arc_length: BRIDGE_ARC_LENGTH,
            bridge_blend_keep: BRIDGE_BLEND_KEEP,
            bridge_ride_half_width: BRIDGE_RIDE_HALF_WIDTH,
            // Guide
            guide_materialize_ms: GUIDE_MATERIALIZE_MS,
            guide_ready_ms: GUIDE_READY_MS,
            guide_spawn_offset: GUIDE_SPAWN_OFFSET,
            guide_spawn_margin: GUIDE_SPAWN_MARGIN,
            guide_reach_radius: GUIDE_REACH_RADIUS,
            // Cheats
            cheat_reset_ms: CHEAT_RESET_MS,
        }
    }
}

/// Startup system: attempt to load `assets/sim.toml` and overwrite the
/// `SimConfig` resource with any values present in the file.
///
/// Missing keys retain their compiled defaults.  TOML parse errors are logged
/// but do not abort the simulation.  A missing file is silently ignored
/// (defaults are already in place from `insert_resource`).
pub fn load_sim_config(mut config: ResMut<SimConfig>) {
    let path = "assets/sim.toml";
    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<SimConfig>(&contents) {
            Ok(loaded) => {
                if let Err(e) = crate::error::validate_config(&loaded) {
                    warn!("rejecting {path}: {e}; using defaults");
                    return;
                }
                *config = loaded;
                println!("✓ Loaded sim config from {path}");
            }
            Err(e) => {
                warn!("failed to parse {path}: {e}; using defaults");
            }
        },
        Err(_) => {
            // File not present; defaults are already in place; not an error.
            println!("ℹ No {path} found; using compiled defaults");
        }
    }
}
